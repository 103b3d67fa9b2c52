//! The object representation of the engine.
//!
//! Every object kind of the language shares one [`Object`] shape: a property
//! table, a prototype pointer, an extensibility flag, and an [`ObjectData`]
//! payload discriminating the kind. [`JsObject`] is the garbage collected
//! handle through which all of the internal methods are reached.

pub mod builders;
pub mod internal_methods;
mod operations;
mod property_map;

#[cfg(test)]
mod tests;

pub use builders::{ConstructorBuilder, FunctionBuilder, ObjectInitializer};
pub use operations::IntegrityLevel;
pub use property_map::PropertyMap;

use crate::{
    builtins::{
        array::array_iterator::ArrayIterator,
        array_buffer::ArrayBuffer,
        dataview::DataView,
        date::Date,
        error::ErrorKind,
        function::Function,
        map::{map_iterator::MapIterator, ordered_map::OrderedMap},
        module_namespace::ModuleNamespace,
        proxy::Proxy,
        regexp::{regexp_string_iterator::RegExpStringIterator, RegExp},
        set::{ordered_set::OrderedSet, set_iterator::SetIterator},
        string::string_iterator::StringIterator,
        typed_array::integer_indexed_object::IntegerIndexed,
        weak_map::NativeWeakMap,
        weak_set::NativeWeakSet,
    },
    gc::{custom_trace, Finalize, Gc, GcCell, Ref, RefMut, Trace},
    property::{PropertyDescriptor, PropertyKey},
    JsBigInt, JsString, JsSymbol, JsValue,
};
use std::{cell::Cell, fmt};

/// Static `prototype`, usually set on constructors as a key to point to their
/// respective prototype object.
pub const PROTOTYPE: &str = "prototype";

/// Static `constructor`, usually set on prototypes as a key to point to their
/// respective constructor object.
pub const CONSTRUCTOR: &str = "constructor";

/// A `[[Prototype]]` field: either an object or null.
pub type JsPrototype = Option<JsObject>;

thread_local! {
    /// Monotonic source of object identities.
    ///
    /// Weak collections key their entries by this identity, so it must never
    /// be reused for the lifetime of the process.
    static OBJECT_ID_COUNT: Cell<u64> = const { Cell::new(0) };
}

/// The internal representation of a JavaScript object.
#[derive(Finalize)]
pub struct Object {
    /// The collection of properties contained in the object.
    properties: PropertyMap,
    /// The kind payload of the object.
    pub(crate) data: ObjectData,
    /// The `[[Prototype]]` internal field.
    prototype: JsPrototype,
    /// Whether the object can have new properties added to it.
    extensible: bool,
}

unsafe impl Trace for Object {
    custom_trace!(this, {
        mark(&this.properties);
        mark(&this.data);
        mark(&this.prototype);
    });
}

impl Default for Object {
    fn default() -> Self {
        Self {
            properties: PropertyMap::default(),
            data: ObjectData::Ordinary,
            prototype: None,
            extensible: true,
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("kind", &self.data.type_tag())
            .field("extensible", &self.extensible)
            .finish_non_exhaustive()
    }
}

/// The collection of every kind payload an object can carry.
#[derive(Debug, Trace, Finalize)]
pub enum ObjectData {
    /// An array exotic object; its `length` lives in the property table.
    Array,
    /// An array iterator with its position state.
    ArrayIterator(ArrayIterator),
    /// An `ArrayBuffer` byte store.
    ArrayBuffer(ArrayBuffer),
    /// A bound `BigInt` primitive.
    BigInt(JsBigInt),
    /// A bound `Boolean` primitive.
    Boolean(bool),
    /// A `DataView` over an `ArrayBuffer`.
    DataView(DataView),
    /// A `Date` time value.
    Date(Date),
    /// An error object, tagged with its error kind.
    Error(ErrorKind),
    /// A callable object.
    Function(Function),
    /// A typed array view over an `ArrayBuffer`.
    IntegerIndexed(IntegerIndexed),
    /// A keyed `Map` collection.
    Map(OrderedMap<JsValue>),
    /// A map iterator with its position state.
    MapIterator(MapIterator),
    /// A module namespace exotic object.
    ModuleNamespace(ModuleNamespace),
    /// A bound `Number` primitive.
    Number(f64),
    /// An ordinary object.
    Ordinary,
    /// A proxy exotic object.
    Proxy(Proxy),
    /// A regular expression with its compiled matcher.
    RegExp(Box<RegExp>),
    /// A regexp string iterator with its position state.
    RegExpStringIterator(RegExpStringIterator),
    /// A `Set` collection.
    Set(OrderedSet),
    /// A set iterator with its position state.
    SetIterator(SetIterator),
    /// A bound `String` primitive with virtual indexed characters.
    String(JsString),
    /// A string iterator with its position state.
    StringIterator(StringIterator),
    /// A bound `Symbol` primitive.
    Symbol(JsSymbol),
    /// A `WeakMap` keyed by object identity.
    WeakMap(NativeWeakMap),
    /// A `WeakSet` keyed by object identity.
    WeakSet(NativeWeakSet),
}

impl ObjectData {
    /// Creates the `Ordinary` object data.
    #[must_use]
    pub fn ordinary() -> Self {
        Self::Ordinary
    }

    /// Creates the `Array` object data.
    #[must_use]
    pub fn array() -> Self {
        Self::Array
    }

    /// Creates the `ArrayIterator` object data.
    #[must_use]
    pub fn array_iterator(iterator: ArrayIterator) -> Self {
        Self::ArrayIterator(iterator)
    }

    /// Creates the `ArrayBuffer` object data.
    #[must_use]
    pub fn array_buffer(buffer: ArrayBuffer) -> Self {
        Self::ArrayBuffer(buffer)
    }

    /// Creates the `BigInt` wrapper object data.
    #[must_use]
    pub fn big_int(bigint: JsBigInt) -> Self {
        Self::BigInt(bigint)
    }

    /// Creates the `Boolean` wrapper object data.
    #[must_use]
    pub fn boolean(boolean: bool) -> Self {
        Self::Boolean(boolean)
    }

    /// Creates the `DataView` object data.
    #[must_use]
    pub fn data_view(data_view: DataView) -> Self {
        Self::DataView(data_view)
    }

    /// Creates the `Date` object data.
    #[must_use]
    pub fn date(date: Date) -> Self {
        Self::Date(date)
    }

    /// Creates the `Error` object data.
    #[must_use]
    pub fn error(kind: ErrorKind) -> Self {
        Self::Error(kind)
    }

    /// Creates the `Function` object data.
    #[must_use]
    pub fn function(function: Function) -> Self {
        Self::Function(function)
    }

    /// Creates the `IntegerIndexed` object data.
    #[must_use]
    pub fn integer_indexed(integer_indexed: IntegerIndexed) -> Self {
        Self::IntegerIndexed(integer_indexed)
    }

    /// Creates the `Map` object data.
    #[must_use]
    pub fn map(map: OrderedMap<JsValue>) -> Self {
        Self::Map(map)
    }

    /// Creates the `MapIterator` object data.
    #[must_use]
    pub fn map_iterator(iterator: MapIterator) -> Self {
        Self::MapIterator(iterator)
    }

    /// Creates the `ModuleNamespace` object data.
    #[must_use]
    pub fn module_namespace(namespace: ModuleNamespace) -> Self {
        Self::ModuleNamespace(namespace)
    }

    /// Creates the `Number` wrapper object data.
    #[must_use]
    pub fn number(number: f64) -> Self {
        Self::Number(number)
    }

    /// Creates the `Proxy` object data.
    #[must_use]
    pub fn proxy(proxy: Proxy) -> Self {
        Self::Proxy(proxy)
    }

    /// Creates the `RegExp` object data.
    #[must_use]
    pub fn reg_exp(regexp: Box<RegExp>) -> Self {
        Self::RegExp(regexp)
    }

    /// Creates the `RegExpStringIterator` object data.
    #[must_use]
    pub fn reg_exp_string_iterator(iterator: RegExpStringIterator) -> Self {
        Self::RegExpStringIterator(iterator)
    }

    /// Creates the `Set` object data.
    #[must_use]
    pub fn set(set: OrderedSet) -> Self {
        Self::Set(set)
    }

    /// Creates the `SetIterator` object data.
    #[must_use]
    pub fn set_iterator(iterator: SetIterator) -> Self {
        Self::SetIterator(iterator)
    }

    /// Creates the `String` wrapper object data.
    #[must_use]
    pub fn string(string: JsString) -> Self {
        Self::String(string)
    }

    /// Creates the `StringIterator` object data.
    #[must_use]
    pub fn string_iterator(iterator: StringIterator) -> Self {
        Self::StringIterator(iterator)
    }

    /// Creates the `Symbol` wrapper object data.
    #[must_use]
    pub fn symbol(symbol: JsSymbol) -> Self {
        Self::Symbol(symbol)
    }

    /// Creates the `WeakMap` object data.
    #[must_use]
    pub fn weak_map(weak_map: NativeWeakMap) -> Self {
        Self::WeakMap(weak_map)
    }

    /// Creates the `WeakSet` object data.
    #[must_use]
    pub fn weak_set(weak_set: NativeWeakSet) -> Self {
        Self::WeakSet(weak_set)
    }

    /// The default `Object.prototype.toString` tag of this kind.
    pub(crate) fn type_tag(&self) -> &'static str {
        match self {
            Self::Array => "Array",
            Self::Function(_) => "Function",
            Self::Error(_) => "Error",
            Self::Boolean(_) => "Boolean",
            Self::Number(_) => "Number",
            Self::String(_) => "String",
            Self::Date(_) => "Date",
            Self::RegExp(_) => "RegExp",
            _ => "Object",
        }
    }
}

impl Object {
    /// Returns the shared reference to the property map.
    #[must_use]
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Returns the mutable reference to the property map.
    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    /// Inserts a property into the property table, without any of the
    /// validation of `[[DefineOwnProperty]]`.
    pub fn insert<K, P>(&mut self, key: K, property: P) -> Option<PropertyDescriptor>
    where
        K: Into<PropertyKey>,
        P: Into<PropertyDescriptor>,
    {
        self.properties.insert(&key.into(), property.into())
    }

    /// Removes a property from the property table.
    pub fn remove(&mut self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        self.properties.remove(key)
    }

    /// Returns the prototype of the object.
    #[must_use]
    pub fn prototype(&self) -> &JsPrototype {
        &self.prototype
    }

    /// Sets the prototype of the object without any checks.
    ///
    /// Returns `true` if the prototype was set, which is always the case for
    /// this raw accessor.
    pub fn set_prototype<P: Into<JsPrototype>>(&mut self, prototype: P) -> bool {
        self.prototype = prototype.into();
        true
    }

    /// Returns `true` if the object is extensible.
    #[must_use]
    pub fn extensible(&self) -> bool {
        self.extensible
    }

    pub(crate) fn set_extensible(&mut self, extensible: bool) {
        self.extensible = extensible;
    }

    /// Returns the kind payload of the object.
    #[must_use]
    pub fn kind(&self) -> &ObjectData {
        &self.data
    }

    /// Returns the mutable kind payload of the object.
    pub fn kind_mut(&mut self) -> &mut ObjectData {
        &mut self.data
    }

    /// Checks if the object is an array exotic object.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.data, ObjectData::Array)
    }

    /// Checks if the object is a function.
    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self.data, ObjectData::Function(_))
    }

    /// Gets the function data if the object is a callable.
    #[must_use]
    pub fn as_function(&self) -> Option<&Function> {
        match &self.data {
            ObjectData::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Gets the error kind if the object is an error object.
    #[must_use]
    pub fn as_error(&self) -> Option<ErrorKind> {
        match &self.data {
            ObjectData::Error(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Gets the bound string if the object is a `String` wrapper.
    #[must_use]
    pub fn as_string(&self) -> Option<JsString> {
        match &self.data {
            ObjectData::String(string) => Some(string.clone()),
            _ => None,
        }
    }

    /// Gets the bound number if the object is a `Number` wrapper.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match &self.data {
            ObjectData::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Gets the bound boolean if the object is a `Boolean` wrapper.
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match &self.data {
            ObjectData::Boolean(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// Gets the bound bigint if the object is a `BigInt` wrapper.
    #[must_use]
    pub fn as_big_int(&self) -> Option<&JsBigInt> {
        match &self.data {
            ObjectData::BigInt(bigint) => Some(bigint),
            _ => None,
        }
    }

    /// Gets the bound symbol if the object is a `Symbol` wrapper.
    #[must_use]
    pub fn as_symbol(&self) -> Option<JsSymbol> {
        match &self.data {
            ObjectData::Symbol(symbol) => Some(symbol.clone()),
            _ => None,
        }
    }

    /// Gets the map if the object is a `Map`.
    #[must_use]
    pub fn as_map(&self) -> Option<&OrderedMap<JsValue>> {
        match &self.data {
            ObjectData::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Gets the mutable map if the object is a `Map`.
    pub fn as_map_mut(&mut self) -> Option<&mut OrderedMap<JsValue>> {
        match &mut self.data {
            ObjectData::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Gets the set if the object is a `Set`.
    #[must_use]
    pub fn as_set(&self) -> Option<&OrderedSet> {
        match &self.data {
            ObjectData::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Gets the mutable set if the object is a `Set`.
    pub fn as_set_mut(&mut self) -> Option<&mut OrderedSet> {
        match &mut self.data {
            ObjectData::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Gets the weak map if the object is a `WeakMap`.
    pub fn as_weak_map_mut(&mut self) -> Option<&mut NativeWeakMap> {
        match &mut self.data {
            ObjectData::WeakMap(map) => Some(map),
            _ => None,
        }
    }

    /// Gets the weak set if the object is a `WeakSet`.
    pub fn as_weak_set_mut(&mut self) -> Option<&mut NativeWeakSet> {
        match &mut self.data {
            ObjectData::WeakSet(set) => Some(set),
            _ => None,
        }
    }

    /// Gets the regexp data if the object is a `RegExp`.
    #[must_use]
    pub fn as_regexp(&self) -> Option<&RegExp> {
        match &self.data {
            ObjectData::RegExp(regexp) => Some(regexp),
            _ => None,
        }
    }

    /// Gets the date data if the object is a `Date`.
    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        match &self.data {
            ObjectData::Date(date) => Some(date),
            _ => None,
        }
    }

    /// Gets the mutable date data if the object is a `Date`.
    pub fn as_date_mut(&mut self) -> Option<&mut Date> {
        match &mut self.data {
            ObjectData::Date(date) => Some(date),
            _ => None,
        }
    }

    /// Gets the buffer data if the object is an `ArrayBuffer`.
    #[must_use]
    pub fn as_array_buffer(&self) -> Option<&ArrayBuffer> {
        match &self.data {
            ObjectData::ArrayBuffer(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Gets the mutable buffer data if the object is an `ArrayBuffer`.
    pub fn as_array_buffer_mut(&mut self) -> Option<&mut ArrayBuffer> {
        match &mut self.data {
            ObjectData::ArrayBuffer(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Gets the data view if the object is a `DataView`.
    #[must_use]
    pub fn as_data_view(&self) -> Option<&DataView> {
        match &self.data {
            ObjectData::DataView(data_view) => Some(data_view),
            _ => None,
        }
    }

    /// Gets the typed array data if the object is a typed array.
    #[must_use]
    pub fn as_integer_indexed(&self) -> Option<&IntegerIndexed> {
        match &self.data {
            ObjectData::IntegerIndexed(integer_indexed) => Some(integer_indexed),
            _ => None,
        }
    }

    /// Gets the mutable typed array data if the object is a typed array.
    pub fn as_integer_indexed_mut(&mut self) -> Option<&mut IntegerIndexed> {
        match &mut self.data {
            ObjectData::IntegerIndexed(integer_indexed) => Some(integer_indexed),
            _ => None,
        }
    }

    /// Gets the proxy data if the object is a `Proxy`.
    #[must_use]
    pub fn as_proxy(&self) -> Option<&Proxy> {
        match &self.data {
            ObjectData::Proxy(proxy) => Some(proxy),
            _ => None,
        }
    }

    /// Gets the mutable proxy data if the object is a `Proxy`.
    pub fn as_proxy_mut(&mut self) -> Option<&mut Proxy> {
        match &mut self.data {
            ObjectData::Proxy(proxy) => Some(proxy),
            _ => None,
        }
    }

    /// Gets the module namespace data if the object is a module namespace.
    #[must_use]
    pub fn as_module_namespace(&self) -> Option<&ModuleNamespace> {
        match &self.data {
            ObjectData::ModuleNamespace(namespace) => Some(namespace),
            _ => None,
        }
    }

    /// Gets the mutable array iterator state.
    pub fn as_array_iterator_mut(&mut self) -> Option<&mut ArrayIterator> {
        match &mut self.data {
            ObjectData::ArrayIterator(iterator) => Some(iterator),
            _ => None,
        }
    }

    /// Gets the mutable string iterator state.
    pub fn as_string_iterator_mut(&mut self) -> Option<&mut StringIterator> {
        match &mut self.data {
            ObjectData::StringIterator(iterator) => Some(iterator),
            _ => None,
        }
    }

    /// Gets the mutable map iterator state.
    pub fn as_map_iterator_mut(&mut self) -> Option<&mut MapIterator> {
        match &mut self.data {
            ObjectData::MapIterator(iterator) => Some(iterator),
            _ => None,
        }
    }

    /// Gets the mutable set iterator state.
    pub fn as_set_iterator_mut(&mut self) -> Option<&mut SetIterator> {
        match &mut self.data {
            ObjectData::SetIterator(iterator) => Some(iterator),
            _ => None,
        }
    }

    /// Gets the mutable regexp string iterator state.
    pub fn as_regexp_string_iterator_mut(&mut self) -> Option<&mut RegExpStringIterator> {
        match &mut self.data {
            ObjectData::RegExpStringIterator(iterator) => Some(iterator),
            _ => None,
        }
    }
}

/// The boxed representation behind a [`JsObject`] handle.
///
/// The identity lives outside the cell, so identity comparisons and hashing
/// never observe (or conflict with) an active borrow.
#[derive(Trace, Finalize)]
struct Inner {
    /// Process-unique identity of the object, never reused.
    id: u64,
    /// The mutable object state.
    object: GcCell<Object>,
}

/// Garbage collected `Object`.
#[derive(Clone, Trace, Finalize)]
pub struct JsObject {
    inner: Gc<Inner>,
}

impl JsObject {
    /// Creates a new `JsObject` from its inner object representation.
    #[must_use]
    pub fn from_object(object: Object) -> Self {
        let id = OBJECT_ID_COUNT.with(|count| {
            let id = count.get();
            count.set(id + 1);
            id
        });
        Self {
            inner: Gc::new(Inner {
                id,
                object: GcCell::new(object),
            }),
        }
    }

    /// Creates a new object with the provided prototype and object data.
    #[must_use]
    pub fn from_proto_and_data<P: Into<JsPrototype>>(prototype: P, data: ObjectData) -> Self {
        let mut object = Object::default();
        object.prototype = prototype.into();
        object.data = data;
        Self::from_object(object)
    }

    /// Creates a new ordinary object with a `null` prototype.
    #[must_use]
    pub fn with_null_proto() -> Self {
        Self::from_proto_and_data(None, ObjectData::ordinary())
    }

    /// Immutably borrows the inner object.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently mutably borrowed.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.inner.object.borrow()
    }

    /// Mutably borrows the inner object.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently borrowed.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.inner.object.borrow_mut()
    }

    /// Mutably borrows the inner object, returning an error if it is
    /// currently borrowed.
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, Object>, crate::gc::BorrowMutError> {
        self.inner.object.try_borrow_mut()
    }

    /// Checks if the two `JsObject`s refer to the same object.
    #[must_use]
    pub fn equals(lhs: &Self, rhs: &Self) -> bool {
        lhs.inner.id == rhs.inner.id
    }

    /// The process-unique identity of the object, used for value hashing and
    /// as the key of the weak collections so entries never root their keys.
    pub(crate) fn hash_key(&self) -> u64 {
        self.inner.id
    }

    /// Checks if the object is callable.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        match &self.borrow().data {
            ObjectData::Function(_) => true,
            ObjectData::Proxy(proxy) => proxy.is_callable(),
            _ => false,
        }
    }

    /// Checks if the object is a constructor.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        match &self.borrow().data {
            ObjectData::Function(function) => function.is_constructor(),
            ObjectData::Proxy(proxy) => proxy.is_constructor(),
            _ => false,
        }
    }

    /// Checks if the object is an array exotic object.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.borrow().is_array()
    }

    /// Returns the prototype of the object, without trap machinery.
    #[must_use]
    pub fn prototype(&self) -> JsPrototype {
        self.borrow().prototype.clone()
    }

    /// Sets the prototype of the object without any checks.
    pub fn set_prototype<P: Into<JsPrototype>>(&self, prototype: P) {
        self.borrow_mut().set_prototype(prototype);
    }

    /// Inserts a property into the property table, without any of the
    /// validation of `[[DefineOwnProperty]]`.
    pub fn insert_property<K, P>(&self, key: K, property: P) -> Option<PropertyDescriptor>
    where
        K: Into<PropertyKey>,
        P: Into<PropertyDescriptor>,
    {
        self.borrow_mut().insert(key, property)
    }
}

impl fmt::Debug for JsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsObject").field(&self.inner.id).finish()
    }
}

impl PartialEq for JsObject {
    fn eq(&self, other: &Self) -> bool {
        Self::equals(self, other)
    }
}

impl Eq for JsObject {}
