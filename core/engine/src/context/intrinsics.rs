//! Data structures that contain the intrinsic objects of a realm.

use crate::{
    gc::{Finalize, Trace},
    object::{JsObject, ObjectData},
};

/// The intrinsic objects of a realm: the standard constructors and the
/// standalone intrinsic objects.
#[derive(Debug, Default, Trace, Finalize)]
pub struct Intrinsics {
    /// The standard constructor/prototype pairs.
    pub(crate) constructors: StandardConstructors,
    /// Cached standalone intrinsics.
    pub(crate) objects: IntrinsicObjects,
}

impl Intrinsics {
    /// Gets the standard constructors.
    #[must_use]
    pub fn constructors(&self) -> &StandardConstructors {
        &self.constructors
    }

    /// Gets the standalone intrinsic objects.
    #[must_use]
    pub fn objects(&self) -> &IntrinsicObjects {
        &self.objects
    }
}

/// A pairing of a built-in constructor and its prototype.
///
/// Both objects are allocated blank before any built-in initializes, so
/// cross-references between intrinsics never dangle; the builders fill them
/// in during realm initialization.
#[derive(Debug, Clone, Trace, Finalize)]
pub struct StandardConstructor {
    constructor: JsObject,
    prototype: JsObject,
}

impl Default for StandardConstructor {
    fn default() -> Self {
        Self {
            constructor: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
            prototype: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
        }
    }
}

impl StandardConstructor {
    /// Returns the prototype of this constructor.
    #[must_use]
    pub fn prototype(&self) -> JsObject {
        self.prototype.clone()
    }

    /// Returns the constructor object.
    #[must_use]
    pub fn constructor(&self) -> JsObject {
        self.constructor.clone()
    }
}

/// The set of standard built-in constructors of a realm.
#[derive(Debug, Default, Trace, Finalize)]
pub struct StandardConstructors {
    object: StandardConstructor,
    function: StandardConstructor,
    array: StandardConstructor,
    string: StandardConstructor,
    number: StandardConstructor,
    boolean: StandardConstructor,
    bigint: StandardConstructor,
    symbol: StandardConstructor,
    error: StandardConstructor,
    type_error: StandardConstructor,
    range_error: StandardConstructor,
    syntax_error: StandardConstructor,
    reference_error: StandardConstructor,
    date: StandardConstructor,
    regexp: StandardConstructor,
    map: StandardConstructor,
    set: StandardConstructor,
    weak_map: StandardConstructor,
    weak_set: StandardConstructor,
    array_buffer: StandardConstructor,
    data_view: StandardConstructor,
    typed_array: StandardConstructor,
    typed_int8_array: StandardConstructor,
    typed_uint8_array: StandardConstructor,
    typed_uint8clamped_array: StandardConstructor,
    typed_int16_array: StandardConstructor,
    typed_uint16_array: StandardConstructor,
    typed_int32_array: StandardConstructor,
    typed_uint32_array: StandardConstructor,
    typed_float32_array: StandardConstructor,
    typed_float64_array: StandardConstructor,
    typed_bigint64_array: StandardConstructor,
    typed_biguint64_array: StandardConstructor,
    proxy: StandardConstructor,
}

macro_rules! standard_constructor_accessors {
    ( $( $name:ident ),* $(,)? ) => {
        $(
            /// Returns the
            #[doc = concat!("`", stringify!($name), "`")]
            /// constructor/prototype pair.
            #[must_use]
            pub fn $name(&self) -> &StandardConstructor {
                &self.$name
            }
        )*
    };
}

impl StandardConstructors {
    standard_constructor_accessors!(
        object,
        function,
        array,
        string,
        number,
        boolean,
        bigint,
        symbol,
        error,
        type_error,
        range_error,
        syntax_error,
        reference_error,
        date,
        regexp,
        map,
        set,
        weak_map,
        weak_set,
        array_buffer,
        data_view,
        typed_array,
        typed_int8_array,
        typed_uint8_array,
        typed_uint8clamped_array,
        typed_int16_array,
        typed_uint16_array,
        typed_int32_array,
        typed_uint32_array,
        typed_float32_array,
        typed_float64_array,
        typed_bigint64_array,
        typed_biguint64_array,
        proxy,
    );
}

/// Cached intrinsic objects that are not constructors.
#[derive(Debug, Default, Trace, Finalize)]
pub struct IntrinsicObjects {
    /// The `%IteratorPrototype%` family.
    pub(crate) iterator_prototypes: IteratorPrototypes,
}

impl IntrinsicObjects {
    /// Gets the iterator prototypes of the realm.
    #[must_use]
    pub fn iterator_prototypes(&self) -> &IteratorPrototypes {
        &self.iterator_prototypes
    }
}

/// The intrinsic prototypes of every iterator kind.
///
/// All of them inherit from `%IteratorPrototype%`, which owns the
/// self-returning `@@iterator` method.
#[derive(Debug, Trace, Finalize)]
pub struct IteratorPrototypes {
    iterator: JsObject,
    array_iterator: JsObject,
    string_iterator: JsObject,
    map_iterator: JsObject,
    set_iterator: JsObject,
    regexp_string_iterator: JsObject,
}

impl Default for IteratorPrototypes {
    fn default() -> Self {
        Self {
            iterator: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
            array_iterator: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
            string_iterator: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
            map_iterator: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
            set_iterator: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
            regexp_string_iterator: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
        }
    }
}

impl IteratorPrototypes {
    /// Gets the `%IteratorPrototype%` object.
    #[must_use]
    pub fn iterator(&self) -> JsObject {
        self.iterator.clone()
    }

    /// Gets the `%ArrayIteratorPrototype%` object.
    #[must_use]
    pub fn array_iterator(&self) -> JsObject {
        self.array_iterator.clone()
    }

    /// Gets the `%StringIteratorPrototype%` object.
    #[must_use]
    pub fn string_iterator(&self) -> JsObject {
        self.string_iterator.clone()
    }

    /// Gets the `%MapIteratorPrototype%` object.
    #[must_use]
    pub fn map_iterator(&self) -> JsObject {
        self.map_iterator.clone()
    }

    /// Gets the `%SetIteratorPrototype%` object.
    #[must_use]
    pub fn set_iterator(&self) -> JsObject {
        self.set_iterator.clone()
    }

    /// Gets the `%RegExpStringIteratorPrototype%` object.
    #[must_use]
    pub fn regexp_string_iterator(&self) -> JsObject {
        self.regexp_string_iterator.clone()
    }
}
