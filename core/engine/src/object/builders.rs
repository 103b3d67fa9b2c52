//! Builders for host functions, plain objects, and constructors.
//!
//! Every built-in uses these to wire its constructor, prototype methods, and
//! accessors during realm initialization.

use super::{JsObject, JsPrototype, ObjectData, CONSTRUCTOR, PROTOTYPE};
use crate::{
    builtins::function::{Function, NativeFunction},
    context::intrinsics::StandardConstructor,
    js_string,
    property::{Attribute, PropertyDescriptor, PropertyKey},
    Context, JsResult, JsString, JsValue,
};
use std::rc::Rc;

/// Builder for creating native function objects.
#[derive(Debug)]
pub struct FunctionBuilder<'ctx> {
    context: &'ctx mut Context,
    function: Function,
    name: JsString,
    length: usize,
}

impl<'ctx> FunctionBuilder<'ctx> {
    /// Creates a new builder with a native function pointer.
    pub fn native(context: &'ctx mut Context, function: NativeFunction) -> Self {
        Self {
            context,
            function: Function::Native {
                function,
                constructor: false,
            },
            name: js_string!(),
            length: 0,
        }
    }

    /// Creates a new builder with a closure and a captured value.
    ///
    /// The captured value is traced by the collector, so closures may safely
    /// capture objects.
    pub fn closure_with_captures<F>(
        context: &'ctx mut Context,
        closure: F,
        captures: JsValue,
    ) -> Self
    where
        F: Fn(&JsValue, &[JsValue], &JsValue, &mut Context) -> JsResult<JsValue> + 'static,
    {
        Self {
            context,
            function: Function::Closure {
                function: Rc::new(closure),
                constructor: false,
                captures,
            },
            name: js_string!(),
            length: 0,
        }
    }

    /// Specifies the name property of the function object.
    #[must_use]
    pub fn name<N: Into<JsString>>(mut self, name: N) -> Self {
        self.name = name.into();
        self
    }

    /// Specifies the length property of the function object.
    #[must_use]
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Specifies whether the function can be invoked with `new`.
    #[must_use]
    pub fn constructor(mut self, yes: bool) -> Self {
        match &mut self.function {
            Function::Native { constructor, .. } | Function::Closure { constructor, .. } => {
                *constructor = yes;
            }
            Function::Bound { .. } => unreachable!("builders never create bound functions"),
        }
        self
    }

    /// Builds the function object.
    #[must_use]
    pub fn build(self) -> JsObject {
        let function = JsObject::from_proto_and_data(
            self.context
                .intrinsics()
                .constructors()
                .function()
                .prototype(),
            ObjectData::function(self.function),
        );
        let property = PropertyDescriptor::builder()
            .writable(false)
            .enumerable(false)
            .configurable(true);
        function.insert_property("length", property.clone().value(self.length));
        function.insert_property("name", property.value(self.name));
        function
    }
}

/// Builder for creating plain objects with properties and methods.
#[derive(Debug)]
pub struct ObjectInitializer<'ctx> {
    context: &'ctx mut Context,
    object: JsObject,
}

impl<'ctx> ObjectInitializer<'ctx> {
    /// Creates a new builder over an empty ordinary object.
    pub fn new(context: &'ctx mut Context) -> Self {
        let object = JsObject::from_proto_and_data(
            context.intrinsics().constructors().object().prototype(),
            ObjectData::ordinary(),
        );
        Self { context, object }
    }

    /// Adds a function to the object.
    pub fn function<K>(&mut self, function: NativeFunction, key: K, length: usize) -> &mut Self
    where
        K: Into<PropertyKey>,
    {
        let key = key.into();
        let name = match &key {
            PropertyKey::String(string) => string.clone(),
            PropertyKey::Symbol(symbol) => symbol
                .description()
                .map_or_else(|| js_string!(), |desc| js_string!(js_string!("["), desc, js_string!("]"))),
            PropertyKey::Index(index) => js_string!(index.to_string()),
        };
        let function = FunctionBuilder::native(self.context, function)
            .name(name)
            .length(length)
            .build();

        self.object.insert_property(
            key,
            PropertyDescriptor::builder()
                .value(function)
                .writable(true)
                .enumerable(false)
                .configurable(true),
        );
        self
    }

    /// Adds a data property to the object.
    pub fn property<K, V>(&mut self, key: K, value: V, attribute: Attribute) -> &mut Self
    where
        K: Into<PropertyKey>,
        V: Into<JsValue>,
    {
        self.object.insert_property(
            key,
            PropertyDescriptor::builder()
                .value(value)
                .writable(attribute.writable())
                .enumerable(attribute.enumerable())
                .configurable(attribute.configurable()),
        );
        self
    }

    /// Builds the object.
    #[must_use]
    pub fn build(&mut self) -> JsObject {
        self.object.clone()
    }

    /// The inner context of the builder.
    pub fn context(&mut self) -> &mut Context {
        self.context
    }
}

/// Builder for creating constructors with prototypes, like `Array`.
#[derive(Debug)]
pub struct ConstructorBuilder<'ctx> {
    context: &'ctx mut Context,
    function: NativeFunction,
    object: JsObject,
    prototype: JsObject,
    name: JsString,
    length: usize,
    inherit: Option<JsPrototype>,
    custom_prototype: Option<JsObject>,
    has_prototype_property: bool,
}

impl<'ctx> ConstructorBuilder<'ctx> {
    /// Creates a new builder with a fresh constructor/prototype pair.
    pub fn new(context: &'ctx mut Context, function: NativeFunction) -> Self {
        Self {
            context,
            function,
            object: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
            prototype: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
            name: js_string!(),
            length: 0,
            inherit: None,
            custom_prototype: None,
            has_prototype_property: true,
        }
    }

    /// Creates a new builder over the pre-allocated objects of a standard
    /// constructor, so intrinsics referencing the pair before its
    /// initialization stay valid.
    pub fn with_standard_constructor(
        context: &'ctx mut Context,
        function: NativeFunction,
        standard_constructor: StandardConstructor,
    ) -> Self {
        Self {
            context,
            function,
            object: standard_constructor.constructor(),
            prototype: standard_constructor.prototype(),
            name: js_string!(),
            length: 0,
            inherit: None,
            custom_prototype: None,
            has_prototype_property: true,
        }
    }

    /// Specifies the name of the constructor function.
    #[must_use]
    pub fn name<N: Into<JsString>>(mut self, name: N) -> Self {
        self.name = name.into();
        self
    }

    /// Specifies the parameter count of the constructor function.
    #[must_use]
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Adds a method to the prototype of the constructor.
    pub fn method<K>(&mut self, function: NativeFunction, key: K, length: usize) -> &mut Self
    where
        K: Into<PropertyKey>,
    {
        Self::install_method(self.context, &self.prototype, function, key.into(), length);
        self
    }

    /// Adds a static method to the constructor itself.
    pub fn static_method<K>(&mut self, function: NativeFunction, key: K, length: usize) -> &mut Self
    where
        K: Into<PropertyKey>,
    {
        Self::install_method(self.context, &self.object, function, key.into(), length);
        self
    }

    fn install_method(
        context: &mut Context,
        target: &JsObject,
        function: NativeFunction,
        key: PropertyKey,
        length: usize,
    ) {
        let name = match &key {
            PropertyKey::String(string) => string.clone(),
            PropertyKey::Symbol(symbol) => symbol
                .description()
                .map_or_else(|| js_string!(), |desc| js_string!(js_string!("["), desc, js_string!("]"))),
            PropertyKey::Index(index) => js_string!(index.to_string()),
        };
        let function = FunctionBuilder::native(context, function)
            .name(name)
            .length(length)
            .build();
        target.insert_property(
            key,
            PropertyDescriptor::builder()
                .value(function)
                .writable(true)
                .enumerable(false)
                .configurable(true),
        );
    }

    /// Adds a data property to the prototype of the constructor.
    pub fn property<K, V>(&mut self, key: K, value: V, attribute: Attribute) -> &mut Self
    where
        K: Into<PropertyKey>,
        V: Into<JsValue>,
    {
        self.prototype.insert_property(
            key,
            PropertyDescriptor::builder()
                .value(value)
                .writable(attribute.writable())
                .enumerable(attribute.enumerable())
                .configurable(attribute.configurable()),
        );
        self
    }

    /// Adds a static data property to the constructor itself.
    pub fn static_property<K, V>(&mut self, key: K, value: V, attribute: Attribute) -> &mut Self
    where
        K: Into<PropertyKey>,
        V: Into<JsValue>,
    {
        self.object.insert_property(
            key,
            PropertyDescriptor::builder()
                .value(value)
                .writable(attribute.writable())
                .enumerable(attribute.enumerable())
                .configurable(attribute.configurable()),
        );
        self
    }

    /// Adds an accessor property to the prototype of the constructor.
    pub fn accessor<K>(
        &mut self,
        key: K,
        get: Option<JsObject>,
        set: Option<JsObject>,
        attribute: Attribute,
    ) -> &mut Self
    where
        K: Into<PropertyKey>,
    {
        self.prototype.insert_property(
            key,
            PropertyDescriptor::builder()
                .maybe_get(get.map(JsValue::from))
                .maybe_set(set.map(JsValue::from))
                .enumerable(attribute.enumerable())
                .configurable(attribute.configurable())
                .complete_with_accessor_defaults(),
        );
        self
    }

    /// Adds a static accessor property to the constructor itself.
    pub fn static_accessor<K>(
        &mut self,
        key: K,
        get: Option<JsObject>,
        set: Option<JsObject>,
        attribute: Attribute,
    ) -> &mut Self
    where
        K: Into<PropertyKey>,
    {
        self.object.insert_property(
            key,
            PropertyDescriptor::builder()
                .maybe_get(get.map(JsValue::from))
                .maybe_set(set.map(JsValue::from))
                .enumerable(attribute.enumerable())
                .configurable(attribute.configurable())
                .complete_with_accessor_defaults(),
        );
        self
    }

    /// Specifies the prototype that instances inherit from; defaults to
    /// `Object.prototype`.
    #[must_use]
    pub fn inherit<P: Into<JsPrototype>>(mut self, prototype: P) -> Self {
        self.inherit = Some(prototype.into());
        self
    }

    /// Specifies the `[[Prototype]]` of the constructor function itself;
    /// defaults to `Function.prototype`.
    #[must_use]
    pub fn custom_prototype(mut self, prototype: JsObject) -> Self {
        self.custom_prototype = Some(prototype);
        self
    }

    /// Specifies whether the constructor exposes a `prototype` property.
    #[must_use]
    pub fn has_prototype_property(mut self, yes: bool) -> Self {
        self.has_prototype_property = yes;
        self
    }

    /// The inner context of the builder.
    pub fn context(&mut self) -> &mut Context {
        self.context
    }

    /// Builds the constructor, wiring the `prototype`/`constructor` pair.
    #[must_use]
    pub fn build(&mut self) -> JsObject {
        {
            let mut constructor = self.object.borrow_mut();
            constructor.data = ObjectData::function(Function::Native {
                function: self.function,
                constructor: true,
            });

            let property = PropertyDescriptor::builder()
                .writable(false)
                .enumerable(false)
                .configurable(true);
            constructor.insert("length", property.clone().value(self.length));
            constructor.insert("name", property.value(self.name.clone()));

            constructor.set_prototype(self.custom_prototype.clone().unwrap_or_else(|| {
                self.context
                    .intrinsics()
                    .constructors()
                    .function()
                    .prototype()
            }));

            if self.has_prototype_property {
                constructor.insert(
                    PROTOTYPE,
                    PropertyDescriptor::builder()
                        .value(self.prototype.clone())
                        .writable(false)
                        .enumerable(false)
                        .configurable(false),
                );
            }
        }

        {
            let mut prototype = self.prototype.borrow_mut();
            prototype.insert(
                CONSTRUCTOR,
                PropertyDescriptor::builder()
                    .value(self.object.clone())
                    .writable(true)
                    .enumerable(false)
                    .configurable(true),
            );
            prototype.set_prototype(self.inherit.clone().unwrap_or_else(|| {
                Some(
                    self.context
                        .intrinsics()
                        .constructors()
                        .object()
                        .prototype(),
                )
            }));
        }

        self.object.clone()
    }
}
