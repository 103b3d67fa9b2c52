//! The ECMAScript standard library: built-in objects, e.g. Object, String,
//! Math, Array, etc.

pub mod array;
pub mod array_buffer;
pub mod bigint;
pub mod boolean;
pub mod dataview;
pub mod date;
pub mod error;
pub mod function;
pub mod iterable;
pub mod json;
pub mod map;
pub mod math;
pub mod module_namespace;
pub mod number;
pub mod object;
pub mod proxy;
pub mod regexp;
pub mod set;
pub mod string;
pub mod symbol;
pub mod typed_array;
pub mod weak_map;
pub mod weak_set;

pub(crate) use self::{
    array::Array,
    array_buffer::ArrayBuffer,
    bigint::BigInt,
    boolean::Boolean,
    dataview::DataView,
    date::Date,
    error::{Error, RangeError, ReferenceError, SyntaxError, TypeError},
    function::BuiltInFunctionObject,
    json::Json,
    map::Map,
    math::Math,
    number::{IsFinite, IsNaN, Number, ParseFloat, ParseInt},
    object::Object as BuiltInObjectObject,
    proxy::Proxy,
    regexp::RegExp,
    set::Set,
    string::String,
    symbol::Symbol,
    typed_array::{
        BigInt64Array, BigUint64Array, Float32Array, Float64Array, Int16Array, Int32Array,
        Int8Array, TypedArray, Uint16Array, Uint32Array, Uint8Array, Uint8ClampedArray,
    },
    weak_map::WeakMap,
    weak_set::WeakSet,
};

use crate::{
    property::{Attribute, PropertyDescriptor},
    Context, JsValue,
};

/// Trait representing a global built-in object, such as `Array`.
///
/// `init` wires the built-in's constructor, prototype, methods, and statics
/// into the realm's pre-allocated intrinsic objects, and returns the value
/// to bind on the global object under [`BuiltIn::NAME`].
pub(crate) trait BuiltIn {
    /// Binding name of the built-in inside the global object.
    const NAME: &'static str;

    /// Property attributes of the global binding.
    fn attribute() -> Attribute {
        Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE
    }

    /// Initializes the built-in, returning the global binding value.
    fn init(context: &mut Context) -> Option<JsValue>;
}

fn init_builtin<B: BuiltIn>(context: &mut Context) {
    if let Some(value) = B::init(context) {
        let global = context.global_object();
        global.insert_property(
            B::NAME,
            PropertyDescriptor::builder()
                .value(value)
                .writable(B::attribute().writable())
                .enumerable(B::attribute().enumerable())
                .configurable(B::attribute().configurable()),
        );
    }
}

/// Abstract operation `CreateIntrinsics ( realmRec )` followed by
/// `SetDefaultGlobalBindings ( realmRec )`.
///
/// The boot order matters only up to the invariants the pre-allocated
/// intrinsics cannot provide by themselves: `Function.prototype` and
/// `Object.prototype` are wired first so every later function object and
/// prototype chain lands on the finished objects.
pub(crate) fn init(context: &mut Context) {
    // The global object inherits from `Object.prototype`.
    let object_prototype = context.intrinsics().constructors().object().prototype();
    context.global_object().set_prototype(object_prototype);

    init_builtin::<BuiltInFunctionObject>(context);
    init_builtin::<BuiltInObjectObject>(context);

    iterable::init(context);

    init_builtin::<Array>(context);
    init_builtin::<String>(context);
    init_builtin::<Number>(context);
    init_builtin::<Boolean>(context);
    init_builtin::<BigInt>(context);
    init_builtin::<Symbol>(context);
    init_builtin::<Error>(context);
    init_builtin::<TypeError>(context);
    init_builtin::<RangeError>(context);
    init_builtin::<SyntaxError>(context);
    init_builtin::<ReferenceError>(context);
    init_builtin::<Math>(context);
    init_builtin::<Json>(context);
    init_builtin::<Map>(context);
    init_builtin::<Set>(context);
    init_builtin::<WeakMap>(context);
    init_builtin::<WeakSet>(context);
    init_builtin::<ArrayBuffer>(context);
    init_builtin::<DataView>(context);
    init_builtin::<TypedArray>(context);
    init_builtin::<Int8Array>(context);
    init_builtin::<Uint8Array>(context);
    init_builtin::<Uint8ClampedArray>(context);
    init_builtin::<Int16Array>(context);
    init_builtin::<Uint16Array>(context);
    init_builtin::<Int32Array>(context);
    init_builtin::<Uint32Array>(context);
    init_builtin::<Float32Array>(context);
    init_builtin::<Float64Array>(context);
    init_builtin::<BigInt64Array>(context);
    init_builtin::<BigUint64Array>(context);
    init_builtin::<RegExp>(context);
    init_builtin::<Date>(context);
    init_builtin::<Proxy>(context);
    init_builtin::<IsFinite>(context);
    init_builtin::<IsNaN>(context);
    init_builtin::<ParseInt>(context);
    init_builtin::<ParseFloat>(context);

    global_constants(context);
}

/// Installs `globalThis`, `undefined`, `NaN`, and `Infinity`.
fn global_constants(context: &mut Context) {
    let global = context.global_object();

    global.insert_property(
        "globalThis",
        PropertyDescriptor::builder()
            .value(global.clone())
            .writable(true)
            .enumerable(false)
            .configurable(true),
    );

    let restricted = PropertyDescriptor::builder()
        .writable(false)
        .enumerable(false)
        .configurable(false);
    global.insert_property("Infinity", restricted.clone().value(f64::INFINITY));
    global.insert_property("NaN", restricted.clone().value(f64::NAN));
    global.insert_property("undefined", restricted.value(JsValue::undefined()));
}
