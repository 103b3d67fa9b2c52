//! The global `Symbol` object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-symbol-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Symbol

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    error::JsNativeError,
    js_string,
    object::{ConstructorBuilder, FunctionBuilder},
    property::Attribute,
    symbol::WellKnownSymbols,
    value::JsArgs,
    Context, JsResult, JsSymbol, JsValue,
};

/// JavaScript `Symbol` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Symbol;

impl BuiltIn for Symbol {
    const NAME: &'static str = "Symbol";

    fn init(context: &mut Context) -> Option<JsValue> {
        let symbol_attr = Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::PERMANENT;

        let get_description = FunctionBuilder::native(context, Self::get_description)
            .name("get description")
            .build();

        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().symbol().clone(),
        )
        .name(Self::NAME)
        .length(0)
        .static_property("asyncIterator", WellKnownSymbols::async_iterator(), symbol_attr)
        .static_property("hasInstance", WellKnownSymbols::has_instance(), symbol_attr)
        .static_property(
            "isConcatSpreadable",
            WellKnownSymbols::is_concat_spreadable(),
            symbol_attr,
        )
        .static_property("iterator", WellKnownSymbols::iterator(), symbol_attr)
        .static_property("match", WellKnownSymbols::r#match(), symbol_attr)
        .static_property("matchAll", WellKnownSymbols::match_all(), symbol_attr)
        .static_property("replace", WellKnownSymbols::replace(), symbol_attr)
        .static_property("search", WellKnownSymbols::search(), symbol_attr)
        .static_property("species", WellKnownSymbols::species(), symbol_attr)
        .static_property("split", WellKnownSymbols::split(), symbol_attr)
        .static_property("toPrimitive", WellKnownSymbols::to_primitive(), symbol_attr)
        .static_property("toStringTag", WellKnownSymbols::to_string_tag(), symbol_attr)
        .static_property("unscopables", WellKnownSymbols::unscopables(), symbol_attr)
        .static_method(Self::r#for, "for", 1)
        .static_method(Self::key_for, "keyFor", 1)
        .method(Self::to_string, "toString", 0)
        .method(Self::value_of, "valueOf", 0)
        .accessor(
            "description",
            Some(get_description),
            None,
            Attribute::CONFIGURABLE | Attribute::NON_ENUMERABLE,
        )
        .method(
            Self::to_primitive,
            WellKnownSymbols::to_primitive(),
            1,
        )
        .property(
            WellKnownSymbols::to_string_tag(),
            js_string!(Self::NAME),
            Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .build();

        Some(object.into())
    }
}

impl Symbol {
    /// `Symbol ( [ description ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-symbol-description
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is not undefined, throw a TypeError exception.
        if !new_target.is_undefined() {
            return Err(JsNativeError::typ()
                .with_message("Symbol is not a constructor")
                .into());
        }

        // 2-3. Resolve the description.
        let description = match args.get_or_undefined(0) {
            JsValue::Undefined => None,
            value => Some(value.to_string(context)?),
        };

        // 4. Return a new unique Symbol value whose [[Description]] value is descString.
        Ok(JsSymbol::new(description).into())
    }

    /// Gets the symbol of a `this` that is either a symbol primitive or a
    /// `Symbol` wrapper object.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-thissymbolvalue
    fn this_symbol_value(this: &JsValue) -> JsResult<JsSymbol> {
        match this {
            JsValue::Symbol(symbol) => Ok(symbol.clone()),
            JsValue::Object(obj) => obj.borrow().as_symbol().ok_or_else(|| {
                JsNativeError::typ()
                    .with_message("'this' is not a Symbol")
                    .into()
            }),
            _ => Err(JsNativeError::typ()
                .with_message("'this' is not a Symbol")
                .into()),
        }
    }

    /// `Symbol.for ( key )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-symbol.for
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Symbol/for
    fn r#for(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let stringKey be ? ToString(key).
        let string_key = args.get_or_undefined(0).to_string(context)?;
        // 2-6. Return the registered symbol, creating it when absent.
        Ok(context.get_or_intern_symbol(&string_key).into())
    }

    /// `Symbol.keyFor ( sym )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-symbol.keyfor
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Symbol/keyFor
    fn key_for(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. If Type(sym) is not Symbol, throw a TypeError exception.
        let Some(symbol) = args.get_or_undefined(0).as_symbol() else {
            return Err(JsNativeError::typ()
                .with_message("Symbol.keyFor requires a symbol argument")
                .into());
        };

        // 2-4. Find the registry entry, or return undefined.
        Ok(context
            .symbol_registry_key(symbol)
            .map_or(JsValue::undefined(), JsValue::from))
    }

    /// `Symbol.prototype.toString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-symbol.prototype.tostring
    fn to_string(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Let sym be ? thisSymbolValue(this value).
        // 2. Return SymbolDescriptiveString(sym).
        Ok(Self::this_symbol_value(this)?.descriptive_string().into())
    }

    /// `Symbol.prototype.valueOf ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-symbol.prototype.valueof
    fn value_of(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return ? thisSymbolValue(this value).
        Ok(Self::this_symbol_value(this)?.into())
    }

    /// `get Symbol.prototype.description`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-symbol.prototype.description
    fn get_description(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1-3. Return sym.[[Description]].
        Ok(Self::this_symbol_value(this)?
            .description()
            .map_or(JsValue::undefined(), JsValue::from))
    }

    /// `Symbol.prototype [ @@toPrimitive ] ( hint )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-symbol.prototype-@@toprimitive
    fn to_primitive(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return ? thisSymbolValue(this value).
        Ok(Self::this_symbol_value(this)?.into())
    }
}
