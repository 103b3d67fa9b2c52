//! The global `JSON` object.
//!
//! `JSON.parse` delegates source-text parsing to `serde_json` (with ordered
//! maps, so property insertion order matches the input), then lowers the
//! parsed document into language values and runs the reviver walk.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-json-object
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/JSON

#[cfg(test)]
mod tests;

use crate::{
    builtins::{Array, BuiltIn},
    error::JsNativeError,
    js_string,
    object::{JsObject, ObjectData, ObjectInitializer},
    property::{Attribute, PropertyKey, PropertyNameKind},
    symbol::WellKnownSymbols,
    value::{IntegerOrInfinity, JsArgs},
    Context, JsResult, JsString, JsValue,
};

/// JavaScript `JSON` global object.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Json;

impl BuiltIn for Json {
    const NAME: &'static str = "JSON";

    fn init(context: &mut Context) -> Option<JsValue> {
        let object = ObjectInitializer::new(context)
            .function(Self::parse, "parse", 2)
            .function(Self::stringify, "stringify", 3)
            .property(
                WellKnownSymbols::to_string_tag(),
                js_string!(Self::NAME),
                Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
            )
            .build();

        Some(object.into())
    }
}

impl Json {
    /// `JSON.parse ( text [ , reviver ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-json.parse
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/JSON/parse
    pub(crate) fn parse(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let jsonString be ? ToString(text).
        let json_string = args
            .get_or_undefined(0)
            .to_string(context)?
            .to_std_string_escaped();

        // 2. Parse jsonString as a JSON text; throw a SyntaxError if it is
        //    not valid.
        let json: serde_json::Value = serde_json::from_str(&json_string).map_err(|e| {
            JsNativeError::syntax().with_message(format!("JSON.parse: {e}"))
        })?;

        // 3-9. Lower the document into a language value.
        let unfiltered = Self::json_to_value(&json, context);

        // 10. If IsCallable(reviver) is true, then
        if let Some(reviver) = args.get_or_undefined(1).as_callable().cloned() {
            // a. Let root be OrdinaryObjectCreate(%Object.prototype%).
            let root = JsObject::from_proto_and_data(
                context.intrinsics().constructors().object().prototype(),
                ObjectData::ordinary(),
            );
            // b-c. Perform ! CreateDataPropertyOrThrow(root, "", unfiltered).
            root.create_data_property_or_throw("", unfiltered, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
            // d. Return ? InternalizeJSONProperty(root, "", reviver).
            return Self::internalize_json_property(&root, "".into(), &reviver, context);
        }

        // 11. Else, return unfiltered.
        Ok(unfiltered)
    }

    /// Lowers a parsed JSON document into a language value.
    fn json_to_value(json: &serde_json::Value, context: &mut Context) -> JsValue {
        match json {
            serde_json::Value::Null => JsValue::null(),
            serde_json::Value::Bool(b) => (*b).into(),
            serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN).into(),
            serde_json::Value::String(s) => js_string!(s.as_str()).into(),
            serde_json::Value::Array(elements) => {
                let values: Vec<JsValue> = elements
                    .iter()
                    .map(|element| Self::json_to_value(element, context))
                    .collect();
                Array::create_array_from_list(values, context).into()
            }
            serde_json::Value::Object(entries) => {
                let object = JsObject::from_proto_and_data(
                    context.intrinsics().constructors().object().prototype(),
                    ObjectData::ordinary(),
                );
                for (key, value) in entries {
                    let value = Self::json_to_value(value, context);
                    object
                        .create_data_property_or_throw(key.as_str(), value, context)
                        .expect("this CreateDataPropertyOrThrow call must not fail");
                }
                object.into()
            }
        }
    }

    /// Abstract operation `InternalizeJSONProperty ( holder, name, reviver )`.
    ///
    /// A reviver returning `undefined` deletes the property.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-internalizejsonproperty
    fn internalize_json_property(
        holder: &JsObject,
        name: PropertyKey,
        reviver: &JsObject,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let val be ? Get(holder, name).
        let val = holder.get(name.clone(), context)?;

        // 2. If Type(val) is Object, then
        if let Some(obj) = val.as_object() {
            // a. Let isArray be ? IsArray(val).
            if obj.is_array_abstract()? {
                // b. If isArray is true, then
                // i. Let len be ? LengthOfArrayLike(val).
                let len = obj.length_of_array_like(context)?;
                // ii-iii. Walk the elements.
                for i in 0..len {
                    let new_element = Self::internalize_json_property(
                        obj,
                        PropertyKey::from(i),
                        reviver,
                        context,
                    )?;
                    if new_element.is_undefined() {
                        obj.__delete__(&PropertyKey::from(i), context)?;
                    } else {
                        obj.create_data_property(i, new_element, context)?;
                    }
                }
            } else {
                // c. Else,
                // i. Let keys be ? EnumerableOwnPropertyNames(val, key).
                let keys = crate::builtins::object::enumerable_own_property_names(
                    obj,
                    PropertyNameKind::Key,
                    context,
                )?;
                // ii. Walk the entries.
                for p in keys {
                    let key = p.to_property_key(context)?;
                    let new_element =
                        Self::internalize_json_property(obj, key.clone(), reviver, context)?;
                    if new_element.is_undefined() {
                        obj.__delete__(&key, context)?;
                    } else {
                        obj.create_data_property(key, new_element, context)?;
                    }
                }
            }
        }

        // 3. Return ? Call(reviver, holder, « name, val »).
        reviver.call(&holder.clone().into(), &[(&name).into(), val], context)
    }

    /// `JSON.stringify ( value [ , replacer [ , space ] ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-json.stringify
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/JSON/stringify
    pub(crate) fn stringify(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let value = args.get_or_undefined(0);
        let replacer = args.get_or_undefined(1);
        let space = args.get_or_undefined(2);

        // 3-4. Resolve the replacer.
        let mut replacer_function = None;
        let mut property_list: Option<Vec<JsString>> = None;
        if let Some(replacer_obj) = replacer.as_object() {
            if replacer_obj.is_callable() {
                replacer_function = Some(replacer_obj.clone());
            } else if replacer_obj.is_array_abstract()? {
                // b. The replacer array yields the property list.
                let mut list = Vec::new();
                let len = replacer_obj.length_of_array_like(context)?;
                for k in 0..len {
                    let v = replacer_obj.get(k, context)?;
                    let item = match &v {
                        JsValue::String(s) => Some(s.clone()),
                        JsValue::Number(n) => Some(crate::builtins::Number::to_js_string(*n)),
                        JsValue::Object(obj) => {
                            let obj = obj.borrow();
                            if obj.as_string().is_some() || obj.as_number().is_some() {
                                drop(obj);
                                Some(v.to_string(context)?)
                            } else {
                                None
                            }
                        }
                        _ => None,
                    };
                    if let Some(item) = item {
                        if !list.contains(&item) {
                            list.push(item);
                        }
                    }
                }
                property_list = Some(list);
            }
        }

        // 5-6. Unwrap a Number or String wrapper space.
        let space = if let Some(space_obj) = space.as_object() {
            let is_number = space_obj.borrow().as_number().is_some();
            let as_string = space_obj.borrow().as_string();
            if is_number {
                JsValue::from(space.to_number(context)?)
            } else if let Some(string) = as_string {
                JsValue::from(string)
            } else {
                space.clone()
            }
        } else {
            space.clone()
        };

        // 7-9. Resolve the gap.
        let gap = if let Some(number) = space.as_number() {
            let count = IntegerOrInfinity::from(number).clamp_finite(0, 10) as usize;
            " ".repeat(count)
        } else if let Some(string) = space.as_string() {
            string
                .substring(0, 10.min(string.len()))
                .to_std_string_escaped()
        } else {
            std::string::String::new()
        };

        // 10. Let wrapper be OrdinaryObjectCreate(%Object.prototype%).
        let wrapper = JsObject::from_proto_and_data(
            context.intrinsics().constructors().object().prototype(),
            ObjectData::ordinary(),
        );
        // 11. Perform ! CreateDataPropertyOrThrow(wrapper, "", value).
        wrapper
            .create_data_property_or_throw("", value.clone(), context)
            .expect("this CreateDataPropertyOrThrow call must not fail");

        // 12. Return ? SerializeJSONProperty(state, "", wrapper).
        let mut state = StringifyState {
            replacer_function,
            property_list,
            gap,
            indent: std::string::String::new(),
            stack: Vec::new(),
        };
        match state.serialize_json_property("".into(), &wrapper, context)? {
            Some(string) => Ok(js_string!(string).into()),
            None => Ok(JsValue::undefined()),
        }
    }
}

/// The serialization state of one `JSON.stringify` invocation.
struct StringifyState {
    replacer_function: Option<JsObject>,
    property_list: Option<Vec<JsString>>,
    gap: std::string::String,
    indent: std::string::String,
    stack: Vec<JsObject>,
}

impl StringifyState {
    /// Abstract operation `SerializeJSONProperty ( state, key, holder )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-serializejsonproperty
    fn serialize_json_property(
        &mut self,
        key: PropertyKey,
        holder: &JsObject,
        context: &mut Context,
    ) -> JsResult<Option<std::string::String>> {
        // 1. Let value be ? Get(holder, key).
        let mut value = holder.get(key.clone(), context)?;

        // 2. If Type(value) is Object or BigInt, then
        if value.is_object() || value.is_bigint() {
            // a. Let toJSON be ? GetV(value, "toJSON").
            let to_json = value.get_v("toJSON", context)?;
            // b. If IsCallable(toJSON) is true, then
            if let Some(to_json) = to_json.as_callable() {
                // i. Set value to ? Call(toJSON, value, « key »).
                value = to_json.call(&value, &[(&key).into()], context)?;
            }
        }

        // 3. If state.[[ReplacerFunction]] is not undefined, then
        if let Some(replacer) = self.replacer_function.clone() {
            // a. Set value to ? Call(state.[[ReplacerFunction]], holder, « key, value »).
            value = replacer.call(&holder.clone().into(), &[(&key).into(), value], context)?;
        }

        // 4. If Type(value) is Object, unwrap the primitive wrappers.
        if let Some(obj) = value.as_object() {
            let unwrapped = {
                let borrowed = obj.borrow();
                if let Some(n) = borrowed.as_number() {
                    Some(JsValue::from(n))
                } else if let Some(s) = borrowed.as_string() {
                    Some(JsValue::from(s))
                } else if let Some(b) = borrowed.as_boolean() {
                    Some(JsValue::from(b))
                } else {
                    borrowed.as_big_int().map(|b| JsValue::from(b.clone()))
                }
            };
            if let Some(unwrapped) = unwrapped {
                value = unwrapped;
            }
        }

        match &value {
            // 5. If value is null, return "null".
            JsValue::Null => Ok(Some("null".into())),
            // 6-7. Booleans print literally.
            JsValue::Boolean(b) => Ok(Some(if *b { "true".into() } else { "false".into() })),
            // 8. If Type(value) is String, return QuoteJSONString(value).
            JsValue::String(s) => Ok(Some(quote_json_string(s))),
            // 9. If Type(value) is Number, then
            JsValue::Number(n) => {
                if n.is_finite() {
                    Ok(Some(
                        crate::builtins::Number::to_js_string(*n).to_std_string_escaped(),
                    ))
                } else {
                    // b. Return "null".
                    Ok(Some("null".into()))
                }
            }
            // 10. If Type(value) is BigInt, throw a TypeError exception.
            JsValue::BigInt(_) => Err(JsNativeError::typ()
                .with_message("BigInt value can't be serialized in JSON")
                .into()),
            // 11. If Type(value) is Object and IsCallable(value) is false, then
            JsValue::Object(obj) if !obj.is_callable() => {
                if obj.is_array_abstract()? {
                    Ok(Some(self.serialize_json_array(obj.clone(), context)?))
                } else {
                    Ok(Some(self.serialize_json_object(obj.clone(), context)?))
                }
            }
            // 12. Return undefined.
            _ => Ok(None),
        }
    }

    /// Abstract operation `SerializeJSONObject ( state, value )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-serializejsonobject
    fn serialize_json_object(
        &mut self,
        value: JsObject,
        context: &mut Context,
    ) -> JsResult<std::string::String> {
        // 1-2. Cycle detection.
        if self.stack.iter().any(|entry| JsObject::equals(entry, &value)) {
            return Err(JsNativeError::typ()
                .with_message("cyclic object value")
                .into());
        }
        self.stack.push(value.clone());

        // 3-4. Indentation bookkeeping.
        let step_back = self.indent.clone();
        self.indent.push_str(&self.gap);

        // 5-6. Resolve K, the key list.
        let keys: Vec<PropertyKey> = match &self.property_list {
            Some(list) => list.iter().cloned().map(PropertyKey::from).collect(),
            None => {
                let names = crate::builtins::object::enumerable_own_property_names(
                    &value,
                    PropertyNameKind::Key,
                    context,
                )?;
                let mut keys = Vec::with_capacity(names.len());
                for name in names {
                    keys.push(name.to_property_key(context)?);
                }
                keys
            }
        };

        // 7-8. Serialize every member.
        let mut partial: Vec<std::string::String> = Vec::new();
        for p in keys {
            if let Some(str_p) = self.serialize_json_property(p.clone(), &value, context)? {
                let key_json = quote_json_string(&match &p {
                    PropertyKey::String(s) => s.clone(),
                    PropertyKey::Index(i) => js_string!(i.to_string()),
                    PropertyKey::Symbol(_) => unreachable!("symbols are never serialized"),
                });
                let separator = if self.gap.is_empty() { ":" } else { ": " };
                partial.push(format!("{key_json}{separator}{str_p}"));
            }
        }

        // 9-10. Stitch the braces.
        let result = if partial.is_empty() {
            "{}".into()
        } else if self.gap.is_empty() {
            format!("{{{}}}", partial.join(","))
        } else {
            let joined = partial.join(&format!(",\n{}", self.indent));
            format!("{{\n{}{}\n{}}}", self.indent, joined, step_back)
        };

        // 11-13. Restore the state.
        self.stack.pop();
        self.indent = step_back;
        Ok(result)
    }

    /// Abstract operation `SerializeJSONArray ( state, value )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-serializejsonarray
    fn serialize_json_array(
        &mut self,
        value: JsObject,
        context: &mut Context,
    ) -> JsResult<std::string::String> {
        // 1-2. Cycle detection.
        if self.stack.iter().any(|entry| JsObject::equals(entry, &value)) {
            return Err(JsNativeError::typ()
                .with_message("cyclic object value")
                .into());
        }
        self.stack.push(value.clone());

        // 3-4. Indentation bookkeeping.
        let step_back = self.indent.clone();
        self.indent.push_str(&self.gap);

        // 5-7. Serialize every element; holes and undefineds print as null.
        let len = value.length_of_array_like(context)?;
        let mut partial: Vec<std::string::String> = Vec::with_capacity(len as usize);
        for index in 0..len {
            match self.serialize_json_property(PropertyKey::from(index), &value, context)? {
                Some(str_p) => partial.push(str_p),
                None => partial.push("null".into()),
            }
        }

        // 8-9. Stitch the brackets.
        let result = if partial.is_empty() {
            "[]".into()
        } else if self.gap.is_empty() {
            format!("[{}]", partial.join(","))
        } else {
            let joined = partial.join(&format!(",\n{}", self.indent));
            format!("[\n{}{}\n{}]", self.indent, joined, step_back)
        };

        // 10-12. Restore the state.
        self.stack.pop();
        self.indent = step_back;
        Ok(result)
    }
}

/// Abstract operation `QuoteJSONString ( value )`: quotes and escapes a
/// string for JSON output, escaping unpaired surrogates as `\uXXXX`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-quotejsonstring
fn quote_json_string(string: &JsString) -> std::string::String {
    let mut product = std::string::String::with_capacity(string.len() + 2);
    product.push('"');
    for code_point in string.code_points() {
        match code_point {
            crate::string::CodePoint::Unicode('\u{0008}') => product.push_str("\\b"),
            crate::string::CodePoint::Unicode('\u{0009}') => product.push_str("\\t"),
            crate::string::CodePoint::Unicode('\u{000A}') => product.push_str("\\n"),
            crate::string::CodePoint::Unicode('\u{000C}') => product.push_str("\\f"),
            crate::string::CodePoint::Unicode('\u{000D}') => product.push_str("\\r"),
            crate::string::CodePoint::Unicode('"') => product.push_str("\\\""),
            crate::string::CodePoint::Unicode('\\') => product.push_str("\\\\"),
            crate::string::CodePoint::Unicode(c) if (c as u32) < 0x20 => {
                product.push_str(&format!("\\u{:04x}", c as u32));
            }
            crate::string::CodePoint::Unicode(c) => product.push(c),
            crate::string::CodePoint::UnpairedSurrogate(surrogate) => {
                product.push_str(&format!("\\u{surrogate:04x}"));
            }
        }
    }
    product.push('"');
    product
}
