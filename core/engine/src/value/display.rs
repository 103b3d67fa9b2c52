//! Display implementation for [`JsValue`].

use super::JsValue;
use crate::builtins::Number;
use std::fmt;

/// A wrapper to display a `JsValue` in a format string.
///
/// Object values are shown by their kind tag only: displaying the contents of
/// an object can run arbitrary getters, which a `Display` implementation must
/// not do.
#[derive(Debug)]
pub struct ValueDisplay<'value> {
    pub(super) value: &'value JsValue,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            JsValue::Null => write!(f, "null"),
            JsValue::Undefined => write!(f, "undefined"),
            JsValue::Boolean(v) => write!(f, "{v}"),
            JsValue::Symbol(symbol) => write!(f, "{symbol}"),
            JsValue::String(string) => write!(f, "\"{}\"", string.to_std_string_escaped()),
            JsValue::Number(number) => {
                write!(f, "{}", Number::to_js_string(*number).to_std_string_escaped())
            }
            JsValue::BigInt(bigint) => write!(f, "{bigint}n"),
            JsValue::Object(object) => {
                if object.is_callable() {
                    write!(f, "[function]")
                } else if object.borrow().is_array() {
                    write!(f, "[array]")
                } else {
                    write!(f, "[object]")
                }
            }
        }
    }
}
