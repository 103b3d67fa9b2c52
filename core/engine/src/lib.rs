//! Krait is the core of an embeddable JavaScript interpreter: the value
//! model, the realm and intrinsics graph, and the standard library
//! built-ins.
//!
//! The crate deliberately contains no parser and no evaluator. A host
//! evaluator drives the core through three typed interfaces:
//!
//! - every callable exposes `(this, args, &mut Context) -> JsResult<JsValue>`;
//! - thrown values propagate as the `Err` arm of [`JsResult`], carried by
//!   [`JsError`];
//! - [`Context`] is the evaluation context: it owns the realm (intrinsics,
//!   global object, legacy `RegExp` statics) and the engine options such as
//!   the time zone.
//!
//! # Example
//!
//! ```
//! use krait_engine::{Context, JsValue, js_string};
//!
//! let mut context = Context::default();
//! let global = context.global_object();
//!
//! // `Number.MAX_SAFE_INTEGER`
//! let number = global
//!     .get("Number", &mut context)
//!     .unwrap()
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//! let max = number.get("MAX_SAFE_INTEGER", &mut context).unwrap();
//! assert_eq!(max.as_number(), Some(9007199254740991.0));
//! ```

pub mod bigint;
pub mod builtins;
pub mod context;
pub mod error;
pub mod gc;
pub mod object;
pub mod property;
pub mod realm;
pub mod string;
pub mod symbol;
pub mod value;

pub use crate::{
    bigint::JsBigInt,
    context::Context,
    error::{JsError, JsNativeError, JsNativeErrorKind, JsResult},
    object::JsObject,
    string::{CodePoint, JsString},
    symbol::{JsSymbol, WellKnownSymbols},
    value::{JsArgs, JsValue},
};
