//! Error types of the engine.
//!
//! Every fallible operation returns a [`JsError`], the typed throw signal
//! that propagates a thrown JavaScript value through the call stack without
//! a host exception. Native errors are created lazily: they carry a kind and
//! a message, and only materialize an error object when the thrown value is
//! observed by script.

use crate::{
    builtins::error::ErrorKind,
    gc::{custom_trace, Finalize, Trace},
    js_string,
    object::{JsObject, ObjectData},
    property::PropertyDescriptor,
    Context, JsValue,
};
use std::{borrow::Cow, fmt};

/// The error type returned by all operations of the engine.
///
/// This is either an opaque value thrown by script, or a native error built
/// by the engine itself.
#[derive(Debug, Clone, Trace, Finalize)]
pub struct JsError {
    inner: Repr,
}

#[derive(Debug, Clone, Finalize)]
enum Repr {
    Native(JsNativeError),
    Opaque(JsValue),
}

unsafe impl Trace for Repr {
    custom_trace!(this, {
        match this {
            Repr::Native(_) => {}
            Repr::Opaque(value) => mark(value),
        }
    });
}

impl JsError {
    /// Creates a new `JsError` from a native error.
    #[must_use]
    pub fn from_native(err: JsNativeError) -> Self {
        Self {
            inner: Repr::Native(err),
        }
    }

    /// Creates a new `JsError` from a thrown value.
    #[must_use]
    pub fn from_opaque(value: JsValue) -> Self {
        Self {
            inner: Repr::Opaque(value),
        }
    }

    /// Converts the error into the value that script observes in a `catch`
    /// clause.
    pub fn to_opaque(&self, context: &mut Context) -> JsValue {
        match &self.inner {
            Repr::Native(native) => native.to_opaque(context).into(),
            Repr::Opaque(value) => value.clone(),
        }
    }

    /// Gets the native error if this error was built by the engine.
    #[must_use]
    pub fn as_native(&self) -> Option<&JsNativeError> {
        match &self.inner {
            Repr::Native(native) => Some(native),
            Repr::Opaque(_) => None,
        }
    }

    /// Gets the opaque thrown value if this error came from script.
    #[must_use]
    pub fn as_opaque(&self) -> Option<&JsValue> {
        match &self.inner {
            Repr::Opaque(value) => Some(value),
            Repr::Native(_) => None,
        }
    }
}

impl fmt::Display for JsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Repr::Native(native) => native.fmt(f),
            Repr::Opaque(value) => write!(f, "uncaught {}", value.display()),
        }
    }
}

impl std::error::Error for JsError {}

impl From<JsNativeError> for JsError {
    fn from(error: JsNativeError) -> Self {
        Self::from_native(error)
    }
}

/// A native error built by the engine, carrying its kind and message.
#[derive(Debug, Clone, Finalize)]
pub struct JsNativeError {
    /// The kind of the error.
    pub kind: JsNativeErrorKind,
    message: Cow<'static, str>,
}

// Native errors never hold GC'd objects.
unsafe impl Trace for JsNativeError {
    crate::gc::empty_trace!();
}

impl JsNativeError {
    const fn new(kind: JsNativeErrorKind) -> Self {
        Self {
            kind,
            message: Cow::Borrowed(""),
        }
    }

    /// Creates a new `Error` native error.
    #[must_use]
    pub const fn error() -> Self {
        Self::new(JsNativeErrorKind::Error)
    }

    /// Creates a new `TypeError` native error.
    #[must_use]
    pub const fn typ() -> Self {
        Self::new(JsNativeErrorKind::Type)
    }

    /// Creates a new `RangeError` native error.
    #[must_use]
    pub const fn range() -> Self {
        Self::new(JsNativeErrorKind::Range)
    }

    /// Creates a new `SyntaxError` native error.
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(JsNativeErrorKind::Syntax)
    }

    /// Creates a new `ReferenceError` native error.
    #[must_use]
    pub const fn reference() -> Self {
        Self::new(JsNativeErrorKind::Reference)
    }

    /// Sets the message of the error.
    #[must_use]
    pub fn with_message<S: Into<Cow<'static, str>>>(mut self, message: S) -> Self {
        self.message = message.into();
        self
    }

    /// The message of the error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Materializes the error object, with the realm's matching error
    /// prototype.
    pub fn to_opaque(&self, context: &mut Context) -> JsObject {
        let constructors = context.intrinsics().constructors();
        let (kind, prototype) = match self.kind {
            JsNativeErrorKind::Error => (ErrorKind::Error, constructors.error().prototype()),
            JsNativeErrorKind::Type => (ErrorKind::Type, constructors.type_error().prototype()),
            JsNativeErrorKind::Range => (ErrorKind::Range, constructors.range_error().prototype()),
            JsNativeErrorKind::Syntax => {
                (ErrorKind::Syntax, constructors.syntax_error().prototype())
            }
            JsNativeErrorKind::Reference => (
                ErrorKind::Reference,
                constructors.reference_error().prototype(),
            ),
        };

        let error = JsObject::from_proto_and_data(prototype, ObjectData::error(kind));
        error.insert_property(
            "message",
            PropertyDescriptor::builder()
                .value(js_string!(self.message.as_ref()))
                .writable(true)
                .enumerable(false)
                .configurable(true),
        );
        error
    }
}

impl fmt::Display for JsNativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// The kind of a native error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Finalize)]
pub enum JsNativeErrorKind {
    /// A plain `Error`.
    #[error("Error")]
    Error,
    /// A `TypeError`: an operation received a value of the wrong type.
    #[error("TypeError")]
    Type,
    /// A `RangeError`: a value is outside its valid range.
    #[error("RangeError")]
    Range,
    /// A `SyntaxError`: a string could not be parsed.
    #[error("SyntaxError")]
    Syntax,
    /// A `ReferenceError`: an invalid reference was dereferenced.
    #[error("ReferenceError")]
    Reference,
}

unsafe impl Trace for JsNativeErrorKind {
    crate::gc::empty_trace!();
}

/// Helper type for `Result<T, JsError>`.
pub type JsResult<T> = Result<T, JsError>;
