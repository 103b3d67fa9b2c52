//! A `Realm` holds the intrinsics and the global object of one execution
//! domain.
//!
//! Intrinsics are pre-allocated blank by [`Intrinsics::default`], so every
//! cross-reference between constructors and prototypes resolves during boot;
//! the built-in initializers then fill the objects in place.

use crate::{
    context::intrinsics::Intrinsics,
    js_string,
    object::{JsObject, ObjectData},
    JsString,
};

/// The realm: intrinsics, global object, and the legacy `RegExp` statics.
#[derive(Debug)]
pub struct Realm {
    pub(crate) intrinsics: Intrinsics,
    pub(crate) global_object: JsObject,
    pub(crate) regexp_statics: RegExpStatics,
    pub(crate) legacy_regexp_statics_enabled: bool,
}

impl Realm {
    /// Creates a new realm with blank intrinsics.
    pub(crate) fn create() -> Self {
        Self {
            intrinsics: Intrinsics::default(),
            global_object: JsObject::from_proto_and_data(None, ObjectData::ordinary()),
            regexp_statics: RegExpStatics::default(),
            legacy_regexp_statics_enabled: true,
        }
    }

    /// Gets the intrinsics of the realm.
    #[must_use]
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// Gets the global object of the realm.
    #[must_use]
    pub fn global_object(&self) -> JsObject {
        self.global_object.clone()
    }
}

/// The legacy static properties of the `RegExp` constructor
/// (`RegExp.$1`…`RegExp.$9`, `input`, `lastMatch`, `lastParen`,
/// `leftContext`, `rightContext`).
///
/// They live on the realm, not on the constructor instance, and are updated
/// exactly when a regexp exec succeeds.
#[derive(Debug, Default)]
pub struct RegExpStatics {
    pub(crate) input: JsString,
    pub(crate) last_match: JsString,
    pub(crate) last_paren: JsString,
    pub(crate) left_context: JsString,
    pub(crate) right_context: JsString,
    pub(crate) captures: Vec<JsString>,
}

impl RegExpStatics {
    /// Records a successful match.
    pub(crate) fn update(
        &mut self,
        input: JsString,
        match_start: usize,
        match_end: usize,
        captures: Vec<JsString>,
    ) {
        self.left_context = input.substring(0, match_start);
        self.right_context = input.substring(match_end, input.len());
        self.last_match = input.substring(match_start, match_end);
        self.last_paren = captures.last().cloned().unwrap_or_default();
        self.input = input;
        self.captures = captures;
    }

    /// Gets the capture group `n` (1-based), or the empty string.
    pub(crate) fn capture(&self, n: usize) -> JsString {
        debug_assert!((1..=9).contains(&n));
        self.captures.get(n - 1).cloned().unwrap_or_else(|| js_string!())
    }
}
