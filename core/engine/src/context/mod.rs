//! The ECMAScript context: the evaluation context of the engine.

pub mod intrinsics;
mod time_zone;

pub use time_zone::{FixedOffsetTimeZone, LocalTimeZone, TimeZone, UtcTimeZone};

use crate::{
    builtins,
    object::JsObject,
    realm::Realm,
    JsString, JsSymbol,
};
use intrinsics::Intrinsics;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// The context of an evaluation.
///
/// A `Context` carries the realm (intrinsics, global object, legacy regexp
/// statics) and the engine options. The external evaluator threads one
/// `&mut Context` through every callable invocation; a thrown value travels
/// back as the `Err` arm of [`JsResult`][crate::JsResult].
///
/// # Examples
///
/// ```
/// # use krait_engine::Context;
/// let mut context = Context::default();
/// let global = context.global_object();
/// let array = global.get("Array", &mut context).unwrap();
/// assert!(array.is_callable());
/// ```
#[derive(Debug)]
pub struct Context {
    realm: Realm,
    symbol_registry: FxHashMap<JsString, JsSymbol>,
    time_zone: Rc<dyn TimeZone>,
    promise_resolve_hook: Option<JsObject>,
}

impl Default for Context {
    fn default() -> Self {
        let mut context = Self {
            realm: Realm::create(),
            symbol_registry: FxHashMap::default(),
            time_zone: Rc::new(UtcTimeZone),
            promise_resolve_hook: None,
        };
        builtins::init(&mut context);
        context
    }
}

impl Context {
    /// Creates a new `Context` with the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the realm of this context.
    #[must_use]
    pub fn realm(&self) -> &Realm {
        &self.realm
    }

    /// Gets a mutable reference to the realm of this context.
    pub fn realm_mut(&mut self) -> &mut Realm {
        &mut self.realm
    }

    /// Gets the intrinsic objects of the realm.
    #[must_use]
    pub fn intrinsics(&self) -> &Intrinsics {
        self.realm.intrinsics()
    }

    /// Gets the global object of the realm.
    #[must_use]
    pub fn global_object(&self) -> JsObject {
        self.realm.global_object()
    }

    /// Gets the configured time zone.
    #[must_use]
    pub fn time_zone(&self) -> Rc<dyn TimeZone> {
        self.time_zone.clone()
    }

    /// Replaces the time zone used by `Date` local-time computations.
    pub fn set_time_zone(&mut self, time_zone: Rc<dyn TimeZone>) {
        self.time_zone = time_zone;
    }

    /// Toggles the visibility of the legacy `RegExp` statics
    /// (`RegExp.$1`…, `RegExp.lastMatch`, …).
    pub fn set_legacy_regexp_statics(&mut self, enabled: bool) {
        self.realm.legacy_regexp_statics_enabled = enabled;
    }

    /// Registers the host promise-resolve hook used by the async iterator
    /// helpers. The hook must be a callable that behaves like
    /// `Promise.resolve`.
    pub fn set_promise_hook(&mut self, resolve: JsObject) {
        self.promise_resolve_hook = Some(resolve);
    }

    /// The registered promise-resolve hook, if any.
    #[must_use]
    pub fn promise_hook(&self) -> Option<JsObject> {
        self.promise_resolve_hook.clone()
    }

    /// Looks up or creates the registered symbol for `Symbol.for`.
    pub(crate) fn get_or_intern_symbol(&mut self, key: &JsString) -> JsSymbol {
        if let Some(symbol) = self.symbol_registry.get(key) {
            return symbol.clone();
        }
        let symbol = JsSymbol::new(Some(key.clone()));
        self.symbol_registry.insert(key.clone(), symbol.clone());
        symbol
    }

    /// Finds the registry key of a symbol for `Symbol.keyFor`.
    pub(crate) fn symbol_registry_key(&self, symbol: &JsSymbol) -> Option<JsString> {
        self.symbol_registry
            .iter()
            .find(|(_, registered)| *registered == symbol)
            .map(|(key, _)| key.clone())
    }
}
