//! The ECMAScript `Symbol` primitive and the well-known symbols table.
//!
//! Symbols are interned by a process-unique hash, so two symbols compare
//! equal exactly when they are the same symbol. Well-known symbols get
//! reserved hashes below [`RESERVED_SYMBOL_HASHES`] so that every realm in
//! the process agrees on their identity.

use crate::{
    gc::{empty_trace, Finalize, Trace},
    js_string, JsString,
};
use std::{
    cell::Cell,
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

/// The number of hashes reserved for well-known symbols.
const RESERVED_SYMBOL_HASHES: u64 = 64;

thread_local! {
    /// Cached well-known symbols of this thread.
    static WELL_KNOWN_SYMBOLS: WellKnownSymbols = WellKnownSymbols::new();

    /// Hash source for new symbols.
    static SYMBOL_HASH_COUNT: Cell<u64> = const { Cell::new(RESERVED_SYMBOL_HASHES) };
}

#[derive(Debug)]
struct Inner {
    hash: u64,
    description: Option<JsString>,
}

/// A JavaScript symbol primitive.
#[derive(Debug, Clone, Finalize)]
pub struct JsSymbol {
    inner: Rc<Inner>,
}

// Symbols never contain GC'd objects.
unsafe impl Trace for JsSymbol {
    empty_trace!();
}

impl JsSymbol {
    /// Creates a new symbol with an optional description.
    #[must_use]
    pub fn new(description: Option<JsString>) -> Self {
        let hash = SYMBOL_HASH_COUNT.with(|count| {
            let hash = count.get();
            count.set(hash + 1);
            hash
        });
        Self {
            inner: Rc::new(Inner { hash, description }),
        }
    }

    /// Creates a well-known symbol with a reserved hash.
    fn well_known(hash: u64, description: &str) -> Self {
        debug_assert!(hash < RESERVED_SYMBOL_HASHES);
        Self {
            inner: Rc::new(Inner {
                hash,
                description: Some(js_string!(description)),
            }),
        }
    }

    /// Returns the description of the symbol.
    #[must_use]
    pub fn description(&self) -> Option<JsString> {
        self.inner.description.clone()
    }

    /// Returns the process-unique hash of the symbol.
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.inner.hash
    }

    /// Abstract operation `SymbolDescriptiveString ( sym )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-symboldescriptivestring
    #[must_use]
    pub fn descriptive_string(&self) -> JsString {
        let open = js_string!("Symbol(");
        let close = js_string!(")");
        match &self.inner.description {
            Some(desc) => JsString::concat_array(&[&open, desc, &close]),
            None => js_string!("Symbol()"),
        }
    }
}

impl PartialEq for JsSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.inner.hash == other.inner.hash
    }
}

impl Eq for JsSymbol {}

impl Hash for JsSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash.hash(state);
    }
}

impl fmt::Display for JsSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptive_string().to_std_string_escaped())
    }
}

/// The set of well-known symbols of the specification.
///
/// Each accessor clones the per-thread cached symbol, so repeated calls are
/// cheap and always yield the same identity.
#[derive(Debug, Clone)]
pub struct WellKnownSymbols {
    async_iterator: JsSymbol,
    has_instance: JsSymbol,
    is_concat_spreadable: JsSymbol,
    iterator: JsSymbol,
    r#match: JsSymbol,
    match_all: JsSymbol,
    replace: JsSymbol,
    search: JsSymbol,
    species: JsSymbol,
    split: JsSymbol,
    to_primitive: JsSymbol,
    to_string_tag: JsSymbol,
    unscopables: JsSymbol,
}

impl WellKnownSymbols {
    fn new() -> Self {
        Self {
            async_iterator: JsSymbol::well_known(0, "Symbol.asyncIterator"),
            has_instance: JsSymbol::well_known(1, "Symbol.hasInstance"),
            is_concat_spreadable: JsSymbol::well_known(2, "Symbol.isConcatSpreadable"),
            iterator: JsSymbol::well_known(3, "Symbol.iterator"),
            r#match: JsSymbol::well_known(4, "Symbol.match"),
            match_all: JsSymbol::well_known(5, "Symbol.matchAll"),
            replace: JsSymbol::well_known(6, "Symbol.replace"),
            search: JsSymbol::well_known(7, "Symbol.search"),
            species: JsSymbol::well_known(8, "Symbol.species"),
            split: JsSymbol::well_known(9, "Symbol.split"),
            to_primitive: JsSymbol::well_known(10, "Symbol.toPrimitive"),
            to_string_tag: JsSymbol::well_known(11, "Symbol.toStringTag"),
            unscopables: JsSymbol::well_known(12, "Symbol.unscopables"),
        }
    }

    /// The `Symbol.asyncIterator` well-known symbol.
    #[must_use]
    pub fn async_iterator() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.async_iterator.clone())
    }

    /// The `Symbol.hasInstance` well-known symbol.
    #[must_use]
    pub fn has_instance() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.has_instance.clone())
    }

    /// The `Symbol.isConcatSpreadable` well-known symbol.
    #[must_use]
    pub fn is_concat_spreadable() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.is_concat_spreadable.clone())
    }

    /// The `Symbol.iterator` well-known symbol.
    #[must_use]
    pub fn iterator() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.iterator.clone())
    }

    /// The `Symbol.match` well-known symbol.
    #[must_use]
    pub fn r#match() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.r#match.clone())
    }

    /// The `Symbol.matchAll` well-known symbol.
    #[must_use]
    pub fn match_all() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.match_all.clone())
    }

    /// The `Symbol.replace` well-known symbol.
    #[must_use]
    pub fn replace() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.replace.clone())
    }

    /// The `Symbol.search` well-known symbol.
    #[must_use]
    pub fn search() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.search.clone())
    }

    /// The `Symbol.species` well-known symbol.
    #[must_use]
    pub fn species() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.species.clone())
    }

    /// The `Symbol.split` well-known symbol.
    #[must_use]
    pub fn split() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.split.clone())
    }

    /// The `Symbol.toPrimitive` well-known symbol.
    #[must_use]
    pub fn to_primitive() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.to_primitive.clone())
    }

    /// The `Symbol.toStringTag` well-known symbol.
    #[must_use]
    pub fn to_string_tag() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.to_string_tag.clone())
    }

    /// The `Symbol.unscopables` well-known symbol.
    #[must_use]
    pub fn unscopables() -> JsSymbol {
        WELL_KNOWN_SYMBOLS.with(|s| s.unscopables.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_identity_is_stable() {
        assert_eq!(WellKnownSymbols::iterator(), WellKnownSymbols::iterator());
        assert_ne!(WellKnownSymbols::iterator(), WellKnownSymbols::split());
    }

    #[test]
    fn fresh_symbols_are_unique() {
        let a = JsSymbol::new(Some(js_string!("a")));
        let b = JsSymbol::new(Some(js_string!("a")));
        assert_ne!(a, b);
    }

    #[test]
    fn descriptive_string() {
        let sym = JsSymbol::new(Some(js_string!("desc")));
        assert_eq!(&sym.descriptive_string(), "Symbol(desc)");
        let sym = JsSymbol::new(None);
        assert_eq!(&sym.descriptive_string(), "Symbol()");
    }
}
