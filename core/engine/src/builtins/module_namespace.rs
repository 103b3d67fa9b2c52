//! The module namespace exotic object.
//!
//! Module loading is an external collaborator: the host module system builds
//! a namespace object through [`ModuleNamespace::create`] with the resolved
//! exports, and the exotic internal methods give it the prescribed
//! immutable shape (null prototype, non-extensible, sorted keys).
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-module-namespace-exotic-objects

use crate::{
    gc::{custom_trace, Finalize, Trace},
    js_string,
    object::{JsObject, ObjectData},
    property::{PropertyDescriptor, PropertyKey},
    symbol::WellKnownSymbols,
    JsString, JsValue,
};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// The internal representation of a module namespace: the named exports, in
/// code unit order.
#[derive(Debug, Default, Finalize)]
pub struct ModuleNamespace {
    exports: IndexMap<JsString, JsValue, FxBuildHasher>,
}

unsafe impl Trace for ModuleNamespace {
    custom_trace!(this, {
        for value in this.exports.values() {
            mark(value);
        }
    });
}

impl ModuleNamespace {
    /// Abstract operation `ModuleNamespaceCreate ( module, exports )`.
    ///
    /// The exports are sorted by code unit order, the prototype is null,
    /// and the object is not extensible.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-modulenamespacecreate
    #[must_use]
    pub fn create(exports: Vec<(JsString, JsValue)>) -> JsObject {
        // 7. Sort the export names by code unit order.
        let mut exports = exports;
        exports.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut map: IndexMap<JsString, JsValue, FxBuildHasher> = IndexMap::default();
        for (name, value) in exports {
            map.insert(name, value);
        }

        let namespace = JsObject::from_proto_and_data(
            None,
            ObjectData::module_namespace(Self { exports: map }),
        );

        // `@@toStringTag` is the only ordinary own property.
        namespace.insert_property(
            WellKnownSymbols::to_string_tag(),
            PropertyDescriptor::builder()
                .value(js_string!("Module"))
                .writable(false)
                .enumerable(false)
                .configurable(false),
        );
        namespace.borrow_mut().set_extensible(false);

        namespace
    }

    /// Gets the bound export for a string key.
    #[must_use]
    pub fn get_export(&self, key: &PropertyKey) -> Option<JsValue> {
        let name = match key {
            PropertyKey::String(string) => string.clone(),
            PropertyKey::Index(index) => js_string!(index.to_string()),
            PropertyKey::Symbol(_) => return None,
        };
        self.exports.get(&name).cloned()
    }

    /// The export keys, already in code unit order.
    #[must_use]
    pub fn export_keys(&self) -> Vec<PropertyKey> {
        self.exports
            .keys()
            .cloned()
            .map(PropertyKey::from)
            .collect()
    }
}
