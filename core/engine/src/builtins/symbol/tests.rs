use crate::{js_string, Context, JsValue};

#[test]
fn symbol_call_creates_unique_symbols() {
    let mut context = Context::default();
    let global = context.global_object();
    let symbol_fn = global
        .get("Symbol", &mut context)
        .unwrap()
        .as_object()
        .cloned()
        .unwrap();

    let a = symbol_fn
        .call(&JsValue::undefined(), &[js_string!("a").into()], &mut context)
        .unwrap();
    let b = symbol_fn
        .call(&JsValue::undefined(), &[js_string!("a").into()], &mut context)
        .unwrap();

    assert!(a.is_symbol());
    assert!(!JsValue::same_value(&a, &b));
}

#[test]
fn symbol_new_is_a_type_error() {
    let mut context = Context::default();
    let symbol_fn = context.intrinsics().constructors().symbol().constructor();
    assert!(symbol_fn.construct(&[], None, &mut context).is_err());
}

#[test]
fn for_and_key_for_roundtrip() {
    let mut context = Context::default();
    let symbol_fn = context.intrinsics().constructors().symbol().constructor();

    let a = symbol_fn
        .invoke("for", &[js_string!("shared").into()], &mut context)
        .unwrap();
    let b = symbol_fn
        .invoke("for", &[js_string!("shared").into()], &mut context)
        .unwrap();
    assert!(JsValue::same_value(&a, &b));

    let key = symbol_fn.invoke("keyFor", &[a], &mut context).unwrap();
    assert_eq!(key.as_string().unwrap(), "shared");

    // A fresh symbol has no registry key.
    let fresh = crate::JsSymbol::new(None);
    let key = symbol_fn
        .invoke("keyFor", &[fresh.into()], &mut context)
        .unwrap();
    assert!(key.is_undefined());
}

#[test]
fn description_accessor() {
    let mut context = Context::default();
    let sym = crate::JsSymbol::new(Some(js_string!("desc")));
    let boxed = JsValue::from(sym).to_object(&mut context).unwrap();
    let description = boxed.get("description", &mut context).unwrap();
    assert_eq!(description.as_string().unwrap(), "desc");
}

#[test]
fn well_known_symbols_are_exposed() {
    let mut context = Context::default();
    let symbol_fn = context.intrinsics().constructors().symbol().constructor();
    let iterator = symbol_fn.get("iterator", &mut context).unwrap();
    assert!(JsValue::same_value(
        &iterator,
        &crate::symbol::WellKnownSymbols::iterator().into()
    ));
}
