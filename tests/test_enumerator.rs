extern crate hostbridge;

use hostbridge::runner::ds::collection::ElementCollection;
use hostbridge::runner::ds::error::JErrorType;
use hostbridge::runner::ds::object::{object_from_entries, JsObjectType};
use hostbridge::runner::ds::object_property::PropertyKey;
use hostbridge::runner::ds::value::{JsNumberType, JsValue};
use hostbridge::runner::host::dom::{ElementObject, FormElement};
use hostbridge::runner::host::enumerator::Enumerator;
use hostbridge::runner::plugin::registry::BuiltInRegistry;
use hostbridge::runner::plugin::types::EvalContext;
use hostbridge::runner::profile::{CapabilitySet, ClientProfile, FeatureFlag};
use proptest::prelude::*;

fn legacy() -> CapabilitySet {
    CapabilitySet::for_profile(ClientProfile::Ie)
}

fn legacy_ctx() -> EvalContext {
    let caps = legacy();
    let mut ctx = EvalContext::with_capabilities(caps.clone());
    ctx.install_host_builtins(BuiltInRegistry::for_capabilities(&caps));
    ctx
}

fn element(id: &str) -> JsValue {
    JsValue::Object(ElementObject::new("li").with_attribute("id", id).into_handle())
}

fn id_of(v: &JsValue) -> JsValue {
    match v {
        JsValue::Object(o) => (**o).borrow().as_js_object().get(&PropertyKey::from("id")),
        _ => JsValue::Undefined,
    }
}

fn list(ids: &[&str]) -> (ElementCollection, JsObjectType) {
    let coll = ElementCollection::from_values(ids.iter().map(|id| element(id)).collect());
    let handle = coll.clone().into_handle();
    (coll, handle)
}

fn call(ctx: &mut EvalContext, cursor: &JsValue, method: &str) -> JsValue {
    ctx.invoke(cursor, method, vec![]).unwrap().unwrap()
}

// ── Traversal ────────────────────────────────────────────────────────

#[test]
fn test_three_element_walk() {
    let (_coll, handle) = list(&["a", "b", "c"]);
    let mut ctx = legacy_ctx();
    let cursor = ctx
        .construct("Enumerator", vec![JsValue::Object(handle.clone())])
        .unwrap()
        .unwrap();

    assert_eq!(call(&mut ctx, &cursor, "atEnd"), JsValue::Boolean(false));
    let first = call(&mut ctx, &cursor, "item");
    assert_eq!(id_of(&first), JsValue::String("a".to_string()));

    for _ in 0..3 {
        assert_eq!(call(&mut ctx, &cursor, "moveNext"), JsValue::Undefined);
    }
    assert_eq!(call(&mut ctx, &cursor, "atEnd"), JsValue::Boolean(true));
    assert_eq!(call(&mut ctx, &cursor, "item"), JsValue::Undefined);

    call(&mut ctx, &cursor, "moveFirst");
    assert_eq!(call(&mut ctx, &cursor, "atEnd"), JsValue::Boolean(false));
    let again = call(&mut ctx, &cursor, "item");
    assert_eq!(id_of(&again), JsValue::String("a".to_string()));
    assert!(again != first);
}

#[test]
fn test_at_end_has_no_side_effects() {
    let (_coll, handle) = list(&["a"]);
    let e = Enumerator::construct(&JsValue::Object(handle), &legacy()).unwrap();
    for _ in 0..3 {
        assert!(!e.at_end());
    }
    assert_eq!(e.index(), 0);
}

#[test]
fn test_undefined_gives_empty_cursor() {
    let mut ctx = legacy_ctx();
    let cursor = ctx.construct("Enumerator", vec![]).unwrap().unwrap();
    assert_eq!(call(&mut ctx, &cursor, "atEnd"), JsValue::Boolean(true));
    assert_eq!(call(&mut ctx, &cursor, "item"), JsValue::Undefined);

    let cursor = ctx
        .construct("Enumerator", vec![JsValue::Undefined])
        .unwrap()
        .unwrap();
    assert_eq!(call(&mut ctx, &cursor, "atEnd"), JsValue::Boolean(true));
}

#[test]
fn test_empty_collection() {
    let (_coll, handle) = list(&[]);
    let mut e = Enumerator::construct(&JsValue::Object(handle), &legacy()).unwrap();
    assert!(e.at_end());
    e.move_next();
    assert!(e.at_end());
    assert_eq!(e.item(), JsValue::Undefined);
}

// ── Copy on read ─────────────────────────────────────────────────────

#[test]
fn test_item_copies_are_detached_from_storage() {
    let (coll, handle) = list(&["a"]);
    let e = Enumerator::construct(&JsValue::Object(handle), &legacy()).unwrap();

    let first = e.item();
    {
        let obj = first.as_object().unwrap();
        let mut obj = (**obj).borrow_mut();
        let js = obj.as_js_object_mut();
        js.set_case_sensitive(true);
        js.set(PropertyKey::from("id"), JsValue::String("changed".to_string()));
    }

    let second = e.item();
    assert!(second != first);
    assert_eq!(id_of(&second), JsValue::String("a".to_string()));
    let second_obj = second.as_object().unwrap();
    assert!(!(**second_obj).borrow().as_js_object().is_case_sensitive());

    let stored = coll.remove(0).unwrap();
    assert_eq!(id_of(&stored), JsValue::String("a".to_string()));
    assert!((**stored.as_object().unwrap())
        .borrow()
        .as_js_object()
        .is_case_sensitive());
}

#[test]
fn test_item_reads_ignore_case() {
    let (_coll, handle) = list(&["a"]);
    let e = Enumerator::construct(&JsValue::Object(handle), &legacy()).unwrap();
    let item = e.item();
    let obj = (**item.as_object().unwrap()).borrow();
    assert_eq!(
        obj.as_js_object().get(&PropertyKey::from("ID")),
        JsValue::String("a".to_string())
    );
    assert_eq!(
        obj.as_js_object().get(&PropertyKey::from("TAGNAME")),
        JsValue::String("LI".to_string())
    );
}

// ── Live source ──────────────────────────────────────────────────────

#[test]
fn test_mutation_between_calls_is_observed() {
    let (coll, handle) = list(&["a"]);
    let mut e = Enumerator::construct(&JsValue::Object(handle), &legacy()).unwrap();
    e.move_next();
    assert!(e.at_end());

    coll.push(element("b"));
    assert!(!e.at_end());
    assert_eq!(id_of(&e.item()), JsValue::String("b".to_string()));

    coll.insert(0, element("z"));
    e.move_first();
    assert_eq!(id_of(&e.item()), JsValue::String("z".to_string()));

    coll.clear();
    assert!(e.at_end());
}

#[test]
fn test_dropped_source_reads_as_empty() {
    let (coll, handle) = list(&["a", "b"]);
    let e = Enumerator::construct(&JsValue::Object(handle.clone()), &legacy()).unwrap();
    assert!(e.source().is_attached());
    drop(handle);
    drop(coll);
    assert!(!e.source().is_attached());
    assert!(e.at_end());
    assert_eq!(e.item(), JsValue::Undefined);
}

#[test]
fn test_cursor_inside_its_own_collection() {
    let (coll, handle) = list(&[]);
    let mut ctx = legacy_ctx();
    let cursor = ctx
        .construct("Enumerator", vec![JsValue::Object(handle.clone())])
        .unwrap()
        .unwrap();
    coll.push(cursor.clone());

    assert_eq!(call(&mut ctx, &cursor, "atEnd"), JsValue::Boolean(false));
    let copy = call(&mut ctx, &cursor, "item");
    assert!(copy != cursor);
    let copy_obj = copy.as_object().unwrap();
    assert_eq!((**copy_obj).borrow().as_js_object().class_name(), "Enumerator");
    assert!(!(**copy_obj).borrow().as_js_object().is_case_sensitive());

    // The copy is a cursor over the same collection.
    assert_eq!(call(&mut ctx, &copy, "atEnd"), JsValue::Boolean(false));
    call(&mut ctx, &cursor, "moveNext");
    assert_eq!(call(&mut ctx, &cursor, "atEnd"), JsValue::Boolean(true));
    assert_eq!(call(&mut ctx, &copy, "atEnd"), JsValue::Boolean(false));
}

#[test]
fn test_form_enumerates_its_elements() {
    let form = FormElement::new();
    form.add_control(element("user"));
    let form_value = JsValue::Object(form.clone().into_handle());

    let mut e = Enumerator::construct(&form_value, &legacy()).unwrap();
    assert_eq!(id_of(&e.item()), JsValue::String("user".to_string()));

    form.add_control(element("pass"));
    e.move_next();
    assert!(!e.at_end());
    assert_eq!(id_of(&e.item()), JsValue::String("pass".to_string()));
}

// ── Construction errors ──────────────────────────────────────────────

#[test]
fn test_plain_object_is_not_enumerable() {
    let plain = JsValue::Object(object_from_entries(Vec::<(String, JsValue)>::new()));
    let err = Enumerator::construct(&plain, &legacy()).err().unwrap();
    assert_eq!(
        err,
        JErrorType::TypeError("object is not enumerable ([object Object])".to_string())
    );

    let li = element("x");
    let err = Enumerator::construct(&li, &legacy()).err().unwrap();
    assert_eq!(
        err.message(),
        "object is not enumerable ([object HTMLLIElement])"
    );
}

#[test]
fn test_throw_flag_rejects_every_defined_value() {
    let (_coll, handle) = list(&["a"]);
    let inputs = vec![
        JsValue::Object(handle),
        JsValue::Object(FormElement::new().into_handle()),
        JsValue::Null,
        JsValue::Boolean(true),
        JsValue::Number(JsNumberType::Integer(0)),
        JsValue::String(String::new()),
    ];
    for p in ClientProfile::ALL.iter().filter(|p| !p.is_legacy()) {
        let caps = CapabilitySet::for_profile(*p);
        for input in &inputs {
            let err = Enumerator::construct(input, &caps).err().unwrap();
            assert_eq!(err.message(), "object is not enumerable");
        }
        assert!(Enumerator::construct(&JsValue::Undefined, &caps).is_ok());
    }
}

#[test]
fn test_throw_flag_can_be_switched_off() {
    let (_coll, handle) = list(&["a"]);
    let caps = CapabilitySet::for_profile(ClientProfile::Chrome)
        .without_feature(FeatureFlag::JsEnumeratorConstructorThrows);
    let e = Enumerator::construct(&JsValue::Object(handle), &caps).unwrap();
    assert!(!e.at_end());
}

#[test]
fn test_constructor_error_surfaces_through_dispatch() {
    let caps = CapabilitySet::for_profile(ClientProfile::Edge).with_feature(FeatureFlag::JsEnumerator);
    let mut ctx = EvalContext::with_capabilities(caps.clone());
    ctx.install_host_builtins(BuiltInRegistry::for_capabilities(&caps));
    let (_coll, handle) = list(&["a"]);
    let result = ctx
        .construct("Enumerator", vec![JsValue::Object(handle)])
        .unwrap();
    assert!(result.unwrap_err().is_type_error());
}

#[test]
fn test_methods_reject_foreign_receivers() {
    let mut ctx = legacy_ctx();
    let err = ctx
        .call_method("Enumerator", "atEnd", JsValue::Null, vec![])
        .unwrap()
        .unwrap_err();
    assert_eq!(
        err,
        JErrorType::TypeError("Enumerator.atEnd called on incompatible receiver".to_string())
    );
}

// ── Traversal invariant ──────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_at_end_tracks_moves(n in 0usize..24, k in 0usize..40) {
        let values = (0..n)
            .map(|i| JsValue::Number(JsNumberType::Integer(i as i64)))
            .collect();
        let handle = ElementCollection::from_values(values).into_handle();
        let mut e = Enumerator::construct(&JsValue::Object(handle.clone()), &legacy()).unwrap();
        e.move_first();
        for _ in 0..k {
            e.move_next();
        }
        prop_assert_eq!(e.at_end(), k >= n);
        if k < n {
            prop_assert_eq!(e.item(), JsValue::Number(JsNumberType::Integer(k as i64)));
        } else {
            prop_assert_eq!(e.item(), JsValue::Undefined);
        }
    }
}
