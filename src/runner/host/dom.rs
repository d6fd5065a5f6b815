//! Minimal document stand-ins: elements and forms.
//!
//! Just enough of a document tree for cursors to walk. A form keeps its
//! controls in a live `elements` collection and hands that collection out
//! as its indirect enumerable source.

use std::any::Any;

use crate::runner::ds::collection::ElementCollection;
use crate::runner::ds::object::{
    JsCollectionObject, JsHostObject, JsObject, JsObjectType, ObjectBase, ObjectType,
};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::value::JsValue;

lazy_static! {
    static ref ELEMENT_CLASSES: Vec<(&'static str, &'static str)> = vec![
        ("a", "HTMLAnchorElement"),
        ("button", "HTMLButtonElement"),
        ("div", "HTMLDivElement"),
        ("form", "HTMLFormElement"),
        ("input", "HTMLInputElement"),
        ("li", "HTMLLIElement"),
        ("option", "HTMLOptionElement"),
        ("p", "HTMLParagraphElement"),
        ("select", "HTMLSelectElement"),
        ("span", "HTMLSpanElement"),
        ("textarea", "HTMLTextAreaElement"),
    ];
}

fn class_for_tag(tag: &str) -> &'static str {
    ELEMENT_CLASSES
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(tag))
        .map(|(_, c)| *c)
        .unwrap_or("HTMLElement")
}

/// A document element. Attributes are plain own properties; `tagName` is
/// read-only.
#[derive(Clone)]
pub struct ElementObject {
    base: ObjectBase,
    class_name: &'static str,
}
impl ElementObject {
    pub fn new(tag: &str) -> Self {
        let mut element = ElementObject {
            base: ObjectBase::new(),
            class_name: class_for_tag(tag),
        };
        element.define_own_property(
            PropertyKey::from("tagName"),
            PropertyDescriptor::read_only(JsValue::String(tag.to_ascii_uppercase())),
        );
        element
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set(PropertyKey::from(name), JsValue::String(value.to_string()));
        self
    }

    pub fn into_handle(self) -> JsObjectType {
        ObjectType::Host(Box::new(self)).into_handle()
    }
}
impl JsObject for ElementObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn as_super_trait(&self) -> &dyn JsObject {
        self
    }

    fn as_super_trait_mut(&mut self) -> &mut dyn JsObject {
        self
    }

    fn class_name(&self) -> &str {
        self.class_name
    }

    fn clone_object(&self) -> ObjectType {
        ObjectType::Host(Box::new(self.clone()))
    }
}
impl JsHostObject for ElementObject {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A `<form>`. Not a collection itself; cursors bind to its `elements`.
#[derive(Clone)]
pub struct FormElement {
    base: ObjectBase,
    controls: ElementCollection,
    elements: JsObjectType,
}
impl FormElement {
    pub fn new() -> Self {
        let controls = ElementCollection::new();
        let elements = controls.clone().into_handle();
        let mut form = FormElement {
            base: ObjectBase::new(),
            controls,
            elements: elements.clone(),
        };
        form.define_own_property(
            PropertyKey::from("tagName"),
            PropertyDescriptor::read_only(JsValue::String("FORM".to_string())),
        );
        form.define_own_property(
            PropertyKey::from("elements"),
            PropertyDescriptor::read_only(JsValue::Object(elements)),
        );
        form
    }

    /// Appends a control to the form's live `elements` collection.
    pub fn add_control(&self, control: JsValue) {
        self.controls.push(control);
    }

    pub fn elements(&self) -> JsObjectType {
        self.elements.clone()
    }

    pub fn control_count(&self) -> usize {
        self.controls.length()
    }

    pub fn into_handle(self) -> JsObjectType {
        ObjectType::Host(Box::new(self)).into_handle()
    }
}
impl Default for FormElement {
    fn default() -> Self {
        Self::new()
    }
}
impl JsObject for FormElement {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn as_super_trait(&self) -> &dyn JsObject {
        self
    }

    fn as_super_trait_mut(&mut self) -> &mut dyn JsObject {
        self
    }

    fn class_name(&self) -> &str {
        "HTMLFormElement"
    }

    fn clone_object(&self) -> ObjectType {
        ObjectType::Host(Box::new(self.clone()))
    }

    fn indirect_source(&self) -> Option<JsObjectType> {
        Some(self.elements.clone())
    }
}
impl JsHostObject for FormElement {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
