use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::value::JsValue;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

pub type JsObjectType = Rc<RefCell<ObjectType>>;

pub type JsWeakObjectType = Weak<RefCell<ObjectType>>;

pub enum ObjectType {
    Ordinary(Box<dyn JsObject>),
    Collection(Box<dyn JsCollectionObject>),
    Host(Box<dyn JsHostObject>),
}
impl ObjectType {
    pub fn is_enumerable_source(&self) -> bool {
        matches!(self, ObjectType::Collection(_))
    }

    pub fn as_js_object(&self) -> &dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o.as_super_trait(),
            ObjectType::Collection(o) => o.as_super_trait(),
            ObjectType::Host(o) => o.as_super_trait(),
        }
    }

    pub fn as_js_object_mut(&mut self) -> &mut dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o.as_super_trait_mut(),
            ObjectType::Collection(o) => o.as_super_trait_mut(),
            ObjectType::Host(o) => o.as_super_trait_mut(),
        }
    }

    pub fn as_js_collection_object(&self) -> Option<&dyn JsCollectionObject> {
        match self {
            ObjectType::Collection(o) => Some(o.as_js_collection_object()),
            _ => None,
        }
    }

    pub fn as_host<T: 'static>(&self) -> Option<&T> {
        match self {
            ObjectType::Host(o) => o.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn as_host_mut<T: 'static>(&mut self) -> Option<&mut T> {
        match self {
            ObjectType::Host(o) => o.as_any_mut().downcast_mut::<T>(),
            _ => None,
        }
    }

    /// Copies the object into a new, unshared object of the same kind.
    /// Property values are copied by handle, so nested objects stay shared.
    pub fn shallow_clone(&self) -> ObjectType {
        self.as_js_object().clone_object()
    }

    pub fn into_handle(self) -> JsObjectType {
        Rc::new(RefCell::new(self))
    }
}

#[derive(Clone)]
pub struct ObjectBase {
    properties: HashMap<PropertyKey, PropertyDescriptor>,
    prototype: Option<JsObjectType>,
    parent_scope: Option<JsObjectType>,
    case_sensitive: bool,
}
impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: HashMap::new(),
            prototype: None,
            parent_scope: None,
            case_sensitive: true,
        }
    }
}
impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

pub trait JsObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase;

    fn get_object_base(&self) -> &ObjectBase;

    fn as_super_trait(&self) -> &dyn JsObject;

    fn as_super_trait_mut(&mut self) -> &mut dyn JsObject;

    /// Class tag used by `[object <Class>]` rendering.
    fn class_name(&self) -> &str;

    fn clone_object(&self) -> ObjectType;

    /// A container that is not itself enumerable but owns a collection that is
    /// (a form and its controls). `None` for everything else.
    fn indirect_source(&self) -> Option<JsObjectType> {
        None
    }

    fn get_prototype_of(&self) -> Option<JsObjectType> {
        self.get_object_base().prototype.clone()
    }

    fn set_prototype_of(&mut self, prototype: Option<JsObjectType>) {
        self.get_object_base_mut().prototype = prototype;
    }

    fn get_parent_scope(&self) -> Option<JsObjectType> {
        self.get_object_base().parent_scope.clone()
    }

    fn set_parent_scope(&mut self, scope: Option<JsObjectType>) {
        self.get_object_base_mut().parent_scope = scope;
    }

    fn is_case_sensitive(&self) -> bool {
        self.get_object_base().case_sensitive
    }

    fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.get_object_base_mut().case_sensitive = case_sensitive;
    }

    /// Finds the stored key that `property` resolves to under this object's
    /// case mode.
    fn find_own_key(&self, property: &PropertyKey) -> Option<PropertyKey> {
        let base = self.get_object_base();
        if base.properties.contains_key(property) {
            return Some(property.clone());
        }
        if base.case_sensitive {
            return None;
        }
        base.properties
            .keys()
            .find(|k| k.matches(property, false))
            .cloned()
    }

    fn get_own_property(&self, property: &PropertyKey) -> Option<&PropertyDescriptor> {
        let key = self.find_own_key(property)?;
        self.get_object_base().properties.get(&key)
    }

    fn define_own_property(&mut self, property: PropertyKey, descriptor: PropertyDescriptor) -> bool {
        match self.find_own_key(&property) {
            Some(existing) => {
                let current = &self.get_object_base().properties[&existing];
                if !current.is_configurable() && *current != descriptor {
                    return false;
                }
                self.get_object_base_mut()
                    .properties
                    .insert(existing, descriptor);
                true
            }
            None => {
                self.get_object_base_mut()
                    .properties
                    .insert(property, descriptor);
                true
            }
        }
    }

    fn has_property(&self, property: &PropertyKey) -> bool {
        if self.get_own_property(property).is_some() {
            true
        } else {
            match &self.get_object_base().prototype {
                None => false,
                Some(o) => (**o).borrow().as_js_object().has_property(property),
            }
        }
    }

    fn get(&self, property: &PropertyKey) -> JsValue {
        match self.get_own_property(property) {
            Some(pd) => pd.value.clone(),
            None => match self.get_prototype_of() {
                None => JsValue::Undefined,
                Some(p) => (*p).borrow().as_js_object().get(property),
            },
        }
    }

    fn set(&mut self, property: PropertyKey, value: JsValue) -> bool {
        match self.find_own_key(&property) {
            Some(existing) => {
                let base = self.get_object_base_mut();
                match base.properties.get_mut(&existing) {
                    Some(pd) if pd.writable => {
                        pd.value = value;
                        true
                    }
                    _ => false,
                }
            }
            None => self.define_own_property(property, PropertyDescriptor::data(value)),
        }
    }

    fn delete(&mut self, property: &PropertyKey) -> bool {
        match self.find_own_key(property) {
            None => true,
            Some(existing) => {
                if self.get_object_base().properties[&existing].is_configurable() {
                    self.get_object_base_mut().properties.remove(&existing);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn own_property_keys(&self) -> Vec<PropertyKey> {
        let mut int_keys = vec![];
        let mut str_keys = vec![];
        for key in self.get_object_base().properties.keys() {
            match key {
                PropertyKey::Str(d) => {
                    str_keys.push(d.to_string());
                }
                PropertyKey::Int(d) => {
                    int_keys.push(*d);
                }
            }
        }
        int_keys.sort_unstable();
        str_keys.sort();

        let mut result = vec![];
        result.extend(int_keys.into_iter().map(PropertyKey::Int));
        result.extend(str_keys.into_iter().map(PropertyKey::Str));
        result
    }

    fn to_string(&self) -> String {
        format!("[object {}]", self.class_name())
    }
}

/// An ordered collection with live length and indexed access.
pub trait JsCollectionObject: JsObject {
    fn as_js_collection_object(&self) -> &dyn JsCollectionObject;

    fn length(&self) -> usize;

    /// Element at `index`, or `Undefined` past the end.
    fn item(&self, index: usize) -> JsValue;
}

/// A native object whose Rust type is recovered by downcasting at the
/// member call site.
pub trait JsHostObject: JsObject {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Plain script object.
#[derive(Clone)]
pub struct SimpleObject {
    base: ObjectBase,
}
impl SimpleObject {
    pub fn new() -> Self {
        SimpleObject {
            base: ObjectBase::new(),
        }
    }
}
impl Default for SimpleObject {
    fn default() -> Self {
        Self::new()
    }
}
impl JsObject for SimpleObject {
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
        "Object"
    }

    fn clone_object(&self) -> ObjectType {
        ObjectType::Ordinary(Box::new(self.clone()))
    }
}

pub fn object_create(proto: Option<JsObjectType>) -> SimpleObject {
    let mut obj = SimpleObject::new();
    obj.set_prototype_of(proto);
    obj
}

/// Builds a plain object out of `(name, value)` pairs, e.g. for `toJSON`.
pub fn object_from_entries<I>(entries: I) -> JsObjectType
where
    I: IntoIterator<Item = (String, JsValue)>,
{
    let mut obj = SimpleObject::new();
    for (name, value) in entries {
        obj.define_own_property(PropertyKey::Str(name), PropertyDescriptor::data(value));
    }
    ObjectType::Ordinary(Box::new(obj)).into_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::value::JsNumberType;

    #[test]
    fn test_case_insensitive_lookup() {
        let mut obj = SimpleObject::new();
        obj.set(PropertyKey::from("Name"), JsValue::String("x".to_string()));
        assert_eq!(obj.get(&PropertyKey::from("name")), JsValue::Undefined);
        obj.set_case_sensitive(false);
        assert_eq!(
            obj.get(&PropertyKey::from("name")),
            JsValue::String("x".to_string())
        );
    }

    #[test]
    fn test_case_insensitive_set_updates_existing_key() {
        let mut obj = SimpleObject::new();
        obj.set(PropertyKey::from("Name"), JsValue::Boolean(true));
        obj.set_case_sensitive(false);
        obj.set(PropertyKey::from("NAME"), JsValue::Boolean(false));
        assert_eq!(obj.own_property_keys(), vec![PropertyKey::from("Name")]);
        assert_eq!(obj.get(&PropertyKey::from("Name")), JsValue::Boolean(false));
    }

    #[test]
    fn test_prototype_chain_lookup() {
        let mut proto = SimpleObject::new();
        proto.set(
            PropertyKey::from("answer"),
            JsValue::Number(JsNumberType::Integer(42)),
        );
        let proto = ObjectType::Ordinary(Box::new(proto)).into_handle();
        let obj = object_create(Some(proto));
        assert!(obj.has_property(&PropertyKey::from("answer")));
        assert_eq!(
            obj.get(&PropertyKey::from("answer")),
            JsValue::Number(JsNumberType::Integer(42))
        );
    }

    #[test]
    fn test_read_only_property_rejects_writes() {
        let mut obj = SimpleObject::new();
        obj.define_own_property(
            PropertyKey::from("k"),
            PropertyDescriptor::read_only(JsValue::Null),
        );
        assert!(!obj.set(PropertyKey::from("k"), JsValue::Boolean(true)));
        assert!(!obj.delete(&PropertyKey::from("k")));
        assert_eq!(obj.get(&PropertyKey::from("k")), JsValue::Null);
    }

    #[test]
    fn test_shallow_clone_is_detached() {
        let mut obj = SimpleObject::new();
        obj.set(PropertyKey::from("a"), JsValue::Boolean(true));
        let original = ObjectType::Ordinary(Box::new(obj)).into_handle();
        let copy = original.borrow().shallow_clone().into_handle();
        copy.borrow_mut()
            .as_js_object_mut()
            .set(PropertyKey::from("a"), JsValue::Boolean(false));
        assert_eq!(
            original.borrow().as_js_object().get(&PropertyKey::from("a")),
            JsValue::Boolean(true)
        );
        assert!(!Rc::ptr_eq(&original, &copy));
    }
}
