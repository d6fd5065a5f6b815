//! Live element collections and the weak source view cursors read through.

use crate::runner::ds::object::{
    JsCollectionObject, JsObject, JsObjectType, JsWeakObjectType, ObjectBase, ObjectType,
};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::value::{JsNumberType, JsValue};
use std::cell::RefCell;
use std::rc::Rc;

lazy_static! {
    static ref COLLECTION_LENGTH_PROP: PropertyKey = PropertyKey::Str("length".to_string());
}

/// Ordered element list whose backing storage is shared by every handle
/// (and every shallow copy), so mutations are visible to all readers.
#[derive(Clone)]
pub struct ElementCollection {
    base: ObjectBase,
    nodes: Rc<RefCell<Vec<JsValue>>>,
}
impl ElementCollection {
    pub fn new() -> Self {
        ElementCollection {
            base: ObjectBase::new(),
            nodes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn from_values(values: Vec<JsValue>) -> Self {
        ElementCollection {
            base: ObjectBase::new(),
            nodes: Rc::new(RefCell::new(values)),
        }
    }

    pub fn push(&self, value: JsValue) {
        self.nodes.borrow_mut().push(value);
    }

    pub fn insert(&self, index: usize, value: JsValue) {
        let mut nodes = self.nodes.borrow_mut();
        let index = index.min(nodes.len());
        nodes.insert(index, value);
    }

    pub fn remove(&self, index: usize) -> Option<JsValue> {
        let mut nodes = self.nodes.borrow_mut();
        if index < nodes.len() {
            Some(nodes.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&self) {
        self.nodes.borrow_mut().clear();
    }

    pub fn into_handle(self) -> JsObjectType {
        ObjectType::Collection(Box::new(self)).into_handle()
    }
}
impl Default for ElementCollection {
    fn default() -> Self {
        Self::new()
    }
}
impl JsObject for ElementCollection {
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
        "HTMLCollection"
    }

    fn clone_object(&self) -> ObjectType {
        ObjectType::Collection(Box::new(self.clone()))
    }

    fn get(&self, property: &PropertyKey) -> JsValue {
        match property {
            PropertyKey::Int(idx) => self.item(*idx as usize),
            p if p == &*COLLECTION_LENGTH_PROP => {
                JsValue::Number(JsNumberType::Integer(self.length() as i64))
            }
            p => match self.get_own_property(p) {
                Some(pd) => pd.value.clone(),
                None => match self.get_prototype_of() {
                    None => JsValue::Undefined,
                    Some(proto) => (*proto).borrow().as_js_object().get(p),
                },
            },
        }
    }
}
impl JsCollectionObject for ElementCollection {
    fn as_js_collection_object(&self) -> &dyn JsCollectionObject {
        self
    }

    fn length(&self) -> usize {
        self.nodes.borrow().len()
    }

    fn item(&self, index: usize) -> JsValue {
        self.nodes
            .borrow()
            .get(index)
            .cloned()
            .unwrap_or(JsValue::Undefined)
    }
}

/// What a cursor enumerates. Holds no ownership of the collection: reads go
/// through a weak handle and observe the collection's current contents. A
/// collection that has been dropped reads as empty.
#[derive(Clone)]
pub enum EnumerableSource {
    Empty,
    Live(JsWeakObjectType),
}
impl EnumerableSource {
    pub fn live(handle: &JsObjectType) -> Self {
        EnumerableSource::Live(Rc::downgrade(handle))
    }

    pub fn is_attached(&self) -> bool {
        match self {
            EnumerableSource::Empty => false,
            EnumerableSource::Live(weak) => weak.strong_count() > 0,
        }
    }

    pub fn length(&self) -> usize {
        self.with_collection(|c| c.length()).unwrap_or(0)
    }

    pub fn get(&self, index: usize) -> JsValue {
        self.with_collection(|c| c.item(index))
            .unwrap_or(JsValue::Undefined)
    }

    fn with_collection<R>(&self, f: impl FnOnce(&dyn JsCollectionObject) -> R) -> Option<R> {
        match self {
            EnumerableSource::Empty => None,
            EnumerableSource::Live(weak) => {
                let handle = weak.upgrade()?;
                let obj = (*handle).borrow();
                let result = obj.as_js_collection_object().map(f);
                result
            }
        }
    }
}
