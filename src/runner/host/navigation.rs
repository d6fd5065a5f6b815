//! `PerformanceNavigation`: how the current page was reached.

use std::any::Any;

use super::with_host;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{object_from_entries, JsHostObject, JsObject, ObjectBase, ObjectType};
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

pub const NAVIGATION_CLASS: &str = "PerformanceNavigation";

pub const TYPE_NAVIGATE: u16 = 0;
pub const TYPE_RELOAD: u16 = 1;
pub const TYPE_BACK_FORWARD: u16 = 2;
pub const TYPE_RESERVED: u16 = 255;

#[derive(Clone)]
pub struct PerformanceNavigation {
    base: ObjectBase,
    navigation_type: u16,
    redirect_count: u32,
}

impl PerformanceNavigation {
    pub fn new() -> Self {
        PerformanceNavigation {
            base: ObjectBase::new(),
            navigation_type: TYPE_NAVIGATE,
            redirect_count: 0,
        }
    }

    pub fn navigation_type(&self) -> u16 {
        self.navigation_type
    }

    pub fn set_navigation_type(&mut self, navigation_type: u16) {
        self.navigation_type = navigation_type;
    }

    pub fn redirect_count(&self) -> u32 {
        self.redirect_count
    }

    pub fn set_redirect_count(&mut self, redirect_count: u32) {
        self.redirect_count = redirect_count;
    }

    pub fn to_json(&self) -> JsValue {
        JsValue::Object(object_from_entries(vec![
            ("type".to_string(), int(self.navigation_type as i64)),
            ("redirectCount".to_string(), int(self.redirect_count as i64)),
        ]))
    }
}

impl Default for PerformanceNavigation {
    fn default() -> Self {
        Self::new()
    }
}

impl JsObject for PerformanceNavigation {
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
        NAVIGATION_CLASS
    }

    fn clone_object(&self) -> ObjectType {
        ObjectType::Host(Box::new(self.clone()))
    }
}

impl JsHostObject for PerformanceNavigation {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn int(n: i64) -> JsValue {
    JsValue::Number(JsNumberType::Integer(n))
}

pub fn register(registry: &mut BuiltInRegistry) {
    let navigation = BuiltInObject::new(NAVIGATION_CLASS)
        .add_property("TYPE_NAVIGATE", int(TYPE_NAVIGATE as i64))
        .add_property("TYPE_RELOAD", int(TYPE_RELOAD as i64))
        .add_property("TYPE_BACK_FORWARD", int(TYPE_BACK_FORWARD as i64))
        .add_property("TYPE_RESERVED", int(TYPE_RESERVED as i64))
        .add_getter("type", navigation_type)
        .add_getter("redirectCount", navigation_redirect_count)
        .add_method("toJSON", navigation_to_json);

    registry.register_object(navigation);
}

fn navigation_type(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    with_host(&this, NAVIGATION_CLASS, "type", |n: &PerformanceNavigation| {
        int(n.navigation_type() as i64)
    })
}

fn navigation_redirect_count(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    with_host(
        &this,
        NAVIGATION_CLASS,
        "redirectCount",
        |n: &PerformanceNavigation| int(n.redirect_count() as i64),
    )
}

fn navigation_to_json(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    with_host(&this, NAVIGATION_CLASS, "toJSON", |n: &PerformanceNavigation| {
        n.to_json()
    })
}
