//! `Performance`: the window's timing object.
//!
//! `navigation` and `timing` are built lazily with opposite ownership:
//! `navigation` is minted on every read, `timing` once per host and then
//! returned by identity. Which members exist at all is decided by the
//! capability set the host was created with.

use std::any::Any;

use tracing::debug;

use super::navigation::{PerformanceNavigation, NAVIGATION_CLASS};
use super::timing::{PerformanceTiming, TIMING_CLASS};
use super::{with_host, with_host_mut};
use crate::runner::clock::monotonic_now_ms;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lazy_slot::{Factory, LazySlot};
use crate::runner::ds::object::{JsHostObject, JsObject, JsObjectType, ObjectBase, ObjectType};
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};
use crate::runner::profile::{CapabilitySet, FeatureFlag};

pub const PERFORMANCE_CLASS: &str = "Performance";
pub const EVENT_TARGET_CLASS: &str = "EventTarget";
/// Name of the window-level instance.
pub const PERFORMANCE_BINDING: &str = "performance";

/// Scope and prototype a sub-object is attached to when it is built.
pub struct SubObjectBinding {
    pub parent_scope: Option<JsObjectType>,
    pub prototype: Option<JsObjectType>,
}

fn bind<T: JsHostObject + 'static>(mut obj: T, binding: &SubObjectBinding) -> JsObjectType {
    obj.set_parent_scope(binding.parent_scope.clone());
    obj.set_prototype_of(binding.prototype.clone());
    ObjectType::Host(Box::new(obj)).into_handle()
}

fn build_navigation(binding: &SubObjectBinding) -> JsObjectType {
    bind(PerformanceNavigation::new(), binding)
}

fn build_timing(binding: &SubObjectBinding) -> JsObjectType {
    bind(PerformanceTiming::new(), binding)
}

#[derive(Clone)]
pub struct Performance {
    base: ObjectBase,
    capabilities: CapabilitySet,
    navigation: Factory<SubObjectBinding, JsObjectType>,
    timing: LazySlot<SubObjectBinding, JsObjectType>,
}

impl Performance {
    pub fn new(capabilities: CapabilitySet) -> Self {
        Performance {
            base: ObjectBase::new(),
            capabilities,
            navigation: Factory::new(build_navigation),
            timing: LazySlot::new(build_timing),
        }
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    fn binding(&self, prototype: Option<JsObjectType>) -> SubObjectBinding {
        SubObjectBinding {
            parent_scope: self.get_parent_scope(),
            prototype,
        }
    }

    /// A new `PerformanceNavigation` on every call, scoped like this host.
    pub fn navigation(&self, prototype: Option<JsObjectType>) -> Option<JsObjectType> {
        if !self.capabilities.has_feature(FeatureFlag::JsPerformanceNavigation) {
            return None;
        }
        Some(self.navigation.produce(&self.binding(prototype)))
    }

    /// The host's single `PerformanceTiming`, built on first call.
    /// `prototype` is only used for that first build.
    pub fn timing(&mut self, prototype: Option<JsObjectType>) -> Option<JsObjectType> {
        if !self.capabilities.has_feature(FeatureFlag::JsPerformanceTiming) {
            return None;
        }
        let binding = self.binding(prototype);
        Some(self.timing.get(&binding))
    }

    /// The timing object if it has been built already.
    pub fn timing_if_built(&self) -> Option<JsObjectType> {
        self.timing.peek().cloned()
    }

    pub fn now(&self) -> Option<f64> {
        if !self.capabilities.has_feature(FeatureFlag::JsPerformanceNow) {
            return None;
        }
        Some(monotonic_now_ms())
    }
}

impl JsObject for Performance {
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
        PERFORMANCE_CLASS
    }

    fn clone_object(&self) -> ObjectType {
        ObjectType::Host(Box::new(self.clone()))
    }
}

impl JsHostObject for Performance {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Register `Performance` as the capability set shapes it.
pub fn register(registry: &mut BuiltInRegistry, capabilities: &CapabilitySet) {
    let mut performance = BuiltInObject::new(PERFORMANCE_CLASS);
    if capabilities.has_feature(FeatureFlag::JsPerformanceConstructible) {
        registry.register_object(BuiltInObject::new(EVENT_TARGET_CLASS));
        performance = performance
            .with_prototype(EVENT_TARGET_CLASS)
            .with_constructor(performance_constructor);
    }
    if capabilities.has_feature(FeatureFlag::JsPerformanceNavigation) {
        performance = performance.add_getter("navigation", performance_navigation);
    }
    if capabilities.has_feature(FeatureFlag::JsPerformanceTiming) {
        performance = performance.add_getter("timing", performance_timing);
    }
    if capabilities.has_feature(FeatureFlag::JsPerformanceNow) {
        performance = performance.add_method("now", performance_now);
    }
    debug!(
        constructible = performance.constructor.is_some(),
        getters = performance.getters.len(),
        methods = performance.methods.len(),
        "registering Performance"
    );
    registry.register_object(performance);
    registry.register_global(PERFORMANCE_BINDING, create_performance);
}

fn create_performance(
    ctx: &mut EvalContext,
    _this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let performance = Performance::new(ctx.capabilities().clone());
    let handle = ctx.adopt_host_object(PERFORMANCE_CLASS, ObjectType::Host(Box::new(performance)));
    Ok(JsValue::Object(handle))
}

/// new Performance()
fn performance_constructor(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    create_performance(ctx, this, args)
}

fn performance_navigation(
    ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let prototype = ctx.prototype_for(NAVIGATION_CLASS);
    let navigation = with_host(&this, PERFORMANCE_CLASS, "navigation", |p: &Performance| {
        p.navigation(Some(prototype))
    })?;
    Ok(navigation.map(JsValue::Object).unwrap_or(JsValue::Undefined))
}

fn performance_timing(
    ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let prototype = ctx.prototype_for(TIMING_CLASS);
    let timing = with_host_mut(&this, PERFORMANCE_CLASS, "timing", |p: &mut Performance| {
        p.timing(Some(prototype))
    })?;
    Ok(timing.map(JsValue::Object).unwrap_or(JsValue::Undefined))
}

/// Performance.prototype.now
fn performance_now(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    let now = with_host(&this, PERFORMANCE_CLASS, "now", |p: &Performance| p.now())?;
    Ok(now
        .map(|ms| JsValue::Number(JsNumberType::Float(ms)))
        .unwrap_or(JsValue::Undefined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::profile::ClientProfile;
    use std::rc::Rc;

    #[test]
    fn test_timing_is_memoized_by_identity() {
        let mut perf = Performance::new(CapabilitySet::default());
        assert!(perf.timing_if_built().is_none());
        let a = perf.timing(None).unwrap();
        let b = perf.timing(None).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert!(Rc::ptr_eq(&a, &perf.timing_if_built().unwrap()));
    }

    #[test]
    fn test_navigation_is_fresh_each_time() {
        let perf = Performance::new(CapabilitySet::default());
        let a = perf.navigation(None).unwrap();
        let b = perf.navigation(None).unwrap();
        assert!(!Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_sub_objects_share_host_scope() {
        let scope = ObjectType::Ordinary(Box::new(
            crate::runner::ds::object::SimpleObject::new(),
        ))
        .into_handle();
        let mut perf = Performance::new(CapabilitySet::default());
        perf.set_parent_scope(Some(scope.clone()));
        let timing = perf.timing(None).unwrap();
        let timing_scope = (*timing).borrow().as_js_object().get_parent_scope();
        assert!(Rc::ptr_eq(&timing_scope.unwrap(), &scope));
    }

    #[test]
    fn test_legacy_host_has_no_clock() {
        let perf = Performance::new(CapabilitySet::for_profile(ClientProfile::Ie));
        assert!(perf.now().is_none());
        assert!(perf.navigation(None).is_some());
    }
}
