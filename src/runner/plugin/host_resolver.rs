//! Host resolver: exposes a [`BuiltInRegistry`] through the super-global scope.
//!
//! Class names (`Enumerator`, `Performance`) resolve to proxy objects tagged
//! with the class name; member calls are dispatched back to the registry.
//! Instance names (`performance`) resolve by running the registered factory.

use tracing::debug;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObject, ObjectType, SimpleObject};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::resolver::PluginResolver;
use crate::runner::plugin::types::EvalContext;

/// Property naming the registry entry a class proxy stands for.
pub const BUILTIN_NAME_PROP: &str = "__builtin_name__";

/// Wraps a `BuiltInRegistry` as a `PluginResolver`.
pub struct HostPluginResolver {
    registry: BuiltInRegistry,
}

impl HostPluginResolver {
    pub fn new(registry: BuiltInRegistry) -> Self {
        HostPluginResolver { registry }
    }

    pub fn registry(&self) -> &BuiltInRegistry {
        &self.registry
    }

    fn class_proxy(&self, name: &str) -> JsValue {
        let mut obj = SimpleObject::new();
        obj.define_own_property(
            PropertyKey::Str(BUILTIN_NAME_PROP.to_string()),
            PropertyDescriptor {
                value: JsValue::String(name.to_string()),
                writable: false,
                enumerable: false,
                configurable: false,
            },
        );
        if let Some(builtin_obj) = self.registry.get_object(name) {
            for (prop_name, prop_value) in &builtin_obj.properties {
                obj.define_own_property(
                    PropertyKey::Str(prop_name.clone()),
                    PropertyDescriptor::read_only(prop_value.clone()),
                );
            }
        }
        JsValue::Object(ObjectType::Ordinary(Box::new(obj)).into_handle())
    }
}

impl PluginResolver for HostPluginResolver {
    fn has_binding(&self, name: &str) -> bool {
        self.registry.has_object(name) || self.registry.has_global(name)
    }

    fn resolve(&self, name: &str, ctx: &mut EvalContext) -> Result<JsValue, JErrorType> {
        if let Some(factory) = self.registry.get_global(name) {
            debug!(name, "creating host instance");
            return factory.call(ctx, JsValue::Undefined, vec![]);
        }
        if self.registry.has_object(name) {
            return Ok(self.class_proxy(name));
        }
        Err(JErrorType::ReferenceError(format!(
            "{} is not defined",
            name
        )))
    }

    fn call_method(
        &self,
        object_name: &str,
        method_name: &str,
        ctx: &mut EvalContext,
        this: JsValue,
        args: Vec<JsValue>,
    ) -> Option<Result<JsValue, JErrorType>> {
        self.registry
            .get_method(object_name, method_name)
            .map(|builtin_fn| builtin_fn.call(ctx, this, args))
    }

    fn call_getter(
        &self,
        object_name: &str,
        getter_name: &str,
        ctx: &mut EvalContext,
        this: JsValue,
    ) -> Option<Result<JsValue, JErrorType>> {
        self.registry
            .get_getter(object_name, getter_name)
            .map(|getter| getter.call(ctx, this, vec![]))
    }

    fn call_constructor(
        &self,
        object_name: &str,
        ctx: &mut EvalContext,
        args: Vec<JsValue>,
    ) -> Option<Result<JsValue, JErrorType>> {
        self.registry
            .get_constructor(object_name)
            .map(|ctor_fn| ctor_fn.call(ctx, JsValue::Undefined, args))
    }

    fn name(&self) -> &str {
        "host"
    }
}
