//! Core types for the plugin architecture.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{object_create, JsObjectType, ObjectType};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::host_resolver::HostPluginResolver;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::resolver::PluginResolver;
use crate::runner::plugin::super_global::SuperGlobalEnvironment;
use crate::runner::profile::CapabilitySet;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type SharedSuperGlobal = Rc<RefCell<SuperGlobalEnvironment>>;

/// Execution context passed to native functions.
///
/// Carries the session's capability set, the global object host objects are
/// scoped to, one prototype object per host class, and the super-global
/// environment that resolves host bindings.
pub struct EvalContext {
    pub global_this: Option<JsValue>,
    capabilities: CapabilitySet,
    prototypes: HashMap<String, JsObjectType>,
    super_global: SharedSuperGlobal,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::with_capabilities(CapabilitySet::default())
    }

    pub fn with_capabilities(capabilities: CapabilitySet) -> Self {
        let window = ObjectType::Ordinary(Box::new(object_create(None))).into_handle();
        EvalContext {
            global_this: Some(JsValue::Object(window)),
            capabilities,
            prototypes: HashMap::new(),
            super_global: Rc::new(RefCell::new(SuperGlobalEnvironment::new())),
        }
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn global_object(&self) -> Option<JsObjectType> {
        self.global_this.as_ref().and_then(|g| g.as_object().cloned())
    }

    /// Prototype object shared by every instance of `class_name` in this
    /// context. Created on first request.
    pub fn prototype_for(&mut self, class_name: &str) -> JsObjectType {
        self.prototypes
            .entry(class_name.to_string())
            .or_insert_with(|| ObjectType::Ordinary(Box::new(object_create(None))).into_handle())
            .clone()
    }

    /// Wraps a freshly built host object in a handle scoped to the global
    /// object and linked to its class prototype.
    pub fn adopt_host_object(&mut self, class_name: &str, mut obj: ObjectType) -> JsObjectType {
        let prototype = self.prototype_for(class_name);
        let scope = self.global_object();
        {
            let js_obj = obj.as_js_object_mut();
            js_obj.set_parent_scope(scope);
            js_obj.set_prototype_of(Some(prototype));
        }
        obj.into_handle()
    }

    pub fn add_resolver(&mut self, resolver: Box<dyn PluginResolver>) {
        self.super_global.borrow_mut().add_resolver(resolver);
    }

    pub fn install_host_builtins(&mut self, registry: BuiltInRegistry) {
        self.add_resolver(Box::new(HostPluginResolver::new(registry)));
    }

    pub fn super_global(&self) -> SharedSuperGlobal {
        self.super_global.clone()
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.super_global.borrow().has_name(name)
    }

    pub fn get_binding(&mut self, name: &str) -> Result<JsValue, JErrorType> {
        let sg = self.super_global.clone();
        let result = sg.borrow_mut().resolve_binding(name, self);
        result
    }

    pub fn call_method(
        &mut self,
        object_name: &str,
        method_name: &str,
        this: JsValue,
        args: Vec<JsValue>,
    ) -> Option<Result<JsValue, JErrorType>> {
        let sg = self.super_global.clone();
        let result = sg
            .borrow()
            .call_method(object_name, method_name, self, this, args);
        result
    }

    pub fn call_getter(
        &mut self,
        object_name: &str,
        getter_name: &str,
        this: JsValue,
    ) -> Option<Result<JsValue, JErrorType>> {
        let sg = self.super_global.clone();
        let result = sg.borrow().call_getter(object_name, getter_name, self, this);
        result
    }

    pub fn construct(
        &mut self,
        object_name: &str,
        args: Vec<JsValue>,
    ) -> Option<Result<JsValue, JErrorType>> {
        let sg = self.super_global.clone();
        let result = sg.borrow().call_constructor(object_name, self, args);
        result
    }

    /// Calls `method_name` on a host value, dispatching on its class.
    /// `None` when the class has no such method for this context.
    pub fn invoke(
        &mut self,
        this: &JsValue,
        method_name: &str,
        args: Vec<JsValue>,
    ) -> Option<Result<JsValue, JErrorType>> {
        let class_name = class_name_of(this)?;
        self.call_method(&class_name, method_name, this.clone(), args)
    }

    /// Reads `property` from a value: a host getter of its class if one is
    /// registered, the object's own or inherited data property otherwise.
    pub fn get_property(&mut self, this: &JsValue, property: &str) -> Result<JsValue, JErrorType> {
        let class_name = match class_name_of(this) {
            Some(c) => c,
            None => return Ok(JsValue::Undefined),
        };
        if let Some(result) = self.call_getter(&class_name, property, this.clone()) {
            return result;
        }
        match this {
            JsValue::Object(o) => Ok((**o)
                .borrow()
                .as_js_object()
                .get(&PropertyKey::Str(property.to_string()))),
            _ => Ok(JsValue::Undefined),
        }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn class_name_of(v: &JsValue) -> Option<String> {
    v.as_object()
        .map(|o| (**o).borrow().as_js_object().class_name().to_string())
}

/// Function signature for built-in methods.
/// Native functions receive the evaluation context, `this` value, and arguments.
pub type NativeFn = fn(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JErrorType>;

pub type PluginFn =
    Box<dyn Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType> + Send + Sync>;

/// Built-in function - either compiled-in or plugin-provided.
pub enum BuiltInFn {
    /// Direct function pointer - zero overhead for compiled-in functions.
    Native(NativeFn),

    /// Closure-backed function, used where one body serves many members.
    Plugin(PluginFn),
}

impl BuiltInFn {
    /// Execute this built-in function.
    pub fn call(
        &self,
        ctx: &mut EvalContext,
        this: JsValue,
        args: Vec<JsValue>,
    ) -> Result<JsValue, JErrorType> {
        match self {
            BuiltInFn::Native(f) => f(ctx, this, args),
            BuiltInFn::Plugin(f) => f(ctx, this, args),
        }
    }
}

/// Built-in object definition.
/// Represents a host class such as `Enumerator` or `Performance`.
pub struct BuiltInObject {
    /// Name of the object (e.g., "Enumerator", "Performance").
    pub name: String,

    /// Parent prototype name, if any (e.g., "EventTarget").
    pub prototype: Option<String>,

    /// Methods defined on this object or its prototype.
    pub methods: HashMap<String, BuiltInFn>,

    /// Read-only accessor properties.
    pub getters: HashMap<String, BuiltInFn>,

    /// Static properties.
    pub properties: HashMap<String, JsValue>,

    /// Constructor function, if this object is constructable.
    pub constructor: Option<BuiltInFn>,
}

impl BuiltInObject {
    /// Create a new built-in object with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        BuiltInObject {
            name: name.into(),
            prototype: Some("Object".to_string()),
            methods: HashMap::new(),
            getters: HashMap::new(),
            properties: HashMap::new(),
            constructor: None,
        }
    }

    /// Set the prototype chain parent.
    pub fn with_prototype(mut self, prototype: impl Into<String>) -> Self {
        self.prototype = Some(prototype.into());
        self
    }

    /// Add a native method.
    pub fn add_method(mut self, name: impl Into<String>, func: NativeFn) -> Self {
        self.methods.insert(name.into(), BuiltInFn::Native(func));
        self
    }

    /// Add a native getter.
    pub fn add_getter(mut self, name: impl Into<String>, func: NativeFn) -> Self {
        self.getters.insert(name.into(), BuiltInFn::Native(func));
        self
    }

    /// Add a closure-backed getter.
    pub fn add_plugin_getter<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JErrorType>
            + Send
            + Sync
            + 'static,
    {
        self.getters
            .insert(name.into(), BuiltInFn::Plugin(Box::new(func)));
        self
    }

    /// Add a property.
    pub fn add_property(mut self, name: impl Into<String>, value: JsValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Set the constructor function.
    pub fn with_constructor(mut self, constructor: NativeFn) -> Self {
        self.constructor = Some(BuiltInFn::Native(constructor));
        self
    }
}
