//! Super-global environment, the bottom of the scope chain.
//!
//! Host classes and host instances live here. Each name is resolved lazily on
//! first access and cached afterwards, so `performance` read twice yields the
//! same object.
//!
//! ```text
//! script: new Enumerator(form)
//!      |
//! 1. global object        -> not found
//! 2. super-global cache   -> miss
//! 3. resolvers, in order  -> "host" claims "Enumerator"
//! 4. cache the proxy, dispatch the constructor through the resolver
//! ```
//!
//! ## Example
//!
//! ```
//! use hostbridge::runner::plugin::super_global::SuperGlobalEnvironment;
//! use hostbridge::runner::plugin::resolver::PluginResolver;
//! use hostbridge::runner::plugin::types::EvalContext;
//! use hostbridge::runner::ds::value::{JsValue, JsNumberType};
//! use hostbridge::runner::ds::error::JErrorType;
//!
//! struct Answer;
//!
//! impl PluginResolver for Answer {
//!     fn has_binding(&self, name: &str) -> bool {
//!         name == "answer"
//!     }
//!
//!     fn resolve(&self, _name: &str, _ctx: &mut EvalContext) -> Result<JsValue, JErrorType> {
//!         Ok(JsValue::Number(JsNumberType::Integer(42)))
//!     }
//!
//!     fn call_method(&self, _obj: &str, _method: &str, _ctx: &mut EvalContext,
//!                    _this: JsValue, _args: Vec<JsValue>) -> Option<Result<JsValue, JErrorType>> {
//!         None
//!     }
//!
//!     fn name(&self) -> &str { "answer" }
//! }
//!
//! let mut ctx = EvalContext::new();
//! let mut sg = SuperGlobalEnvironment::new();
//! sg.add_resolver(Box::new(Answer));
//! assert!(sg.has_name("answer"));
//! assert_eq!(
//!     sg.resolve_binding("answer", &mut ctx).unwrap(),
//!     JsValue::Number(JsNumberType::Integer(42))
//! );
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::resolver::PluginResolver;
use crate::runner::plugin::types::EvalContext;

/// The super-global environment for lazy resolution of host objects.
///
/// Usually shared as [`SharedSuperGlobal`](super::types::SharedSuperGlobal)
/// from the evaluation context. Bindings are read-only from script.
pub struct SuperGlobalEnvironment {
    /// Registered resolvers, queried in order.
    resolvers: Vec<Box<dyn PluginResolver>>,
    /// Already-resolved bindings (name -> value).
    cache: HashMap<String, JsValue>,
    /// Which resolver index owns which name.
    resolver_map: HashMap<String, usize>,
}

impl SuperGlobalEnvironment {
    pub fn new() -> Self {
        SuperGlobalEnvironment {
            resolvers: Vec::new(),
            cache: HashMap::new(),
            resolver_map: HashMap::new(),
        }
    }

    /// Register a resolver. Resolvers are queried in registration order.
    pub fn add_resolver(&mut self, resolver: Box<dyn PluginResolver>) {
        debug!(resolver = resolver.name(), "adding super-global resolver");
        self.resolvers.push(resolver);
    }

    fn find_resolver_index(&self, name: &str) -> Option<usize> {
        if let Some(&idx) = self.resolver_map.get(name) {
            return Some(idx);
        }
        self.resolvers.iter().position(|r| r.has_binding(name))
    }

    /// Call a method of a host class, dispatching to the owning resolver.
    ///
    /// Returns `None` if no resolver owns `object_name` or the class has no
    /// such method.
    pub fn call_method(
        &self,
        object_name: &str,
        method_name: &str,
        ctx: &mut EvalContext,
        this: JsValue,
        args: Vec<JsValue>,
    ) -> Option<Result<JsValue, JErrorType>> {
        let idx = self.find_resolver_index(object_name)?;
        trace!(object_name, method_name, "dispatching host method");
        self.resolvers[idx].call_method(object_name, method_name, ctx, this, args)
    }

    /// Read an accessor of a host class.
    pub fn call_getter(
        &self,
        object_name: &str,
        getter_name: &str,
        ctx: &mut EvalContext,
        this: JsValue,
    ) -> Option<Result<JsValue, JErrorType>> {
        let idx = self.find_resolver_index(object_name)?;
        self.resolvers[idx].call_getter(object_name, getter_name, ctx, this)
    }

    /// Call the constructor of a host class.
    pub fn call_constructor(
        &self,
        object_name: &str,
        ctx: &mut EvalContext,
        args: Vec<JsValue>,
    ) -> Option<Result<JsValue, JErrorType>> {
        let idx = self.find_resolver_index(object_name)?;
        self.resolvers[idx].call_constructor(object_name, ctx, args)
    }

    /// Check if any resolver provides the given name.
    pub fn has_name(&self, name: &str) -> bool {
        self.cache.contains_key(name) || self.find_resolver_index(name).is_some()
    }

    /// Resolve a name, caching the result.
    pub fn resolve_binding(
        &mut self,
        name: &str,
        ctx: &mut EvalContext,
    ) -> Result<JsValue, JErrorType> {
        if let Some(val) = self.cache.get(name) {
            return Ok(val.clone());
        }

        match self.find_resolver_index(name) {
            Some(idx) => {
                debug!(
                    name,
                    resolver = self.resolvers[idx].name(),
                    "materializing super-global binding"
                );
                let value = self.resolvers[idx].resolve(name, ctx)?;
                self.cache.insert(name.to_string(), value.clone());
                self.resolver_map.insert(name.to_string(), idx);
                Ok(value)
            }
            None => Err(JErrorType::ReferenceError(format!(
                "{} is not defined",
                name
            ))),
        }
    }

    /// Names resolved so far.
    pub fn cached_names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.cache.keys().collect();
        names.sort();
        names
    }

    /// Get a reference to the resolvers (for inspection/testing).
    pub fn resolvers(&self) -> &[Box<dyn PluginResolver>] {
        &self.resolvers
    }
}

impl Default for SuperGlobalEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
