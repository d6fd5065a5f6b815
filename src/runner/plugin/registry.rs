//! Built-in registry for managing host objects.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use super::config::BridgeConfig;
use super::types::{BuiltInFn, BuiltInObject, NativeFn};
use crate::runner::host::register_host_builtins;
use crate::runner::profile::CapabilitySet;

/// Error type for plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Configuration file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration file is not valid TOML for this schema.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    /// Profile name not recognised.
    #[error("Unknown client profile: {0}")]
    UnknownProfile(String),
    /// Feature flag name not recognised.
    #[error("Unknown feature flag: {0}")]
    UnknownFeature(String),
}

/// Registry for host objects.
/// Holds the classes a capability set grants, their members, and factories
/// for global instance bindings (e.g. the window's `performance`).
pub struct BuiltInRegistry {
    /// All registered built-in objects.
    objects: HashMap<String, BuiltInObject>,

    /// Factories for super-global instances, keyed by binding name.
    globals: HashMap<String, BuiltInFn>,
}

impl BuiltInRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        BuiltInRegistry {
            objects: HashMap::new(),
            globals: HashMap::new(),
        }
    }

    /// Create a registry holding every host class `capabilities` grants.
    pub fn for_capabilities(capabilities: &CapabilitySet) -> Self {
        let mut registry = Self::new();

        register_host_builtins(&mut registry, capabilities);
        debug!(
            profile = %capabilities.profile(),
            objects = registry.objects.len(),
            globals = registry.globals.len(),
            "registered host builtins"
        );
        registry
    }

    /// Create a registry from a loaded configuration.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, PluginError> {
        Ok(Self::for_capabilities(&config.capabilities()?))
    }

    /// Register a built-in object (programmatic API).
    pub fn register_object(&mut self, obj: BuiltInObject) {
        self.objects.insert(obj.name.clone(), obj);
    }

    /// Register a factory for a super-global instance binding.
    pub fn register_global(&mut self, name: impl Into<String>, factory: NativeFn) {
        self.globals.insert(name.into(), BuiltInFn::Native(factory));
    }

    /// Get a registered object by name.
    pub fn get_object(&self, name: &str) -> Option<&BuiltInObject> {
        self.objects.get(name)
    }

    /// Get a built-in function for execution.
    pub fn get_method(&self, object: &str, method: &str) -> Option<&BuiltInFn> {
        self.objects
            .get(object)
            .and_then(|obj| obj.methods.get(method))
    }

    /// Get a getter for a property.
    pub fn get_getter(&self, object: &str, property: &str) -> Option<&BuiltInFn> {
        self.objects
            .get(object)
            .and_then(|obj| obj.getters.get(property))
    }

    /// Get a constructor function for an object.
    pub fn get_constructor(&self, object: &str) -> Option<&BuiltInFn> {
        self.objects
            .get(object)
            .and_then(|obj| obj.constructor.as_ref())
    }

    /// Get the factory for a super-global instance.
    pub fn get_global(&self, name: &str) -> Option<&BuiltInFn> {
        self.globals.get(name)
    }

    /// Check if an object exists in the registry.
    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Check if a super-global instance exists in the registry.
    pub fn has_global(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }

    /// Check if a method exists on an object.
    pub fn has_method(&self, object: &str, method: &str) -> bool {
        self.get_method(object, method).is_some()
    }

    /// Check if a getter exists on an object.
    pub fn has_getter(&self, object: &str, property: &str) -> bool {
        self.get_getter(object, property).is_some()
    }

    /// Check if an object can be constructed with `new`.
    pub fn is_constructible(&self, object: &str) -> bool {
        self.get_constructor(object).is_some()
    }

    /// Names on the prototype chain of `object`, starting with itself.
    /// The walk ends at the first parent that is not registered.
    pub fn prototype_chain(&self, object: &str) -> Vec<String> {
        let mut chain = vec![];
        let mut current = Some(object.to_string());
        while let Some(name) = current {
            if chain.contains(&name) {
                break;
            }
            current = self.objects.get(&name).and_then(|o| o.prototype.clone());
            chain.push(name);
        }
        chain
    }

    /// Get list of all registered object names, sorted.
    pub fn object_names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.objects.keys().collect();
        names.sort();
        names
    }
}

impl Default for BuiltInRegistry {
    fn default() -> Self {
        Self::for_capabilities(&CapabilitySet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prototype_chain_stops_at_unregistered_parent() {
        let mut registry = BuiltInRegistry::new();
        registry.register_object(BuiltInObject::new("A").with_prototype("B"));
        registry.register_object(BuiltInObject::new("B"));
        assert_eq!(registry.prototype_chain("A"), vec!["A", "B", "Object"]);
    }

    #[test]
    fn test_default_registry_holds_host_builtins() {
        let registry = BuiltInRegistry::default();
        assert!(registry.has_object("Performance"));
        assert!(!registry.has_object("Enumerator"));
        assert!(registry.has_global("performance"));
        assert!(registry.get_global("navigator").is_none());
        assert!(!registry.has_method("Performance", "x"));
    }
}
