//! Host built-ins registration.

use tracing::debug;

use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::profile::CapabilitySet;

use super::enumerator;
use super::navigation;
use super::performance;
use super::timing;

/// Register every host class `capabilities` grants.
pub fn register_host_builtins(registry: &mut BuiltInRegistry, capabilities: &CapabilitySet) {
    debug!(
        profile = %capabilities.profile(),
        features = ?capabilities.features().collect::<Vec<_>>(),
        "resolving host builtins"
    );
    enumerator::register(registry, capabilities);
    performance::register(registry, capabilities);
    navigation::register(registry);
    timing::register(registry);
}
