//! Plugin architecture and super-global scope.
//!
//! Host classes are never declared by scripts. They sit in a **super-global
//! scope** below the global object and are resolved on demand:
//!
//! ```text
//! Name lookup order:
//! 1. Global object (window)
//! 2. Super-global scope <- Enumerator, Performance, performance live here
//! ```
//!
//! ### Key Components
//!
//! - **[`BuiltInRegistry`]**: the host classes one capability set grants
//! - **[`PluginResolver`]**: trait for providing objects and members dynamically
//! - **[`HostPluginResolver`]**: adapter exposing a registry as a resolver
//! - **[`SuperGlobalEnvironment`]**: resolvers plus the per-name cache
//! - **[`EvalContext`]**: per-session state handed to every native function
//! - **[`BridgeConfig`]**: TOML file selecting the profile and feature overrides
//!
//! Members are dispatched by class name through the owning resolver, so a
//! class the registry does not hold simply has no members in that session.
//! That is how profile gating reaches scripts.
//!
//! ## Example
//!
//! ```
//! use hostbridge::runner::plugin::{BuiltInRegistry, EvalContext};
//! use hostbridge::runner::profile::{CapabilitySet, ClientProfile};
//!
//! let caps = CapabilitySet::for_profile(ClientProfile::Ie);
//! let mut ctx = EvalContext::with_capabilities(caps.clone());
//! ctx.install_host_builtins(BuiltInRegistry::for_capabilities(&caps));
//!
//! assert!(ctx.has_binding("performance"));
//! let perf = ctx.get_binding("performance").unwrap();
//! // `now()` is not part of the legacy profile.
//! assert!(ctx.invoke(&perf, "now", vec![]).is_none());
//! ```

pub mod config;
pub mod host_resolver;
pub mod registry;
pub mod resolver;
pub mod super_global;
pub mod types;

pub use config::BridgeConfig;
pub use host_resolver::HostPluginResolver;
pub use registry::{BuiltInRegistry, PluginError};
pub use resolver::PluginResolver;
pub use super_global::SuperGlobalEnvironment;
pub use types::{BuiltInFn, BuiltInObject, EvalContext, NativeFn};
