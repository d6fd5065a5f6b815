//! # hostbridge - scripting-host object bridge
//!
//! Native collection and timing facilities exposed to an embedded script
//! engine as host objects whose shape depends on the simulated client:
//! - `Enumerator`, a restartable cursor over a live collection
//! - `Performance`, with lazily built `navigation` and `timing` sub-objects
//!   and a monotonic `now()`
//! - a [`CapabilitySet`](runner::profile::CapabilitySet) resolved once per
//!   session from a [`ClientProfile`](runner::profile::ClientProfile)
//!
//! ## Quick Start
//!
//! ```
//! use hostbridge::runner::ds::collection::ElementCollection;
//! use hostbridge::runner::ds::value::{JsNumberType, JsValue};
//! use hostbridge::runner::plugin::registry::BuiltInRegistry;
//! use hostbridge::runner::plugin::types::EvalContext;
//! use hostbridge::runner::profile::{CapabilitySet, ClientProfile};
//!
//! let caps = CapabilitySet::for_profile(ClientProfile::Ie);
//! let mut ctx = EvalContext::with_capabilities(caps.clone());
//! ctx.install_host_builtins(BuiltInRegistry::for_capabilities(&caps));
//!
//! let items = ElementCollection::from_values(vec![
//!     JsValue::Number(JsNumberType::Integer(1)),
//!     JsValue::Number(JsNumberType::Integer(2)),
//! ])
//! .into_handle();
//!
//! let cursor = ctx
//!     .construct("Enumerator", vec![JsValue::Object(items)])
//!     .unwrap()
//!     .unwrap();
//! let first = ctx.invoke(&cursor, "item", vec![]).unwrap().unwrap();
//! assert_eq!(first, JsValue::Number(JsNumberType::Integer(1)));
//! ```
//!
//! ## Super-Global Scope
//!
//! Host classes are not preloaded into the global object. A
//! [`PluginResolver`](runner::plugin::resolver::PluginResolver) claims their
//! names and the super-global environment materializes each one on first
//! reference, then caches it. Members are dispatched by class name through
//! the resolver, so a member the capability set does not grant is simply
//! absent.
//!
//! ## Architecture
//!
//! - **[`runner::ds`]** - values, objects, live collections, lazy slots
//! - **[`runner::profile`]** - client profiles, feature flags, capability sets
//! - **[`runner::host`]** - `Enumerator`, `Performance` and friends
//! - **[`runner::plugin`]** - registry, resolvers, super-global scope, config

#[macro_use]
extern crate lazy_static;

pub mod runner;
