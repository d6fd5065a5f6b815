//! Host object runtime: object model, profiles, host classes and the plugin
//! layer that exposes them.

pub mod clock;
pub mod ds;
pub mod host;
pub mod plugin;
pub mod profile;
