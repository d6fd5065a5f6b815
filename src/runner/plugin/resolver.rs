//! Plugin resolver trait for lazy resolution of super-global host objects.
//!
//! Resolvers provide the names a script sees without declaring them
//! (`Enumerator`, `Performance`, `performance`). A name is only materialized
//! when something asks for it.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;

/// A resolver that can provide named host objects and their members.
///
/// Resolvers are queried in registration order when a name lookup reaches the
/// super-global scope. The first resolver that claims a name wins.
pub trait PluginResolver {
    /// Does this resolver provide a binding with the given name?
    ///
    /// Must not materialize the object.
    fn has_binding(&self, name: &str) -> bool;

    /// Materialize the object for the given name.
    ///
    /// Called only after `has_binding` returns `true`. The result is cached by
    /// the super-global environment.
    fn resolve(&self, name: &str, ctx: &mut EvalContext) -> Result<JsValue, JErrorType>;

    /// Call `method_name` of class `object_name` with the given receiver.
    ///
    /// Returns `None` if the class does not have the method in this session.
    fn call_method(
        &self,
        object_name: &str,
        method_name: &str,
        ctx: &mut EvalContext,
        this: JsValue,
        args: Vec<JsValue>,
    ) -> Option<Result<JsValue, JErrorType>>;

    /// Read accessor `getter_name` of class `object_name` on the receiver.
    fn call_getter(
        &self,
        _object_name: &str,
        _getter_name: &str,
        _ctx: &mut EvalContext,
        _this: JsValue,
    ) -> Option<Result<JsValue, JErrorType>> {
        None
    }

    /// Run the constructor of `object_name`, if it has one.
    fn call_constructor(
        &self,
        _object_name: &str,
        _ctx: &mut EvalContext,
        _args: Vec<JsValue>,
    ) -> Option<Result<JsValue, JErrorType>> {
        None
    }

    /// Human-readable name for this resolver (for logging).
    fn name(&self) -> &str;
}
