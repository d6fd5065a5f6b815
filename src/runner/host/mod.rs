//! Host objects exposed to scripts.
//!
//! This module contains the script-visible bridge objects (`Enumerator`,
//! `Performance` and its sub-objects) and the small document stand-ins they
//! read from. Which of them exist, and with which members, is decided by the
//! session's [`CapabilitySet`](crate::runner::profile::CapabilitySet).

pub mod core;
pub mod dom;
pub mod enumerator;
pub mod navigation;
pub mod performance;
pub mod timing;

pub use self::core::register_host_builtins;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;

fn incompatible_receiver(class: &str, member: &str) -> JErrorType {
    JErrorType::TypeError(format!(
        "{}.{} called on incompatible receiver",
        class, member
    ))
}

/// Runs `f` against the host object behind `this`, if it is a `T`.
///
/// The receiver is only borrowed shared, so `f` may read other handles that
/// lead back to it (a cursor stored in its own collection).
///
/// Fails with a `TypeError` naming `class.member` when `this` is not an
/// object or holds a different host type.
pub(crate) fn with_host<T: 'static, R>(
    this: &JsValue,
    class: &str,
    member: &str,
    f: impl FnOnce(&T) -> R,
) -> Result<R, JErrorType> {
    let handle = this
        .as_object()
        .ok_or_else(|| incompatible_receiver(class, member))?;
    let obj = (**handle).borrow();
    let host = obj
        .as_host::<T>()
        .ok_or_else(|| incompatible_receiver(class, member))?;
    Ok(f(host))
}

/// Like [`with_host`], for members that change the host object.
pub(crate) fn with_host_mut<T: 'static, R>(
    this: &JsValue,
    class: &str,
    member: &str,
    f: impl FnOnce(&mut T) -> R,
) -> Result<R, JErrorType> {
    let handle = this
        .as_object()
        .ok_or_else(|| incompatible_receiver(class, member))?;
    let mut obj = (**handle).borrow_mut();
    let host = obj
        .as_host_mut::<T>()
        .ok_or_else(|| incompatible_receiver(class, member))?;
    Ok(f(host))
}
