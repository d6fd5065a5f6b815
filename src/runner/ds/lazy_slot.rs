//! Deferred construction of host sub-objects.
//!
//! Two ownership policies share the same builder shape so the difference is
//! visible at the declaration site:
//!
//! - [`LazySlot`] builds on first access and hands out the same value forever.
//! - [`Factory`] builds on every access and keeps nothing.

use tracing::trace;

pub type Builder<A, T> = fn(&A) -> T;

/// Memoizing slot: the builder runs at most once.
pub struct LazySlot<A, T: Clone> {
    build: Builder<A, T>,
    value: Option<T>,
}

impl<A, T: Clone> LazySlot<A, T> {
    pub fn new(build: Builder<A, T>) -> Self {
        LazySlot { build, value: None }
    }

    pub fn get(&mut self, args: &A) -> T {
        if let Some(v) = &self.value {
            return v.clone();
        }
        trace!("materializing lazy slot");
        let v = (self.build)(args);
        self.value = Some(v.clone());
        v
    }

    pub fn peek(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }
}

impl<A, T: Clone> Clone for LazySlot<A, T> {
    fn clone(&self) -> Self {
        LazySlot {
            build: self.build,
            value: self.value.clone(),
        }
    }
}

/// Non-memoizing builder: every call yields a new value.
pub struct Factory<A, T> {
    build: Builder<A, T>,
}

impl<A, T> Factory<A, T> {
    pub fn new(build: Builder<A, T>) -> Self {
        Factory { build }
    }

    pub fn produce(&self, args: &A) -> T {
        (self.build)(args)
    }
}

impl<A, T> Clone for Factory<A, T> {
    fn clone(&self) -> Self {
        Factory { build: self.build }
    }
}
