//! Guard predicates and the conditions that gate transitions.
//!
//! A [`Guard`] is a reference to a predicate over the model. A [`Condition`]
//! pairs a guard with the polarity it must report for a transition to pass.

use super::callback::{Callbacks, PredicateFn};
use crate::error::{CallbackError, MachineError};
use std::fmt;
use std::sync::Arc;

/// Reference to a guard predicate.
///
/// Either a symbolic name looked up in [`Callbacks`] or a closure bound
/// directly.
///
/// # Example
///
/// ```rust
/// use switchyard::{Callbacks, Guard};
///
/// struct Battery {
///     charge: u8,
/// }
///
/// let charged = Guard::new(|b: &Battery| b.charge > 50);
/// let callbacks = Callbacks::new();
///
/// assert!(callbacks.evaluate(&charged, &Battery { charge: 80 }).unwrap());
/// assert!(!callbacks.evaluate(&charged, &Battery { charge: 10 }).unwrap());
/// ```
pub enum Guard<M> {
    Named(String),
    Bound(PredicateFn<M>),
}

impl<M> Guard<M> {
    /// Create a guard from a predicate over the model.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
        M: 'static,
    {
        Guard::Bound(Arc::new(move |model: &M| Ok(predicate(model))))
    }

    /// Create a guard from a predicate that may fail.
    pub fn try_new<F>(predicate: F) -> Self
    where
        F: Fn(&M) -> Result<bool, CallbackError> + Send + Sync + 'static,
    {
        Guard::Bound(Arc::new(predicate))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Guard::Named(name.into())
    }

    pub fn label(&self) -> &str {
        match self {
            Guard::Named(name) => name,
            Guard::Bound(_) => "<bound guard>",
        }
    }
}

impl<M> Clone for Guard<M> {
    fn clone(&self) -> Self {
        match self {
            Guard::Named(name) => Guard::Named(name.clone()),
            Guard::Bound(f) => Guard::Bound(Arc::clone(f)),
        }
    }
}

impl<M> fmt::Debug for Guard<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Guard::Bound(_) => f.write_str("Bound(..)"),
        }
    }
}

impl<M> From<&str> for Guard<M> {
    fn from(name: &str) -> Self {
        Guard::Named(name.to_string())
    }
}

impl<M> From<String> for Guard<M> {
    fn from(name: String) -> Self {
        Guard::Named(name)
    }
}

/// A guard plus the value it must return for the condition to pass.
pub struct Condition<M> {
    guard: Guard<M>,
    target: bool,
}

impl<M> Condition<M> {
    /// Passes when the guard returns `true`.
    pub fn new(guard: impl Into<Guard<M>>) -> Self {
        Self {
            guard: guard.into(),
            target: true,
        }
    }

    /// Passes when the guard returns `false`.
    pub fn unless(guard: impl Into<Guard<M>>) -> Self {
        Self {
            guard: guard.into(),
            target: false,
        }
    }

    pub fn guard(&self) -> &Guard<M> {
        &self.guard
    }

    pub fn target(&self) -> bool {
        self.target
    }

    /// Evaluate the guard and compare it with this condition's polarity.
    pub fn check(&self, callbacks: &Callbacks<M>, model: &M) -> Result<bool, MachineError> {
        Ok(callbacks.evaluate(&self.guard, model)? == self.target)
    }
}

impl<M> Clone for Condition<M> {
    fn clone(&self) -> Self {
        Self {
            guard: self.guard.clone(),
            target: self.target,
        }
    }
}

impl<M> fmt::Debug for Condition<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("guard", &self.guard)
            .field("target", &self.target)
            .finish()
    }
}

impl<M> From<&str> for Condition<M> {
    fn from(name: &str) -> Self {
        Condition::new(name)
    }
}

impl<M> From<String> for Condition<M> {
    fn from(name: String) -> Self {
        Condition::new(name)
    }
}

impl<M> From<Guard<M>> for Condition<M> {
    fn from(guard: Guard<M>) -> Self {
        Condition::new(guard)
    }
}
