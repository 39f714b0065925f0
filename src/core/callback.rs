//! Callback references and the registry that resolves them.
//!
//! Every enter/exit callback and every guard predicate reaches the model
//! through [`Callbacks`]: symbolic names are looked up in an explicit table
//! populated at setup time, bound closures are called as-is.

use super::args::Args;
use super::guard::Guard;
use crate::error::{CallbackError, MachineError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A side-effecting callback run when a state is entered or exited.
pub type ActionFn<M> = Arc<dyn Fn(&mut M, &Args) -> Result<(), CallbackError> + Send + Sync>;

/// A guard predicate evaluated against the model.
pub type PredicateFn<M> = Arc<dyn Fn(&M) -> Result<bool, CallbackError> + Send + Sync>;

/// Reference to an enter/exit callback: either a name resolved through
/// [`Callbacks`] or a closure bound directly.
pub enum Callback<M> {
    Named(String),
    Bound(ActionFn<M>),
}

impl<M> Callback<M> {
    pub fn named(name: impl Into<String>) -> Self {
        Callback::Named(name.into())
    }

    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut M, &Args) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Callback::Bound(Arc::new(f))
    }

    /// Name used in logs and error messages.
    pub fn label(&self) -> &str {
        match self {
            Callback::Named(name) => name,
            Callback::Bound(_) => "<bound callback>",
        }
    }
}

impl<M> Clone for Callback<M> {
    fn clone(&self) -> Self {
        match self {
            Callback::Named(name) => Callback::Named(name.clone()),
            Callback::Bound(f) => Callback::Bound(Arc::clone(f)),
        }
    }
}

impl<M> fmt::Debug for Callback<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Callback::Bound(_) => f.write_str("Bound(..)"),
        }
    }
}

impl<M> From<&str> for Callback<M> {
    fn from(name: &str) -> Self {
        Callback::Named(name.to_string())
    }
}

impl<M> From<String> for Callback<M> {
    fn from(name: String) -> Self {
        Callback::Named(name)
    }
}

/// Name → invocable table for a model type.
///
/// Populated by [`Model::register_callbacks`](super::Model::register_callbacks)
/// and by whoever defines the machine. Lookups of unknown names fail with
/// [`MachineError::UnknownCallback`].
///
/// # Example
///
/// ```rust
/// use switchyard::{Args, Callback, Callbacks};
///
/// struct Counter {
///     hits: u32,
/// }
///
/// let mut callbacks = Callbacks::new();
/// callbacks.action("bump", |c: &mut Counter, _args: &Args| {
///     c.hits += 1;
///     Ok(())
/// });
///
/// let mut counter = Counter { hits: 0 };
/// callbacks
///     .invoke(&Callback::named("bump"), &mut counter, &Args::new())
///     .unwrap();
/// assert_eq!(counter.hits, 1);
/// ```
pub struct Callbacks<M> {
    actions: HashMap<String, ActionFn<M>>,
    predicates: HashMap<String, PredicateFn<M>>,
}

impl<M> Callbacks<M> {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            predicates: HashMap::new(),
        }
    }

    /// Register a named enter/exit callback, replacing any previous one.
    pub fn action<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut M, &Args) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), Arc::new(f));
        self
    }

    /// Register a named infallible guard predicate.
    pub fn predicate<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
        M: 'static,
    {
        self.predicates
            .insert(name.into(), Arc::new(move |model: &M| Ok(f(model))));
        self
    }

    /// Register a named guard predicate that may fail.
    pub fn try_predicate<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&M) -> Result<bool, CallbackError> + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(f));
        self
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn has_predicate(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Resolve a callback reference and run it against the model.
    ///
    /// Failures of the callback itself come back as
    /// [`MachineError::Callback`] with the original error as source.
    pub fn invoke(
        &self,
        callback: &Callback<M>,
        model: &mut M,
        args: &Args,
    ) -> Result<(), MachineError> {
        let f = match callback {
            Callback::Named(name) => {
                self.actions
                    .get(name)
                    .ok_or_else(|| MachineError::UnknownCallback { name: name.clone() })?
            }
            Callback::Bound(f) => f,
        };
        trace!(callback = callback.label(), "invoking callback");
        f(model, args).map_err(|source| MachineError::Callback {
            callback: callback.label().to_string(),
            source,
        })
    }

    /// Resolve a guard reference and evaluate it against the model.
    pub fn evaluate(&self, guard: &Guard<M>, model: &M) -> Result<bool, MachineError> {
        let f = match guard {
            Guard::Named(name) => {
                self.predicates
                    .get(name)
                    .ok_or_else(|| MachineError::UnknownCallback { name: name.clone() })?
            }
            Guard::Bound(f) => f,
        };
        f(model).map_err(|source| MachineError::Callback {
            callback: guard.label().to_string(),
            source,
        })
    }

    /// Check that a named callback reference can be resolved.
    pub(crate) fn ensure_action(&self, callback: &Callback<M>) -> Result<(), MachineError> {
        match callback {
            Callback::Named(name) if !self.has_action(name) => {
                Err(MachineError::UnknownCallback { name: name.clone() })
            }
            _ => Ok(()),
        }
    }

    /// Check that a named guard reference can be resolved.
    pub(crate) fn ensure_predicate(&self, guard: &Guard<M>) -> Result<(), MachineError> {
        match guard {
            Guard::Named(name) if !self.has_predicate(name) => {
                Err(MachineError::UnknownCallback { name: name.clone() })
            }
            _ => Ok(()),
        }
    }
}

impl<M> Default for Callbacks<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for Callbacks<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<_> = self.actions.keys().collect();
        let mut predicates: Vec<_> = self.predicates.keys().collect();
        actions.sort();
        predicates.sort();
        f.debug_struct("Callbacks")
            .field("actions", &actions)
            .field("predicates", &predicates)
            .finish()
    }
}
