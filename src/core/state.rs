//! States and the ordered registry that holds them.

use super::args::Args;
use super::callback::{Callback, Callbacks};
use crate::error::MachineError;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// Which callback list of a state to extend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackKind {
    OnEnter,
    OnExit,
}

/// A named node of the machine with ordered enter and exit callbacks.
///
/// # Example
///
/// ```rust
/// use switchyard::{Args, Callback, State};
///
/// struct Hero {
///     naps: u32,
/// }
///
/// let asleep: State<Hero> = State::new("asleep")
///     .on_enter("snore")
///     .on_exit(Callback::new(|hero: &mut Hero, _args: &Args| {
///         hero.naps += 1;
///         Ok(())
///     }));
///
/// assert_eq!(asleep.name(), "asleep");
/// assert_eq!(asleep.enter_callbacks().len(), 1);
/// assert_eq!(asleep.exit_callbacks().len(), 1);
/// ```
pub struct State<M> {
    name: String,
    on_enter: Vec<Callback<M>>,
    on_exit: Vec<Callback<M>>,
}

impl<M> State<M> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_enter: Vec::new(),
            on_exit: Vec::new(),
        }
    }

    /// Append an enter callback.
    pub fn on_enter(mut self, callback: impl Into<Callback<M>>) -> Self {
        self.on_enter.push(callback.into());
        self
    }

    /// Append an exit callback.
    pub fn on_exit(mut self, callback: impl Into<Callback<M>>) -> Self {
        self.on_exit.push(callback.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enter_callbacks(&self) -> &[Callback<M>] {
        &self.on_enter
    }

    pub fn exit_callbacks(&self) -> &[Callback<M>] {
        &self.on_exit
    }

    pub fn add_callback(&mut self, kind: CallbackKind, callback: impl Into<Callback<M>>) {
        match kind {
            CallbackKind::OnEnter => self.on_enter.push(callback.into()),
            CallbackKind::OnExit => self.on_exit.push(callback.into()),
        }
    }

    /// Run the enter callbacks in order.
    ///
    /// The first failing callback stops the sequence and its error is returned.
    pub fn enter(
        &self,
        callbacks: &Callbacks<M>,
        model: &mut M,
        args: &Args,
    ) -> Result<(), MachineError> {
        debug!(state = %self.name, "entering state, processing callbacks");
        for callback in &self.on_enter {
            callbacks.invoke(callback, model, args)?;
        }
        info!(state = %self.name, "entered state");
        Ok(())
    }

    /// Run the exit callbacks in order.
    ///
    /// The first failing callback stops the sequence and its error is returned.
    pub fn exit(
        &self,
        callbacks: &Callbacks<M>,
        model: &mut M,
        args: &Args,
    ) -> Result<(), MachineError> {
        debug!(state = %self.name, "exiting state, processing callbacks");
        for callback in &self.on_exit {
            callbacks.invoke(callback, model, args)?;
        }
        info!(state = %self.name, "exited state");
        Ok(())
    }

    /// Whether the `kind` list already holds a callback named `name`.
    pub fn has_named_callback(&self, kind: CallbackKind, name: &str) -> bool {
        let list = match kind {
            CallbackKind::OnEnter => &self.on_enter,
            CallbackKind::OnExit => &self.on_exit,
        };
        list.iter()
            .any(|callback| matches!(callback, Callback::Named(n) if n == name))
    }

    pub(crate) fn callbacks(&self) -> impl Iterator<Item = &Callback<M>> {
        self.on_enter.iter().chain(self.on_exit.iter())
    }
}

impl<M> Clone for State<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            on_enter: self.on_enter.clone(),
            on_exit: self.on_exit.clone(),
        }
    }
}

impl<M> fmt::Debug for State<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("on_enter", &self.on_enter)
            .field("on_exit", &self.on_exit)
            .finish()
    }
}

impl<M> From<&str> for State<M> {
    fn from(name: &str) -> Self {
        State::new(name)
    }
}

impl<M> From<String> for State<M> {
    fn from(name: String) -> Self {
        State::new(name)
    }
}

/// States keyed by name, kept in registration order.
pub struct States<M> {
    entries: Vec<State<M>>,
    index: HashMap<String, usize>,
}

impl<M> States<M> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Result<&State<M>, MachineError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| MachineError::UnknownState {
                state: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Register a state, rejecting a name that is already taken.
    pub fn insert(&mut self, state: State<M>) -> Result<(), MachineError> {
        if self.contains(state.name()) {
            return Err(MachineError::DuplicateState {
                state: state.name().to_string(),
            });
        }
        self.index.insert(state.name().to_string(), self.entries.len());
        self.entries.push(state);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &State<M>> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(State::name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> Default for States<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for States<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
