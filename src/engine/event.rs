//! Triggers and candidate transition resolution.

use super::transition::Transition;
use crate::core::{Args, Callbacks, Model, States};
use crate::error::MachineError;
use std::fmt;

/// All transitions sharing one trigger name, grouped by source state.
///
/// Candidates for a source keep their declaration order; that order decides
/// which of several passing transitions commits.
pub struct Event<M> {
    name: String,
    transitions: Vec<(String, Vec<Transition<M>>)>,
}

impl<M> Event<M> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a candidate after any existing ones for the same source.
    pub fn add_transition(&mut self, transition: Transition<M>) {
        match self
            .transitions
            .iter()
            .position(|(source, _)| source == transition.source())
        {
            Some(index) => self.transitions[index].1.push(transition),
            None => self
                .transitions
                .push((transition.source().to_string(), vec![transition])),
        }
    }

    /// Candidates declared from `source`, in declaration order.
    pub fn transitions_from(&self, source: &str) -> &[Transition<M>] {
        self.transitions
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, candidates)| candidates.as_slice())
            .unwrap_or(&[])
    }

    /// Source states this trigger is defined from, in declaration order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.transitions.iter().map(|(source, _)| source.as_str())
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.sources().any(|s| s == source)
    }
}

impl<M: Model> Event<M> {
    /// Fire this trigger against the model's current state.
    ///
    /// Fails with [`MachineError::UnknownState`] when the model reports a state
    /// that was never registered and with [`MachineError::InvalidTrigger`] when
    /// the trigger has no transition from the current state. Otherwise runs the
    /// candidates in order and returns `Ok(true)` for the first one taken, or
    /// `Ok(false)` when every candidate was rejected by its guards.
    pub fn trigger(
        &self,
        states: &States<M>,
        callbacks: &Callbacks<M>,
        model: &mut M,
        args: &Args,
    ) -> Result<bool, MachineError> {
        let state = states.get(model.state())?;
        let candidates = self.transitions_from(state.name());
        if candidates.is_empty() {
            return Err(MachineError::InvalidTrigger {
                trigger: self.name.clone(),
                state: state.name().to_string(),
            });
        }

        for transition in candidates {
            if transition.execute(states, callbacks, model, args)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl<M> fmt::Debug for Event<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("transitions", &self.transitions)
            .finish()
    }
}
