//! Builder for declaring transitions.

use crate::builder::error::DefinitionError;
use crate::core::{Condition, Guard};

/// Builder for one guarded transition under a trigger.
pub struct TransitionBuilder<M> {
    trigger: String,
    from: Option<String>,
    to: Option<String>,
    conditions: Vec<Condition<M>>,
}

/// A transition declaration that passed the builder's field checks.
pub(crate) struct TransitionSpec<M> {
    pub trigger: String,
    pub from: String,
    pub to: String,
    pub conditions: Vec<Condition<M>>,
}

impl<M> TransitionBuilder<M> {
    /// Start a transition for `trigger`.
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            from: None,
            to: None,
            conditions: Vec::new(),
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the destination state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Require `guard` to return `true`.
    pub fn when(mut self, guard: impl Into<Guard<M>>) -> Self {
        self.conditions.push(Condition::new(guard));
        self
    }

    /// Require `guard` to return `false`.
    pub fn unless(mut self, guard: impl Into<Guard<M>>) -> Self {
        self.conditions.push(Condition::unless(guard));
        self
    }

    pub fn condition(mut self, condition: Condition<M>) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub(crate) fn conditions(&self) -> &[Condition<M>] {
        &self.conditions
    }

    pub(crate) fn source(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub(crate) fn dest(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub(crate) fn build(self) -> Result<TransitionSpec<M>, DefinitionError> {
        let from = self.from.ok_or_else(|| DefinitionError::MissingSource {
            trigger: self.trigger.clone(),
        })?;
        let to = self.to.ok_or_else(|| DefinitionError::MissingDestination {
            trigger: self.trigger.clone(),
        })?;

        Ok(TransitionSpec {
            trigger: self.trigger,
            from,
            to,
            conditions: self.conditions,
        })
    }
}
