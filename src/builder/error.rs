//! Build errors for machine and transition builders.

use crate::error::MachineError;
use thiserror::Error;

/// A single problem found while validating a machine definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("State '{0}' is declared more than once")]
    DuplicateState(String),

    #[error("Transition for trigger '{trigger}' has no source state. Call .from(state)")]
    MissingSource { trigger: String },

    #[error("Transition for trigger '{trigger}' has no destination state. Call .to(state)")]
    MissingDestination { trigger: String },

    #[error("Transition for trigger '{trigger}' refers to unknown state '{state}'")]
    UnknownState { trigger: String, state: String },

    #[error("State '{state}' refers to unknown callback '{callback}'")]
    UnknownCallback { state: String, callback: String },

    #[error("Transition for trigger '{trigger}' refers to unknown guard '{guard}'")]
    UnknownGuard { trigger: String, guard: String },
}

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Every problem found in the definition, in declaration order.
    #[error("Invalid machine definition ({} error(s)): {}", .0.len(), summarize(.0))]
    Invalid(Vec<DefinitionError>),

    #[error(transparent)]
    Machine(#[from] MachineError),
}

fn summarize(errors: &[DefinitionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
