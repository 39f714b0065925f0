//! Errors raised while defining or driving a machine.

use thiserror::Error;

/// Error type user callbacks and predicates may fail with.
///
/// The engine never inspects or rewraps it beyond attaching the callback name;
/// the original error stays reachable through [`std::error::Error::source`].
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Faults surfaced by [`Machine`](crate::Machine) operations.
///
/// A guard rejection is not an error: triggers report it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum MachineError {
    /// A state name was looked up that was never registered.
    #[error("State '{state}' is not a registered state")]
    UnknownState { state: String },

    /// A symbolic callback or predicate name has no registered invocable.
    #[error("No callback registered under the name '{name}'")]
    UnknownCallback { name: String },

    #[error("State '{state}' is already registered")]
    DuplicateState { state: String },

    /// The trigger exists but has no transition from the current state.
    #[error("Can't trigger event '{trigger}' from state '{state}'")]
    InvalidTrigger { trigger: String, state: String },

    #[error("No trigger named '{trigger}'")]
    UnknownTrigger { trigger: String },

    /// A user callback or predicate failed.
    #[error("Callback '{callback}' failed: {source}")]
    Callback {
        callback: String,
        #[source]
        source: CallbackError,
    },
}

impl MachineError {
    /// Whether this fault comes from the machine definition or a drifted model state.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownState { .. } | Self::UnknownCallback { .. } | Self::DuplicateState { .. }
        )
    }

    /// Whether this fault was raised by a user callback or predicate.
    pub fn is_callback(&self) -> bool {
        matches!(self, Self::Callback { .. })
    }
}
