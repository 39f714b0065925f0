//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for declaring machines
//! with minimal boilerplate. [`MachineBuilder`] validates a whole definition
//! up front and reports every problem it finds, not just the first one.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, DefinitionError};
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::Guard;

/// Declare an unconditional transition.
///
/// # Example
///
/// ```
/// use switchyard::builder::{transition, MachineBuilder};
/// use switchyard::Model;
///
/// struct Light {
///     state: String,
/// }
///
/// impl Model for Light {
///     fn state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, state: String) {
///         self.state = state;
///     }
/// }
///
/// let machine = MachineBuilder::new()
///     .states(["off", "on"])
///     .initial("off")
///     .transition(transition("toggle", "off", "on"))
///     .transition(transition("toggle", "on", "off"))
///     .build(Light { state: String::new() })
///     .unwrap();
///
/// assert_eq!(machine.state(), "off");
/// ```
pub fn transition<M>(
    trigger: impl Into<String>,
    from: impl Into<String>,
    to: impl Into<String>,
) -> TransitionBuilder<M> {
    TransitionBuilder::new(trigger).from(from).to(to)
}

/// Declare a transition gated by a single guard.
///
/// # Example
///
/// ```
/// use switchyard::builder::guarded_transition;
/// use switchyard::Guard;
///
/// struct Tank {
///     fuel: u32,
/// }
///
/// let by_name = guarded_transition::<Tank>("launch", "idle", "flying", "is_fueled");
/// let bound = guarded_transition("launch", "idle", "flying", Guard::new(|t: &Tank| t.fuel > 0));
/// ```
pub fn guarded_transition<M>(
    trigger: impl Into<String>,
    from: impl Into<String>,
    to: impl Into<String>,
    guard: impl Into<Guard<M>>,
) -> TransitionBuilder<M> {
    transition(trigger, from, to).when(guard)
}
