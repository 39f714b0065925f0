//! The contract a host object fulfils to be driven by a machine.

use super::callback::Callbacks;

/// A host object whose current state a [`Machine`](crate::Machine) manages.
///
/// The model owns the single source-of-truth state name. The machine reads it
/// to pick candidate transitions and writes it only when a transition commits
/// (or through [`Machine::set_state`](crate::Machine::set_state)).
///
/// # Example
///
/// ```rust
/// use switchyard::{Args, Callbacks, Model};
///
/// struct Door {
///     state: String,
///     slams: u32,
/// }
///
/// impl Model for Door {
///     fn state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, state: String) {
///         self.state = state;
///     }
///
///     fn register_callbacks(callbacks: &mut Callbacks<Self>) {
///         callbacks.action("on_enter_closed", |door: &mut Door, _args: &Args| {
///             door.slams += 1;
///             Ok(())
///         });
///     }
/// }
/// ```
pub trait Model: Sized + 'static {
    /// Name of the state the model is currently in.
    fn state(&self) -> &str;

    /// Overwrite the current state name.
    fn set_state(&mut self, state: String);

    /// Register the callbacks and predicates this model exposes by name.
    ///
    /// Called once when a machine binds the model. Actions named
    /// `on_enter_<state>` / `on_exit_<state>` are attached to the matching
    /// state automatically, after the callbacks the state declares. A state
    /// that already lists the convention name keeps a single copy, so the
    /// callback still runs once per enter or exit.
    fn register_callbacks(_callbacks: &mut Callbacks<Self>) {}
}
