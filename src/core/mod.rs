//! Core building blocks of a machine definition.
//!
//! This module contains the pieces a machine is assembled from:
//! - [`State`] nodes with ordered enter/exit callbacks
//! - [`Guard`] references and the [`Condition`]s that gate transitions
//! - the [`Callbacks`] registry every callback and guard is resolved through
//! - the [`Model`] contract a host object implements
//!
//! Nothing here knows about triggers; see [`crate::engine`] for that.

mod args;
mod callback;
mod guard;
mod model;
mod state;

pub use args::Args;
pub use callback::{ActionFn, Callback, Callbacks, PredicateFn};
pub use guard::{Condition, Guard};
pub use model::Model;
pub use state::{CallbackKind, State, States};
