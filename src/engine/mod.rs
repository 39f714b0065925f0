//! Trigger dispatch and the transition commit protocol.
//!
//! # Key Concepts
//!
//! - **Transition**: a guarded edge; owns the exit / commit / enter sequence
//! - **Event**: every transition sharing a trigger name, grouped by source
//! - **Machine**: registries, callback resolution and the bound model
//!
//! Everything runs synchronously on the caller's thread. A `Machine` is
//! driven through `&mut self`, so concurrent triggers on one model need an
//! external lock.

mod event;
mod machine;
mod transition;

pub use event::Event;
pub use machine::{Machine, GENERIC_TRIGGER};
pub use transition::Transition;
