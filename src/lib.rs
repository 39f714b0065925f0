//! Switchyard: a finite state machine engine for host models
//!
//! Switchyard drives a host object (the *model*) through a declared set of
//! states. Named triggers select guarded transitions; taking one runs the
//! source state's exit callbacks, moves the model, then runs the destination's
//! enter callbacks.
//!
//! # Core Concepts
//!
//! - **Model**: the host object; it owns the current state name
//! - **State**: a named node with ordered enter/exit callbacks
//! - **Condition**: a guard predicate with the polarity it must report
//! - **Transition / Event**: guarded edges grouped by trigger and source
//! - **Machine**: binds all of it to one model and dispatches triggers
//!
//! Callbacks and guards are referenced by name and resolved through an
//! explicit [`Callbacks`] registry, or bound directly as closures.
//!
//! # Example
//!
//! ```rust
//! use switchyard::{Args, Callbacks, Condition, Machine, Model};
//!
//! struct Superhero {
//!     state: String,
//!     sum: i64,
//! }
//!
//! impl Model for Superhero {
//!     fn state(&self) -> &str {
//!         &self.state
//!     }
//!
//!     fn set_state(&mut self, state: String) {
//!         self.state = state;
//!     }
//!
//!     fn register_callbacks(callbacks: &mut Callbacks<Self>) {
//!         callbacks
//!             .action("on_exit_asleep", |hero: &mut Superhero, args: &Args| {
//!                 let a = args.extract::<i64>(0, "a")?.unwrap_or(100);
//!                 let b = args.extract::<i64>(1, "b")?.unwrap_or(200);
//!                 hero.sum = a + b;
//!                 Ok(())
//!             })
//!             .predicate("is_exhausted", |_hero: &Superhero| false);
//!     }
//! }
//!
//! let hero = Superhero { state: String::new(), sum: 0 };
//! let mut machine = Machine::new(["asleep", "hanging", "sweaty"], "asleep", hero).unwrap();
//! machine.add_transition("wake_up", "asleep", "hanging").unwrap();
//! machine
//!     .add_guarded_transition("clean_up", "hanging", "asleep", [Condition::new("is_exhausted")])
//!     .unwrap();
//!
//! assert!(machine.trigger("wake_up", Args::new().arg(200).arg(300)).unwrap());
//! assert_eq!(machine.state(), "hanging");
//! assert_eq!(machine.model().sum, 500);
//!
//! // Guard rejection is a normal outcome, not an error.
//! assert!(!machine.trigger("clean_up", Args::new()).unwrap());
//! assert_eq!(machine.state(), "hanging");
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use builder::{MachineBuilder, TransitionBuilder};
pub use core::{Args, Callback, CallbackKind, Callbacks, Condition, Guard, Model, State};
pub use engine::{Event, Machine, Transition};
pub use error::{CallbackError, MachineError};
