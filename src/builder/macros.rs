//! Macros for typed trigger entry points.

/// Generate a trait of typed trigger methods and state predicates for
/// `Machine<Model>`.
///
/// Each trigger becomes a method that forwards to
/// [`Machine::trigger`](crate::Machine::trigger) under its own name. Entries
/// in the optional `states` block become predicates backed by
/// [`Machine::is_state`](crate::Machine::is_state).
///
/// # Example
///
/// ```
/// use switchyard::{triggers, Args, Machine, Model};
///
/// struct Kettle {
///     state: String,
/// }
///
/// impl Model for Kettle {
///     fn state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, state: String) {
///         self.state = state;
///     }
/// }
///
/// triggers! {
///     pub trait KettleTriggers for Kettle {
///         switch_on,
///         boil,
///     }
///     states: {
///         is_cold => cold,
///         is_boiling => boiling,
///     }
/// }
///
/// let mut machine = Machine::new(["cold", "heating", "boiling"], "cold", Kettle {
///     state: String::new(),
/// })
/// .unwrap();
/// machine.add_transition("switch_on", "cold", "heating").unwrap();
/// machine.add_transition("boil", "heating", "boiling").unwrap();
///
/// assert!(machine.is_cold());
/// machine.switch_on(Args::new()).unwrap();
/// machine.boil(Args::new()).unwrap();
/// assert!(machine.is_boiling());
/// ```
#[macro_export]
macro_rules! triggers {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident for $model:ty {
            $(
                $(#[$trigger_meta:meta])*
                $trigger:ident
            ),* $(,)?
        }

        $(states: { $($predicate:ident => $state:ident),* $(,)? })?
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $(
                $(#[$trigger_meta])*
                fn $trigger(
                    &mut self,
                    args: $crate::Args,
                ) -> ::std::result::Result<bool, $crate::MachineError>;
            )*

            $($(
                fn $predicate(&self) -> bool;
            )*)?
        }

        impl $name for $crate::Machine<$model> {
            $(
                fn $trigger(
                    &mut self,
                    args: $crate::Args,
                ) -> ::std::result::Result<bool, $crate::MachineError> {
                    self.trigger(stringify!($trigger), args)
                }
            )*

            $($(
                fn $predicate(&self) -> bool {
                    self.is_state(stringify!($state))
                }
            )*)?
        }
    };
}
