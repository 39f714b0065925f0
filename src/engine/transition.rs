//! Guarded transitions and the commit protocol.

use crate::core::{Args, Callbacks, Condition, Model, States};
use crate::error::MachineError;
use std::fmt;
use tracing::debug;

/// A directed edge from `source` to `dest`, gated by ordered conditions.
pub struct Transition<M> {
    source: String,
    dest: String,
    conditions: Vec<Condition<M>>,
}

impl<M> Transition<M> {
    pub fn new(
        source: impl Into<String>,
        dest: impl Into<String>,
        conditions: Vec<Condition<M>>,
    ) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            conditions,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn dest(&self) -> &str {
        &self.dest
    }

    pub fn conditions(&self) -> &[Condition<M>] {
        &self.conditions
    }

    /// A transition with no conditions always passes.
    pub fn is_unguarded(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl<M: Model> Transition<M> {
    /// Evaluate the conditions and, if all pass, commit the transition.
    ///
    /// Returns `Ok(false)` as soon as one condition fails; nothing else runs.
    /// On commit the source's exit callbacks run while the model still reports
    /// the source state, then the state is set to `dest`, then the
    /// destination's enter callbacks run.
    ///
    /// An exit callback failure leaves the state untouched. An enter callback
    /// failure happens after the commit, so the model already reports `dest`
    /// even though the remaining enter callbacks did not run.
    pub fn execute(
        &self,
        states: &States<M>,
        callbacks: &Callbacks<M>,
        model: &mut M,
        args: &Args,
    ) -> Result<bool, MachineError> {
        debug!(
            source = %self.source,
            dest = %self.dest,
            "initiating transition"
        );

        for condition in &self.conditions {
            if !condition.check(callbacks, model)? {
                debug!(
                    condition = condition.guard().label(),
                    "transition condition failed, transition halted"
                );
                return Ok(false);
            }
        }

        let source = states.get(&self.source)?;
        let dest = states.get(&self.dest)?;

        source.exit(callbacks, model, args)?;
        model.set_state(self.dest.clone());
        dest.enter(callbacks, model, args)?;
        Ok(true)
    }
}

impl<M> Clone for Transition<M> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            dest: self.dest.clone(),
            conditions: self.conditions.clone(),
        }
    }
}

impl<M> fmt::Debug for Transition<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source)
            .field("dest", &self.dest)
            .field("conditions", &self.conditions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Guard, State};

    #[derive(Default)]
    struct Lamp {
        state: String,
        log: Vec<String>,
        powered: bool,
    }

    impl Model for Lamp {
        fn state(&self) -> &str {
            &self.state
        }

        fn set_state(&mut self, state: String) {
            self.state = state;
        }
    }

    fn lamp() -> Lamp {
        Lamp {
            state: "off".to_string(),
            powered: true,
            ..Default::default()
        }
    }

    fn fixture() -> (States<Lamp>, Callbacks<Lamp>) {
        let mut callbacks = Callbacks::new();
        callbacks
            .action("leave_off", |l: &mut Lamp, _a: &Args| {
                let seen = format!("exit:{}", l.state);
                l.log.push(seen);
                Ok(())
            })
            .action("arrive_on", |l: &mut Lamp, _a: &Args| {
                let seen = format!("enter:{}", l.state);
                l.log.push(seen);
                Ok(())
            })
            .action("fault", |_l: &mut Lamp, _a: &Args| Err("bulb blew".into()))
            .predicate("powered", |l: &Lamp| l.powered);

        let mut states = States::new();
        states
            .insert(State::new("off").on_exit("leave_off"))
            .unwrap();
        states.insert(State::new("on").on_enter("arrive_on")).unwrap();
        states
            .insert(State::new("broken").on_enter("fault").on_enter("arrive_on"))
            .unwrap();
        (states, callbacks)
    }

    #[test]
    fn exit_sees_source_and_enter_sees_dest() {
        let (states, callbacks) = fixture();
        let mut model = lamp();
        let transition = Transition::new("off", "on", vec![]);

        let taken = transition
            .execute(&states, &callbacks, &mut model, &Args::new())
            .unwrap();

        assert!(taken);
        assert_eq!(model.state, "on");
        assert_eq!(model.log, vec!["exit:off", "enter:on"]);
    }

    #[test]
    fn failed_condition_has_no_effect() {
        let (states, callbacks) = fixture();
        let mut model = lamp();
        model.powered = false;
        let transition = Transition::new("off", "on", vec![Condition::new("powered")]);

        let taken = transition
            .execute(&states, &callbacks, &mut model, &Args::new())
            .unwrap();

        assert!(!taken);
        assert_eq!(model.state, "off");
        assert!(model.log.is_empty());
    }

    #[test]
    fn conditions_stop_at_first_failure() {
        let (states, callbacks) = fixture();
        let mut model = lamp();
        let transition = Transition::new(
            "off",
            "on",
            vec![
                Condition::new(Guard::new(|_l: &Lamp| false)),
                Condition::new(Guard::try_new(|_l: &Lamp| Err("never evaluated".into()))),
            ],
        );

        let taken = transition
            .execute(&states, &callbacks, &mut model, &Args::new())
            .unwrap();

        assert!(!taken);
    }

    #[test]
    fn unless_condition_inverts_polarity() {
        let (states, callbacks) = fixture();
        let mut model = lamp();
        let transition = Transition::new("off", "on", vec![Condition::unless("powered")]);

        assert!(!transition
            .execute(&states, &callbacks, &mut model, &Args::new())
            .unwrap());

        model.powered = false;
        assert!(transition
            .execute(&states, &callbacks, &mut model, &Args::new())
            .unwrap());
        assert_eq!(model.state, "on");
    }

    #[test]
    fn enter_failure_leaves_state_committed() {
        let (states, callbacks) = fixture();
        let mut model = lamp();
        let transition = Transition::new("off", "broken", vec![]);

        let err = transition
            .execute(&states, &callbacks, &mut model, &Args::new())
            .unwrap_err();

        assert!(err.is_callback());
        assert_eq!(model.state, "broken");
        assert_eq!(model.log, vec!["exit:off"]);
    }

    #[test]
    fn unknown_destination_faults_before_side_effects() {
        let (states, callbacks) = fixture();
        let mut model = lamp();
        let transition = Transition::new("off", "nowhere", vec![]);

        let err = transition
            .execute(&states, &callbacks, &mut model, &Args::new())
            .unwrap_err();

        assert!(matches!(err, MachineError::UnknownState { ref state } if state == "nowhere"));
        assert_eq!(model.state, "off");
        assert!(model.log.is_empty());
    }
}
