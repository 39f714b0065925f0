//! Builder for constructing machines.

use crate::builder::error::{BuildError, DefinitionError};
use crate::builder::transition::TransitionBuilder;
use crate::core::{Args, Callback, Callbacks, Guard, Model, State};
use crate::engine::Machine;
use crate::error::CallbackError;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionError>>;

/// Builder for constructing machines with a fluent API.
///
/// Unlike the incremental [`Machine`] API, the builder checks the whole
/// definition before anything is bound and reports every problem at once.
pub struct MachineBuilder<M: Model> {
    states: Vec<State<M>>,
    initial: Option<String>,
    transitions: Vec<TransitionBuilder<M>>,
    callbacks: Callbacks<M>,
}

impl<M: Model> MachineBuilder<M> {
    /// Create a new builder, seeded with the model's own callbacks.
    pub fn new() -> Self {
        let mut callbacks = Callbacks::new();
        M::register_callbacks(&mut callbacks);
        Self {
            states: Vec::new(),
            initial: None,
            transitions: Vec::new(),
            callbacks,
        }
    }

    /// Declare a state.
    pub fn state(mut self, state: impl Into<State<M>>) -> Self {
        self.states.push(state.into());
        self
    }

    /// Declare several states at once.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State<M>>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Register a named enter/exit callback.
    pub fn action<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut M, &Args) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.callbacks.action(name, f);
        self
    }

    /// Register a named guard predicate.
    pub fn predicate<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.callbacks.predicate(name, f);
        self
    }

    /// Register a named guard predicate that may fail.
    pub fn try_predicate<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&M) -> Result<bool, CallbackError> + Send + Sync + 'static,
    {
        self.callbacks.try_predicate(name, f);
        self
    }

    /// Declare a transition.
    pub fn transition(mut self, transition: TransitionBuilder<M>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Declare several transitions at once.
    pub fn transitions(
        mut self,
        transitions: impl IntoIterator<Item = TransitionBuilder<M>>,
    ) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Check the whole definition, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<DefinitionError>> {
        let mut checks: Vec<Check> = Vec::new();

        if self.initial.is_none() {
            checks.push(Validation::fail(DefinitionError::MissingInitialState));
        }

        let mut known: HashSet<&str> = HashSet::new();
        for state in &self.states {
            if !known.insert(state.name()) {
                checks.push(Validation::fail(DefinitionError::DuplicateState(
                    state.name().to_string(),
                )));
            }
            for callback in state.enter_callbacks().iter().chain(state.exit_callbacks()) {
                checks.push(self.check_callback(state.name(), callback));
            }
        }
        if let Some(initial) = &self.initial {
            known.insert(initial.as_str());
        }

        for transition in &self.transitions {
            checks.push(check_endpoint(
                transition.trigger(),
                transition.source(),
                &known,
                |trigger| DefinitionError::MissingSource { trigger },
            ));
            checks.push(check_endpoint(
                transition.trigger(),
                transition.dest(),
                &known,
                |trigger| DefinitionError::MissingDestination { trigger },
            ));
            for condition in transition.conditions() {
                checks.push(self.check_guard(transition.trigger(), condition.guard()));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_callback(&self, state: &str, callback: &Callback<M>) -> Check {
        match callback {
            Callback::Named(name) if !self.callbacks.has_action(name) => {
                Validation::fail(DefinitionError::UnknownCallback {
                    state: state.to_string(),
                    callback: name.clone(),
                })
            }
            _ => Validation::success(()),
        }
    }

    fn check_guard(&self, trigger: &str, guard: &Guard<M>) -> Check {
        match guard {
            Guard::Named(name) if !self.callbacks.has_predicate(name) => {
                Validation::fail(DefinitionError::UnknownGuard {
                    trigger: trigger.to_string(),
                    guard: name.clone(),
                })
            }
            _ => Validation::success(()),
        }
    }

    /// Validate the definition and bind it to `model`.
    ///
    /// Transitions are added in declaration order, which is also the order
    /// candidates for the same trigger and source are tried in.
    pub fn build(self, model: M) -> Result<Machine<M>, BuildError> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(BuildError::Invalid(errors.iter().cloned().collect()));
        }
        let initial = self
            .initial
            .ok_or_else(|| BuildError::Invalid(vec![DefinitionError::MissingInitialState]))?;

        let mut machine = Machine::with_callbacks(self.states, initial, model, self.callbacks)?;
        for transition in self.transitions {
            let spec = transition
                .build()
                .map_err(|e| BuildError::Invalid(vec![e]))?;
            machine.add_guarded_transition(&spec.trigger, &spec.from, &spec.to, spec.conditions)?;
        }
        Ok(machine)
    }
}

fn check_endpoint(
    trigger: &str,
    state: Option<&str>,
    known: &HashSet<&str>,
    missing: impl FnOnce(String) -> DefinitionError,
) -> Check {
    match state {
        None => Validation::fail(missing(trigger.to_string())),
        Some(state) if !known.contains(state) => Validation::fail(DefinitionError::UnknownState {
            trigger: trigger.to_string(),
            state: state.to_string(),
        }),
        Some(_) => Validation::success(()),
    }
}

impl<M: Model> Default for MachineBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}
