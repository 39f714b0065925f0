//! The machine that binds states and triggers onto a model.

use super::event::Event;
use super::transition::Transition;
use crate::core::{Args, Callback, CallbackKind, Callbacks, Condition, Model, State, States};
use crate::error::MachineError;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

/// Name of the generic trigger entry point, [`Machine::trigger`].
pub const GENERIC_TRIGGER: &str = "trigger";

const ON_ENTER_PREFIX: &str = "on_enter_";
const ON_EXIT_PREFIX: &str = "on_exit_";

/// A finite state machine bound to a model.
///
/// The machine owns the state and trigger registries, the callback registry
/// and the model. The model's state slot is the only record of the current
/// state.
///
/// # Example
///
/// ```rust
/// use switchyard::{Args, Machine, Model};
///
/// struct Turnstile {
///     state: String,
/// }
///
/// impl Model for Turnstile {
///     fn state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, state: String) {
///         self.state = state;
///     }
/// }
///
/// let model = Turnstile { state: String::new() };
/// let mut machine = Machine::new(["locked", "unlocked"], "locked", model).unwrap();
/// machine.add_transition("coin", "locked", "unlocked").unwrap();
/// machine.add_transition("push", "unlocked", "locked").unwrap();
///
/// assert!(machine.trigger("coin", Args::new()).unwrap());
/// assert!(machine.is_state("unlocked"));
/// assert!(machine.trigger("coin", Args::new()).is_err());
/// ```
pub struct Machine<M: Model> {
    states: States<M>,
    events: Vec<Event<M>>,
    callbacks: Callbacks<M>,
    model: M,
    initial: String,
}

impl<M: Model> Machine<M> {
    /// Build a machine over `model`.
    ///
    /// The callback registry is populated from [`Model::register_callbacks`].
    /// `initial` is registered as a bare state if it is not among `states`.
    /// The model is put in the initial state directly: no enter callback runs.
    pub fn new<I, S>(states: I, initial: impl Into<String>, model: M) -> Result<Self, MachineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<State<M>>,
    {
        let mut callbacks = Callbacks::new();
        M::register_callbacks(&mut callbacks);
        Self::with_callbacks(states, initial, model, callbacks)
    }

    /// Build a machine with an explicitly supplied callback registry.
    ///
    /// [`Model::register_callbacks`] is not consulted.
    pub fn with_callbacks<I, S>(
        states: I,
        initial: impl Into<String>,
        model: M,
        callbacks: Callbacks<M>,
    ) -> Result<Self, MachineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<State<M>>,
    {
        if callbacks.has_action(GENERIC_TRIGGER) {
            warn!(
                "model already registers a callback named '{}', generic trigger dispatch stays on Machine::trigger",
                GENERIC_TRIGGER
            );
        }

        let mut machine = Self {
            states: States::new(),
            events: Vec::new(),
            callbacks,
            model,
            initial: initial.into(),
        };

        for state in states {
            machine.add_state(state)?;
        }
        if !machine.states.contains(&machine.initial) {
            machine.add_state(State::new(machine.initial.clone()))?;
        }

        let initial = machine.initial.clone();
        machine.set_state(&initial)?;
        Ok(machine)
    }

    /// Name of the state the machine started in.
    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// Current state as reported by the model.
    pub fn state(&self) -> &str {
        self.model.state()
    }

    /// Whether the model is currently in `state`.
    pub fn is_state(&self, state: &str) -> bool {
        self.model.state() == state
    }

    pub fn get_state(&self, state: &str) -> Result<&State<M>, MachineError> {
        self.states.get(state)
    }

    /// Put the model in `state` without running any callback.
    pub fn set_state(&mut self, state: &str) -> Result<(), MachineError> {
        let state = self.states.get(state)?;
        self.model.set_state(state.name().to_string());
        Ok(())
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model.
    ///
    /// Writing the state slot directly bypasses validation; a later trigger
    /// fails with [`MachineError::UnknownState`] if it names no registered state.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    pub fn callbacks(&self) -> &Callbacks<M> {
        &self.callbacks
    }

    /// Register additional callbacks. States added afterwards can refer to them.
    pub fn callbacks_mut(&mut self) -> &mut Callbacks<M> {
        &mut self.callbacks
    }

    /// Registered states in registration order.
    pub fn states(&self) -> impl Iterator<Item = &State<M>> {
        self.states.iter()
    }

    /// Declared trigger names in declaration order.
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(Event::name)
    }

    pub fn get_event(&self, trigger: &str) -> Option<&Event<M>> {
        self.events.iter().find(|event| event.name() == trigger)
    }

    /// Register a state and bind it to the model.
    ///
    /// Actions named `on_enter_<state>` / `on_exit_<state>` in the callback
    /// registry are appended to the state's callbacks. Named callbacks the
    /// state already carries must resolve.
    pub fn add_state(&mut self, state: impl Into<State<M>>) -> Result<(), MachineError> {
        let mut state = state.into();
        if self.states.contains(state.name()) {
            return Err(MachineError::DuplicateState {
                state: state.name().to_string(),
            });
        }
        for callback in state.callbacks() {
            self.callbacks.ensure_action(callback)?;
        }

        self.bind_state(&mut state);
        self.states.insert(state)
    }

    fn bind_state(&self, state: &mut State<M>) {
        let enter = format!("{ON_ENTER_PREFIX}{}", state.name());
        self.bind_convention(state, CallbackKind::OnEnter, enter);
        let exit = format!("{ON_EXIT_PREFIX}{}", state.name());
        self.bind_convention(state, CallbackKind::OnExit, exit);
    }

    fn bind_convention(&self, state: &mut State<M>, kind: CallbackKind, name: String) {
        if !self.callbacks.has_action(&name) {
            return;
        }
        // Already declared on the state explicitly.
        if state.has_named_callback(kind, &name) {
            return;
        }
        debug!(state = state.name(), callback = %name, "binding convention callback");
        state.add_callback(kind, Callback::Named(name));
    }

    /// Add an unguarded transition.
    pub fn add_transition(
        &mut self,
        trigger: &str,
        source: &str,
        dest: &str,
    ) -> Result<(), MachineError> {
        self.add_guarded_transition(trigger, source, dest, Vec::<Condition<M>>::new())
    }

    /// Add a transition that only commits when every condition passes.
    ///
    /// The trigger is created on first use. Candidates for the same trigger
    /// and source are tried in the order they were added and the first one
    /// whose conditions all pass wins.
    pub fn add_guarded_transition<I, C>(
        &mut self,
        trigger: &str,
        source: &str,
        dest: &str,
        conditions: I,
    ) -> Result<(), MachineError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition<M>>,
    {
        self.states.get(source)?;
        self.states.get(dest)?;
        let conditions: Vec<Condition<M>> = conditions.into_iter().map(Into::into).collect();
        for condition in &conditions {
            self.callbacks.ensure_predicate(condition.guard())?;
        }

        let transition = Transition::new(source, dest, conditions);
        let event = self.event_mut(trigger);
        if let Some(blocker) = event
            .transitions_from(source)
            .iter()
            .find(|t| t.is_unguarded())
        {
            warn!(
                trigger,
                source,
                shadowed = dest,
                winner = blocker.dest(),
                "transition is shadowed by an earlier unguarded transition and will never run"
            );
        }
        event.add_transition(transition);
        Ok(())
    }

    fn event_mut(&mut self, trigger: &str) -> &mut Event<M> {
        let position = match self.events.iter().position(|e| e.name() == trigger) {
            Some(position) => position,
            None => {
                if trigger == GENERIC_TRIGGER {
                    warn!(
                        "trigger named '{}' collides with the generic entry point, it stays reachable through Machine::trigger",
                        GENERIC_TRIGGER
                    );
                }
                debug!(trigger, "registering trigger");
                self.events.push(Event::new(trigger));
                self.events.len() - 1
            }
        };
        &mut self.events[position]
    }

    /// Trigger names with at least one transition from any of `states`.
    pub fn get_triggers<S: AsRef<str>>(&self, states: &[S]) -> BTreeSet<String> {
        self.events
            .iter()
            .filter(|event| states.iter().any(|s| event.has_source(s.as_ref())))
            .map(|event| event.name().to_string())
            .collect()
    }

    /// Fire the trigger named `trigger` with `args`.
    ///
    /// Returns `Ok(true)` if a transition was taken and `Ok(false)` if every
    /// candidate from the current state was rejected by its guards. Faults:
    /// [`MachineError::UnknownTrigger`] for an undeclared name,
    /// [`MachineError::InvalidTrigger`] when the trigger has no transition from
    /// the current state, [`MachineError::UnknownState`] when the model reports
    /// an unregistered state, and [`MachineError::Callback`] when a guard or
    /// callback fails.
    ///
    /// A failure inside an enter callback is reported after the state has
    /// already changed to the destination.
    pub fn trigger(&mut self, trigger: &str, args: Args) -> Result<bool, MachineError> {
        let event = self
            .events
            .iter()
            .find(|event| event.name() == trigger)
            .ok_or_else(|| MachineError::UnknownTrigger {
                trigger: trigger.to_string(),
            })?;
        event.trigger(&self.states, &self.callbacks, &mut self.model, &args)
    }

    /// Resolve `callback` and run it against the model.
    pub fn resolve_callback(
        &mut self,
        callback: &Callback<M>,
        args: &Args,
    ) -> Result<(), MachineError> {
        self.callbacks.invoke(callback, &mut self.model, args)
    }
}

impl<M: Model + fmt::Debug> fmt::Debug for Machine<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("states", &self.states)
            .field("events", &self.events)
            .field("initial", &self.initial)
            .field("model", &self.model)
            .finish()
    }
}
