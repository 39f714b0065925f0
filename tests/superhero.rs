//! Scenario tests driving a narcoleptic superhero through its day.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use switchyard::{
    triggers, Args, Callback, CallbackError, CallbackKind, Callbacks, Condition, Guard, Machine,
    MachineError, Model, State,
};

#[derive(Debug, Default)]
struct Superhero {
    name: String,
    state: String,
    kittens_rescued: u32,
    internal_state: Option<i64>,
    exhausted: bool,
    journal: Vec<String>,
}

impl Model for Superhero {
    fn state(&self) -> &str {
        &self.state
    }

    fn set_state(&mut self, state: String) {
        self.state = state;
    }

    fn register_callbacks(callbacks: &mut Callbacks<Self>) {
        callbacks
            .action("on_exit_asleep", |hero: &mut Superhero, args: &Args| {
                let a = args.extract::<i64>(0, "a")?.unwrap_or(100);
                let b = args.extract::<i64>(1, "b")?.unwrap_or(200);
                hero.internal_state = Some(a + b);
                Ok(())
            })
            .action("update_journal", |hero: &mut Superhero, _args: &Args| {
                hero.kittens_rescued += 1;
                Ok(())
            })
            .predicate("is_exhausted", |hero: &Superhero| hero.exhausted);
    }
}

triggers! {
    trait SuperheroTriggers for Superhero {
        wake_up,
        work_out,
        hiit,
        eat,
        clean_up,
    }
    states: {
        is_asleep => asleep,
        is_hanging => hanging,
        is_hungry => hungry,
        is_sweaty => sweaty,
    }
}

fn superhero(name: &str) -> Machine<Superhero> {
    let hero = Superhero {
        name: name.to_string(),
        ..Default::default()
    };
    let mut machine =
        Machine::new(["asleep", "hanging", "hungry", "sweaty"], "asleep", hero).unwrap();

    machine.add_transition("wake_up", "asleep", "hanging").unwrap();
    machine.add_transition("work_out", "hanging", "hungry").unwrap();
    machine.add_transition("work_out", "asleep", "hungry").unwrap();
    machine.add_transition("hiit", "hanging", "sweaty").unwrap();
    machine.add_transition("eat", "hungry", "hanging").unwrap();
    machine
        .add_guarded_transition("clean_up", "sweaty", "asleep", ["is_exhausted"])
        .unwrap();
    machine.add_transition("clean_up", "sweaty", "hanging").unwrap();
    machine
}

#[test]
fn initial_state_without_callbacks() {
    let machine = superhero("harry");

    assert_eq!(machine.state(), "asleep");
    assert!(machine.is_asleep());
    assert_eq!(machine.model().internal_state, None);
    assert_eq!(machine.model().name, "harry");
}

#[test]
fn exit_callback_receives_trigger_arguments() {
    let mut machine = superhero("harry");

    assert!(machine.wake_up(Args::new().arg(200).arg(300)).unwrap());

    assert_eq!(machine.state(), "hanging");
    assert_eq!(machine.model().internal_state, Some(500));
}

#[test]
fn exit_callback_falls_back_to_defaults_and_named_args() {
    let mut machine = superhero("harry");
    machine.wake_up(Args::new()).unwrap();
    assert_eq!(machine.model().internal_state, Some(300));

    let mut machine = superhero("harry");
    machine.wake_up(Args::new().kwarg("b", 1)).unwrap();
    assert_eq!(machine.model().internal_state, Some(101));
}

#[test]
fn regular_transitions() {
    let mut machine = superhero("harry");

    machine.work_out(Args::new()).unwrap();
    assert_eq!(machine.state(), "hungry");

    machine.eat(Args::new()).unwrap();
    assert_eq!(machine.state(), "hanging");

    machine.hiit(Args::new()).unwrap();
    assert_eq!(machine.state(), "sweaty");
    assert!(machine.is_sweaty());

    machine.clean_up(Args::new()).unwrap();
    assert_eq!(machine.state(), "hanging");
}

#[test]
fn same_trigger_resolves_from_either_source() {
    let mut from_asleep = superhero("harry");
    assert!(from_asleep.work_out(Args::new()).unwrap());
    assert!(from_asleep.is_hungry());

    let mut from_hanging = superhero("harry");
    from_hanging.wake_up(Args::new()).unwrap();
    assert!(from_hanging.work_out(Args::new()).unwrap());
    assert!(from_hanging.is_hungry());
}

#[test]
fn rejected_guard_falls_through_to_next_candidate() {
    let mut machine = superhero("harry");
    machine.set_state("sweaty").unwrap();

    assert!(machine.clean_up(Args::new()).unwrap());
    assert!(machine.is_hanging());
    assert!(!machine.is_asleep());
}

#[test]
fn passing_guard_wins_over_later_candidate() {
    let mut machine = superhero("harry");
    machine.set_state("sweaty").unwrap();
    machine.model_mut().exhausted = true;

    assert!(machine.clean_up(Args::new()).unwrap());
    assert!(machine.is_asleep());
}

#[test]
fn undefined_trigger_for_state_is_a_fault() {
    let mut machine = superhero("harry");

    let err = machine.eat(Args::new()).unwrap_err();

    assert!(matches!(
        err,
        MachineError::InvalidTrigger { ref trigger, ref state }
            if trigger == "eat" && state == "asleep"
    ));
    assert!(machine.is_asleep());
}

#[test]
fn sole_rejected_candidate_returns_false() {
    let mut machine = superhero("harry");
    machine
        .add_guarded_transition("nap", "hanging", "asleep", [Condition::new("is_exhausted")])
        .unwrap();
    machine.wake_up(Args::new()).unwrap();
    let sum = machine.model().internal_state;

    assert!(!machine.trigger("nap", Args::new()).unwrap());
    assert!(machine.is_hanging());
    assert_eq!(machine.model().internal_state, sum);
}

#[test]
fn failing_guard_aborts_trigger_before_later_candidates() {
    let mut machine = superhero("harry");
    let later = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&later);
    machine
        .add_guarded_transition(
            "scramble",
            "asleep",
            "hanging",
            [Condition::new(Guard::try_new(|_hero: &Superhero| {
                Err("sensor".into())
            }))],
        )
        .unwrap();
    machine
        .add_guarded_transition(
            "scramble",
            "asleep",
            "hungry",
            [Condition::new(Guard::new(move |_hero: &Superhero| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }))],
        )
        .unwrap();

    let err = machine.trigger("scramble", Args::new()).unwrap_err();

    assert!(err.is_callback());
    assert!(machine.is_asleep());
    assert_eq!(later.load(Ordering::SeqCst), 0);
    assert_eq!(machine.model().internal_state, None);
}

#[test]
fn generic_entry_point_dispatches_by_name() {
    let mut machine = superhero("harry");

    assert!(machine.trigger("wake_up", Args::new()).unwrap());
    assert!(machine.is_hanging());

    let err = machine.trigger("fly", Args::new()).unwrap_err();
    assert!(matches!(err, MachineError::UnknownTrigger { .. }));
}

#[test]
fn exits_complete_before_enters_begin() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let record = |label: &'static str| {
        let order = Arc::clone(&order);
        move |_hero: &mut Superhero, _args: &Args| -> Result<(), CallbackError> {
            order.lock().unwrap().push(label);
            Ok(())
        }
    };

    let mut callbacks = Callbacks::new();
    callbacks
        .action("exit_one", record("exit one"))
        .action("exit_two", record("exit two"))
        .action("enter_one", record("enter one"))
        .action("enter_two", record("enter two"));

    let states = vec![
        State::new("asleep").on_exit("exit_one").on_exit("exit_two"),
        State::new("hanging").on_enter("enter_one").on_enter("enter_two"),
    ];
    let mut machine =
        Machine::with_callbacks(states, "asleep", Superhero::default(), callbacks).unwrap();
    machine.add_transition("wake_up", "asleep", "hanging").unwrap();

    machine.wake_up(Args::new()).unwrap();

    assert_eq!(
        *order.lock().unwrap(),
        vec!["exit one", "exit two", "enter one", "enter two"]
    );
}

#[test]
fn failing_exit_callback_leaves_state_unchanged() {
    let mut machine = superhero("harry");
    machine
        .callbacks_mut()
        .action("refuse", |_hero: &mut Superhero, _args: &Args| {
            Err("five more minutes".into())
        });
    machine
        .add_state(State::new("grumpy").on_exit("refuse"))
        .unwrap();
    machine.add_transition("wake_up", "grumpy", "hanging").unwrap();
    machine.set_state("grumpy").unwrap();

    let err = machine.wake_up(Args::new()).unwrap_err();

    assert!(err.is_callback());
    assert_eq!(
        std::error::Error::source(&err).map(ToString::to_string),
        Some("five more minutes".to_string())
    );
    assert_eq!(machine.state(), "grumpy");
}

#[test]
fn failing_enter_callback_is_reported_after_commit() {
    let mut machine = superhero("harry");
    let mut saving = State::new("saving the world");
    saving.add_callback(
        CallbackKind::OnEnter,
        Callback::new(|_hero: &mut Superhero, _args: &Args| {
            Err("villain escaped".into())
        }),
    );
    saving.add_callback(CallbackKind::OnEnter, "update_journal");
    machine.add_state(saving).unwrap();
    machine
        .add_transition("alarm", "asleep", "saving the world")
        .unwrap();

    let err = machine.trigger("alarm", Args::new()).unwrap_err();

    assert!(err.is_callback());
    assert_eq!(machine.state(), "saving the world");
    assert_eq!(machine.model().kittens_rescued, 0);
}

#[test]
fn bound_guards_and_callbacks_skip_the_registry() {
    let mut machine = superhero("harry");
    machine
        .add_state(State::new("rescuing").on_enter(Callback::new(
            |hero: &mut Superhero, _args: &Args| {
                hero.journal.push(format!("{} is rescuing", hero.name));
                Ok(())
            },
        )))
        .unwrap();
    machine
        .add_guarded_transition(
            "rescue",
            "hanging",
            "rescuing",
            [Condition::unless(Guard::new(|hero: &Superhero| hero.exhausted))],
        )
        .unwrap();
    machine.wake_up(Args::new()).unwrap();

    assert!(machine.trigger("rescue", Args::new()).unwrap());
    assert_eq!(machine.model().journal, vec!["harry is rescuing"]);
}

#[test]
fn triggers_available_from_states() {
    let machine = superhero("harry");

    let from_asleep: Vec<String> = machine.get_triggers(&["asleep"]).into_iter().collect();
    assert_eq!(from_asleep, vec!["wake_up", "work_out"]);

    let from_hanging_or_sweaty: Vec<String> = machine
        .get_triggers(&["hanging", "sweaty"])
        .into_iter()
        .collect();
    assert_eq!(from_hanging_or_sweaty, vec!["clean_up", "hiit", "work_out"]);
}
