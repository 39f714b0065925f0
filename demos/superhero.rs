//! Superhero State Machine
//!
//! This example walks a narcoleptic superhero through a day.
//!
//! Key concepts:
//! - Callbacks registered by name on the model
//! - Convention callbacks (`on_exit_asleep`) picked up automatically
//! - Several candidates for one trigger, resolved in declaration order
//! - Typed trigger methods generated with `triggers!`
//!
//! Run with: RUST_LOG=debug cargo run --example superhero

use switchyard::builder::{guarded_transition, transition, MachineBuilder};
use switchyard::{triggers, Args, Callbacks, MachineError, Model, State};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Superhero {
    name: String,
    state: String,
    kittens_rescued: u32,
    internal_state: i64,
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
                hero.internal_state = a + b;
                Ok(())
            })
            .action("update_journal", |hero: &mut Superhero, _args: &Args| {
                hero.kittens_rescued += 1;
                Ok(())
            })
            // Most of the time they are fine.
            .predicate("is_exhausted", |_hero: &Superhero| false);
    }
}

triggers! {
    trait SuperheroTriggers for Superhero {
        wake_up,
        work_out,
        eat,
        clean_up,
        distress_call,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Superhero State Machine Example ===\n");

    let hero = Superhero {
        name: "Harry".to_string(),
        ..Default::default()
    };

    let mut machine = MachineBuilder::new()
        .states(["asleep", "hanging", "hungry", "sweaty"])
        .state(State::new("saving the world").on_exit("update_journal"))
        .initial("asleep")
        .transitions([
            transition("wake_up", "asleep", "hanging"),
            transition("work_out", "hanging", "hungry"),
            transition("work_out", "asleep", "hungry"),
            transition("hiit", "hanging", "sweaty"),
            transition("eat", "hungry", "hanging"),
            guarded_transition("clean_up", "sweaty", "asleep", "is_exhausted"),
            transition("clean_up", "sweaty", "hanging"),
            transition("distress_call", "hanging", "saving the world"),
            transition("distress_call", "saving the world", "sweaty"),
        ])
        .build(hero)?;

    println!("{} starts out {}", machine.model().name, machine.state());

    machine.wake_up(Args::new().arg(200).arg(300))?;
    println!(
        "woke up: now {}, internal state {}",
        machine.state(),
        machine.model().internal_state
    );

    machine.distress_call(Args::new())?;
    println!("answered a distress call: {}", machine.state());
    machine.distress_call(Args::new())?;
    println!(
        "back from the rescue: {} ({} kittens rescued)",
        machine.state(),
        machine.model().kittens_rescued
    );

    machine.clean_up(Args::new())?;
    println!("cleaned up: {}", machine.state());

    machine.work_out(Args::new())?;
    machine.eat(Args::new())?;
    println!("worked out and ate: {}", machine.state());

    println!("\nTriggers from 'hanging': {:?}", machine.get_triggers(&["hanging"]));

    match machine.eat(Args::new()) {
        Err(MachineError::InvalidTrigger { trigger, state }) => {
            println!("can't {trigger} while {state}");
        }
        other => println!("unexpected outcome: {other:?}"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
