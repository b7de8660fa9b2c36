//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - Entry and exit callbacks
//! - Sequence patterns over the visit history
//! - Rejected transitions leave the machine untouched
//!
//! Run with: cargo run --example traffic_light

use esm::builder::StateMachineBuilder;
use esm::state_enum;

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let mut machine = StateMachineBuilder::new()
        .initial(TrafficLight::Red)
        .transition(TrafficLight::Red, TrafficLight::Green)
        .transition(TrafficLight::Green, TrafficLight::Yellow)
        .transition(TrafficLight::Yellow, TrafficLight::Red)
        .on_exiting(TrafficLight::Red, |_| {
            println!("  (cross traffic stopped)");
            Ok(())
        })
        .on_entering(TrafficLight::Green, |ctx| {
            println!("  Go! (came from {})", ctx.from.name());
            Ok(())
        })
        .on_sequence(
            [
                TrafficLight::Red,
                TrafficLight::Green,
                TrafficLight::Yellow,
                TrafficLight::Red,
            ],
            |_| {
                println!("  Full cycle completed");
                Ok(())
            },
        )
        .and_then(|builder| builder.build())
        .unwrap();

    println!("Initial state: {:?}\n", machine.current_state());

    println!("Transition sequence:");
    for next in [
        TrafficLight::Green,
        TrafficLight::Yellow,
        TrafficLight::Red,
        TrafficLight::Green,
    ] {
        let report = machine.fire_transition(next).unwrap();
        println!("  {} -> {}", report.from.name(), report.to.name());
    }

    println!("\nTrying Green -> Red directly:");
    match machine.fire_transition(TrafficLight::Red) {
        Ok(_) => println!("  unexpectedly allowed"),
        Err(e) => println!("  rejected: {e}"),
    }

    let path: Vec<_> = machine.history().path().iter().map(|s| s.name()).collect();
    println!("\nVisited: {}", path.join(" -> "));

    println!("\n=== Example Complete ===");
}
