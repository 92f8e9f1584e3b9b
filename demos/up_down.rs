//! Up/Down Toggle
//!
//! This example demonstrates the smallest useful runtime: two states
//! toggled by one event, observed through the `change` channel.
//!
//! Key concepts:
//! - Building a flat machine
//! - `init` and `transition`
//! - One `change` notification per operation
//!
//! Run with: cargo run --example up_down

use statewise::builder::simple_transition;
use statewise::core::{JsonMap, MachineState};
use statewise::flat::{FlatMachine, StateNode};
use statewise::runtime::Runtime;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Up/Down Toggle ===\n");

    let machine = FlatMachine::<JsonMap>::builder()
        .initial("down")
        .state(StateNode::new("down"))
        .state(StateNode::new("up"))
        .add_transition(simple_transition("down", "SWITCH", "up"))
        .add_transition(simple_transition("up", "SWITCH", "down"))
        .build()?;

    let runtime = Runtime::builder().machine(machine).build()?;
    runtime.change().on(|change| {
        if let Some(state) = &change.state {
            println!("  change -> {}", state.name());
        }
    });

    println!("init:");
    runtime.init();

    for round in 1..=4 {
        println!("SWITCH #{round}:");
        runtime.transition("SWITCH")?;
    }

    println!("UNKNOWN (ignored, no change expected):");
    runtime.transition("UNKNOWN")?;

    println!("\n=== Example Complete ===");
    Ok(())
}
