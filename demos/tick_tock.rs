//! Tick Tock
//!
//! This example demonstrates timer activities on a tokio `LocalSet`.
//!
//! Key concepts:
//! - `interval_activity` firing an event while a state is active
//! - `timeout_activity` leaving a state after a delay
//! - Timers cancelled when their state is exited
//!
//! Run with: RUST_LOG=statewise=debug cargo run --example tick_tock

use serde_json::json;
use statewise::builder::TransitionBuilder;
use statewise::core::{json_patch, JsonMap, MachineState};
use statewise::flat::{FlatMachine, StateNode};
use statewise::reducer::{Reducer, ReducerMap, TimerActivity};
use statewise::runtime::Runtime;
use std::time::Duration;
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

type Clock = FlatMachine<JsonMap>;
type R = Reducer<Clock>;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn clock() -> Result<Runtime<Clock>, Box<dyn std::error::Error>> {
    let machine: Clock = FlatMachine::builder()
        .initial("ticking")
        .state(StateNode::new("ticking").activity("metronome").activity("alarm"))
        .state(StateNode::new("ringing").entry("ring").final_state())
        .transition(TransitionBuilder::new().from("ticking").on("TICK").action("tock"))?
        .transition(TransitionBuilder::new().from("ticking").on("ALARM").to("ringing"))?
        .build()?;

    let reducers = ReducerMap::<Clock>::new()
        .with(
            "tock",
            R::update_with(|arg| {
                let ticks = arg.extstate["ticks"].as_u64().unwrap_or(0);
                json_patch(json!({ "ticks": ticks + 1 }))
            }),
        )
        .with(
            "ring",
            R::effect(|_, arg| println!("  ring ring after {} ticks", arg.extstate["ticks"])),
        );

    let runtime = Runtime::builder()
        .machine(machine)
        .extstate(json_patch(json!({ "ticks": 0 })).unwrap_or_default())
        .reducers(reducers)
        .activity(R::interval_activity(TimerActivity::new(
            "metronome",
            Duration::from_millis(250),
            "TICK",
        )))
        .activity(R::timeout_activity(TimerActivity::new(
            "alarm",
            Duration::from_millis(1100),
            "ALARM",
        )))
        .build()?;
    Ok(runtime)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    println!("=== Tick Tock ===\n");

    let local = LocalSet::new();
    local
        .run_until(async {
            let runtime = clock()?;
            runtime.change().on(|change| {
                let name = change.state.as_ref().map_or("-", |state| state.name());
                println!("  change -> {name} ticks={}", change.extstate["ticks"]);
            });

            runtime.init();
            tokio::time::sleep(Duration::from_millis(1500)).await;

            println!("\nFinal state: {:?}", runtime.state().map(|state| state.name().to_string()));
            Ok::<(), Box<dyn std::error::Error>>(())
        })
        .await?;

    println!("\n=== Example Complete ===");
    Ok(())
}
