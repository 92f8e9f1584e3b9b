//! Reducer Map
//!
//! This example demonstrates how actions become extended state updates
//! and side effects.
//!
//! Key concepts:
//! - Entry, exit and transition actions dispatched through a reducer map
//! - Updates applied immediately, effects deferred to the end of the batch
//! - An effect driving a follow-up transition inside the same operation
//!
//! Run with: cargo run --example reducer_map

use serde_json::json;
use statewise::builder::TransitionBuilder;
use statewise::core::{json_patch, Event, JsonMap, MachineState};
use statewise::flat::{FlatMachine, StateNode};
use statewise::reducer::{Reducer, ReducerArg, ReducerMap, ReducerSpec};
use statewise::reducer_map;
use statewise::runtime::Runtime;

type Cart = FlatMachine<JsonMap>;
type R = Reducer<Cart>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Reducer Map ===\n");

    let machine: Cart = FlatMachine::builder()
        .initial("shopping")
        .state(StateNode::new("shopping"))
        .state(StateNode::new("checkout").entry("total").entry("confirm"))
        .state(StateNode::new("paid").entry("receipt").final_state())
        .transition(TransitionBuilder::new().from("shopping").on("ADD").action("add_item"))?
        .transition(
            TransitionBuilder::new()
                .from("shopping")
                .on("CHECKOUT")
                .to("checkout")
                .when(|ext: &JsonMap, _: &Event| {
                    ext.get("items")
                        .and_then(|items| items.as_array())
                        .is_some_and(|items| !items.is_empty())
                }),
        )?
        .transition(TransitionBuilder::new().from("checkout").on("PAY").to("paid"))?
        .build()?;

    let reducers: ReducerMap<Cart> = reducer_map! {
        "add_item" => ReducerSpec::from_fn(|arg: &ReducerArg<Cart>| {
            let item = arg.event.as_ref()?.get("item")?.clone();
            let mut items = arg.extstate["items"].as_array().cloned().unwrap_or_default();
            items.push(item);
            Some(R::update(json_patch(json!({ "items": items }))?))
        }),
        "total" => R::update_with(|arg| {
            let count = arg.extstate["items"].as_array().map_or(0, Vec::len);
            json_patch(json!({ "total": count * 5 }))
        }),
        "confirm" => R::effect(|runtime, arg| {
            println!("  confirming order of {}", arg.extstate["total"]);
            if let Err(err) = runtime.transition("PAY") {
                eprintln!("  payment failed: {err}");
            }
        }),
        "receipt" => R::effect(|_, arg| println!("  receipt issued in state '{}'", arg.state.name())),
    };

    let runtime = Runtime::builder()
        .machine(machine)
        .extstate(json_patch(json!({ "items": [] })).unwrap_or_default())
        .reducer(reducers)
        .build()?;

    runtime.change().on(|change| {
        let name = change.state.as_ref().map_or("-", |state| state.name());
        let extstate = serde_json::to_string(&*change.extstate).unwrap_or_default();
        println!("  change -> {name} {extstate}");
    });

    runtime.init();

    println!("CHECKOUT with an empty cart (guard refuses):");
    runtime.transition("CHECKOUT")?;

    for item in ["apple", "pear"] {
        println!("ADD {item}:");
        runtime.transition(Event::new("ADD").with("item", item))?;
    }

    println!("CHECKOUT (total, confirm and PAY fold into one change):");
    runtime.transition("CHECKOUT")?;

    println!("\n=== Example Complete ===");
    Ok(())
}
