//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use serde_json::Value;
use statewise::builder::TransitionBuilder;
use statewise::core::{json_patch, JsonMap, MachineState};
use statewise::flat::{FlatMachine, StateNode};
use statewise::reducer::Reducer;
use statewise::runtime::Runtime;
use std::cell::Cell;
use std::rc::Rc;

pub type Json = FlatMachine<JsonMap>;
pub type R = Reducer<Json>;

/// Two states toggled by `SWITCH`.
pub fn updown() -> Json {
    FlatMachine::builder()
        .initial("down")
        .state(StateNode::new("down"))
        .state(StateNode::new("up"))
        .transition(TransitionBuilder::new().from("down").on("SWITCH").to("up"))
        .unwrap()
        .transition(TransitionBuilder::new().from("up").on("SWITCH").to("down"))
        .unwrap()
        .build()
        .unwrap()
}

/// JSON object literal as extended state or patch.
pub fn obj(value: Value) -> JsonMap {
    json_patch(value).expect("fixture must be a JSON object")
}

pub fn ext_value(runtime: &Runtime<Json>) -> Value {
    Value::Object((*runtime.extended_state()).clone())
}

pub fn state_name(runtime: &Runtime<Json>) -> String {
    runtime
        .state()
        .map(|state| state.name().to_string())
        .unwrap_or_default()
}

/// Count `change` notifications from now on.
pub fn count_changes(runtime: &Runtime<Json>) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let inner = Rc::clone(&count);
    runtime.change().on(move |_| inner.set(inner.get() + 1));
    count
}
