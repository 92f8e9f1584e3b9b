//! Statewise: a stateful runtime for statechart machines
//!
//! Statewise pairs an external statechart interpreter with an extended
//! state. The interpreter stays pure: it maps a state and an event to the
//! next state and the actions triggered on the way. The runtime owns the
//! current state and the extended state, turns actions into state updates
//! and side effects through reducers, and reports every externally
//! triggered operation with exactly one `change` notification.
//!
//! # Core Concepts
//!
//! - **Machine**: the interpreter contract, via the `Machine` trait
//! - **Reducers**: map action keys to updates and effects
//! - **Runtime**: orchestrates transitions, reducers and notifications
//! - **Activities**: timer-backed `:start` / `:stop` reducer pairs
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use statewise::builder::TransitionBuilder;
//! use statewise::core::{json_patch, JsonMap, MachineState};
//! use statewise::flat::{FlatMachine, StateNode};
//! use statewise::reducer::{Reducer, ReducerMap};
//! use statewise::runtime::Runtime;
//!
//! type Json = FlatMachine<JsonMap>;
//! type R = Reducer<Json>;
//!
//! let machine: Json = FlatMachine::builder()
//!     .initial("down")
//!     .state(StateNode::new("down"))
//!     .state(StateNode::new("up").entry("count"))
//!     .transition(TransitionBuilder::new().from("down").on("SWITCH").to("up"))?
//!     .transition(TransitionBuilder::new().from("up").on("SWITCH").to("down"))?
//!     .build()?;
//!
//! let reducers = ReducerMap::<Json>::new().with(
//!     "count",
//!     R::update_with(|arg| {
//!         let ups = arg.extstate["ups"].as_u64().unwrap_or(0);
//!         json_patch(json!({ "ups": ups + 1 }))
//!     }),
//! );
//!
//! let runtime = Runtime::builder()
//!     .machine(machine)
//!     .extstate(json_patch(json!({ "ups": 0 })).unwrap())
//!     .reducer(reducers)
//!     .build()?;
//!
//! runtime.init();
//! runtime.transition("SWITCH")?;
//! runtime.transition("SWITCH")?;
//! runtime.transition("SWITCH")?;
//!
//! assert_eq!(runtime.state().unwrap().name(), "up");
//! assert_eq!(runtime.extended_state()["ups"], json!(2));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod flat;
pub mod reducer;
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, RuntimeBuilder, TransitionBuilder};
pub use core::{Action, Event, ExtendedState, JsonMap, Machine, MachineState};
pub use flat::{FlatMachine, StateNode};
pub use reducer::{Reducer, ReducerMap, ReducerResult, ReducerSpec, TimerActivity, Update};
pub use runtime::{Change, Runtime, RuntimeError};
