//! Build errors for runtime, machine and transition builders.

use thiserror::Error;

/// Errors that can occur when building runtimes, machines and transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Machine not specified. Call .machine(machine) before .build()")]
    MissingMachine,

    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("Transition source state not specified. Call .from(name)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Unknown state '{name}'. Declare it with .state(StateNode::new(..))")]
    UnknownState { name: String },

    #[error("State '{name}' declared twice")]
    DuplicateState { name: String },
}
