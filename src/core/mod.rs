//! Core types shared by the runtime and interpreters.
//!
//! This module contains the vocabulary of the crate:
//! - The [`Machine`] / [`MachineState`] contract for external interpreters
//! - [`Event`] and [`Action`] values flowing in and out of a machine
//! - The [`ExtendedState`] trait with its shallow-merge semantics
//! - [`Guard`] predicates used by the bundled flat interpreter

mod action;
mod extstate;
mod guard;
mod state;

pub use action::{Action, ActionKind, Event, ACTIVITY_START, ACTIVITY_STOP};
pub use extstate::{json_patch, ExtendedState, JsonMap};
pub use guard::Guard;
pub use state::{Machine, MachineState, Patch};
