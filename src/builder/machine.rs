//! Builder for constructing flat machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::ExtendedState;
use crate::flat::{FlatMachine, FlatTransition, StateNode};
use std::collections::HashMap;

/// Builder for constructing [`FlatMachine`]s with a fluent API.
///
/// Every state a transition mentions must be declared, so lookups in the
/// built machine never fail.
pub struct FlatMachineBuilder<E> {
    initial: Option<String>,
    states: Vec<StateNode>,
    transitions: Vec<FlatTransition<E>>,
}

impl<E: ExtendedState> FlatMachineBuilder<E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Declare a state.
    pub fn state(mut self, node: StateNode) -> Self {
        self.states.push(node);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<E>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: FlatTransition<E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Build the machine.
    /// Returns an error if the initial state is missing or a name is unknown.
    pub fn build(self) -> Result<FlatMachine<E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut states = HashMap::with_capacity(self.states.len());
        for node in self.states {
            let name = node.name().to_string();
            if states.insert(name.clone(), node).is_some() {
                return Err(BuildError::DuplicateState { name });
            }
        }

        let known = |name: &str| -> Result<(), BuildError> {
            if states.contains_key(name) {
                Ok(())
            } else {
                Err(BuildError::UnknownState {
                    name: name.to_string(),
                })
            }
        };
        known(initial.as_str())?;
        for transition in &self.transitions {
            known(transition.from.as_str())?;
            if let Some(target) = &transition.target {
                known(target.as_str())?;
            }
        }

        FlatMachine::from_parts(&initial, states, self.transitions)
            .ok_or(BuildError::UnknownState { name: initial })
    }
}

impl<E: ExtendedState> Default for FlatMachineBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
