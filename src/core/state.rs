//! Contract between the runtime and an external statechart interpreter.
//!
//! The runtime never builds or mutates discrete states itself. It asks a
//! [`Machine`] for the initial state and for the next state given an event,
//! and reads the ordered action list each state carries.

use super::action::{Action, Event};
use super::extstate::ExtendedState;
use std::fmt::Debug;
use std::rc::Rc;

/// A discrete state produced by a [`Machine`].
///
/// All methods are pure. A state is an immutable snapshot describing where
/// the machine is and which actions were triggered on the way there.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Action, MachineState};
///
/// #[derive(Debug)]
/// struct Light {
///     name: &'static str,
///     actions: Vec<Action>,
/// }
///
/// impl MachineState for Light {
///     fn name(&self) -> &str {
///         self.name
///     }
///
///     fn actions(&self) -> &[Action] {
///         &self.actions
///     }
/// }
///
/// let red = Light { name: "red", actions: vec![Action::named("stop_traffic")] };
/// assert_eq!(red.name(), "red");
/// assert_eq!(red.actions().len(), 1);
/// assert!(!red.is_final());
/// ```
pub trait MachineState: Debug + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Ordered actions triggered by the transition (or initialisation) that
    /// produced this state, activity start/stop markers included.
    fn actions(&self) -> &[Action];

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// An external statechart interpreter.
///
/// Implementations resolve guards, hierarchy and action ordering on their
/// own; the runtime only consumes the result.
pub trait Machine: 'static {
    /// Discrete state type. Shared behind `Rc` so identity can be compared.
    type State: MachineState;

    /// Extended state consulted by guards and updated by reducers.
    type Ext: ExtendedState;

    /// The state the machine starts in, carrying its entry actions.
    fn initial_state(&self) -> Rc<Self::State>;

    /// Compute the next state.
    ///
    /// Must be pure with respect to its inputs. Returning `Rc::clone(current)`
    /// (the same allocation) signals that no transition occurred; any other
    /// `Rc` is adopted as the new state and its actions are processed.
    fn transition(
        &self,
        current: &Rc<Self::State>,
        event: &Event,
        extstate: &Self::Ext,
    ) -> Rc<Self::State>;
}

/// Patch type accepted by a machine's extended state.
pub type Patch<M> = <<M as Machine>::Ext as ExtendedState>::Patch;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestState {
        name: &'static str,
        actions: Vec<Action>,
        terminal: bool,
    }

    impl MachineState for TestState {
        fn name(&self) -> &str {
            self.name
        }

        fn actions(&self) -> &[Action] {
            &self.actions
        }

        fn is_final(&self) -> bool {
            self.terminal
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        let state = TestState {
            name: "idle",
            actions: Vec::new(),
            terminal: false,
        };
        assert_eq!(state.name(), "idle");
    }

    #[test]
    fn actions_preserve_order() {
        let state = TestState {
            name: "busy",
            actions: vec![Action::named("a"), Action::start("spin"), Action::named("b")],
            terminal: false,
        };
        let types: Vec<&str> = state.actions().iter().map(Action::action_type).collect();
        assert_eq!(types, vec!["a", crate::core::ACTIVITY_START, "b"]);
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        let done = TestState {
            name: "done",
            actions: Vec::new(),
            terminal: true,
        };
        assert!(done.is_final());
    }
}
