//! Flat statechart interpreter.

use super::state::{FlatState, StateNode};
use crate::builder::FlatMachineBuilder;
use crate::core::{Action, Event, ExtendedState, Guard, Machine, MachineState};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A transition out of one state.
pub struct FlatTransition<E> {
    pub from: String,
    pub event: String,
    /// `None` for a targetless transition that only runs its actions.
    pub target: Option<String>,
    pub guard: Option<Guard<E>>,
    pub actions: Vec<Action>,
}

impl<E> FlatTransition<E> {
    /// Check whether this transition handles `event` under `extstate`.
    pub fn can_fire(&self, extstate: &E, event: &Event) -> bool {
        self.event == event.name
            && self
                .guard
                .as_ref()
                .map_or(true, |guard| guard.check(extstate, event))
    }
}

impl<E> fmt::Debug for FlatTransition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatTransition")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("target", &self.target)
            .field("guarded", &self.guard.is_some())
            .field("actions", &self.actions)
            .finish()
    }
}

/// Non-hierarchical statechart over the extended state `E`.
///
/// Transitions are matched by event name in declaration order; the first
/// one whose guard passes wins. For a targeted transition the new state
/// carries, in order: the source's activity stops, its exit actions, the
/// transition actions, the target's entry actions and the target's activity
/// starts. Self-targeted transitions leave and re-enter.
pub struct FlatMachine<E> {
    initial: Rc<FlatState>,
    states: HashMap<String, StateNode>,
    transitions: HashMap<String, Vec<FlatTransition<E>>>,
}

impl<E: ExtendedState> FlatMachine<E> {
    pub fn builder() -> FlatMachineBuilder<E> {
        FlatMachineBuilder::new()
    }

    /// Assemble a machine from validated parts.
    pub(crate) fn from_parts(
        initial: &str,
        states: HashMap<String, StateNode>,
        transitions: Vec<FlatTransition<E>>,
    ) -> Option<Self> {
        let initial = states.get(initial)?;
        let initial = Rc::new(initial.snapshot(initial.enter_actions().collect()));

        let mut by_source: HashMap<String, Vec<FlatTransition<E>>> = HashMap::new();
        for transition in transitions {
            by_source
                .entry(transition.from.clone())
                .or_default()
                .push(transition);
        }

        Some(Self {
            initial,
            states,
            transitions: by_source,
        })
    }

    pub fn state_node(&self, name: &str) -> Option<&StateNode> {
        self.states.get(name)
    }

    /// Transitions declared out of `name`, in declaration order.
    pub fn transitions_from(&self, name: &str) -> &[FlatTransition<E>] {
        self.transitions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<E: ExtendedState> Machine for FlatMachine<E> {
    type State = FlatState;
    type Ext = E;

    fn initial_state(&self) -> Rc<FlatState> {
        Rc::clone(&self.initial)
    }

    fn transition(&self, current: &Rc<FlatState>, event: &Event, extstate: &E) -> Rc<FlatState> {
        let Some(transition) = self
            .transitions_from(current.name())
            .iter()
            .find(|transition| transition.can_fire(extstate, event))
        else {
            return Rc::clone(current);
        };

        let Some(target) = &transition.target else {
            if transition.actions.is_empty() {
                return Rc::clone(current);
            }
            return Rc::new((**current).clone().with_actions(transition.actions.clone()));
        };

        let (Some(source), Some(target)) =
            (self.states.get(current.name()), self.states.get(target))
        else {
            return Rc::clone(current);
        };

        let actions = source
            .leave_actions()
            .chain(transition.actions.iter().cloned())
            .chain(target.enter_actions())
            .collect();
        Rc::new(target.snapshot(actions))
    }
}

impl<E> fmt::Debug for FlatMachine<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states: Vec<&str> = self.states.keys().map(String::as_str).collect();
        states.sort_unstable();
        f.debug_struct("FlatMachine")
            .field("initial", &self.initial.name())
            .field("states", &states)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TransitionBuilder;
    use crate::core::JsonMap;
    use crate::reducer::dispatch_key;
    use serde_json::json;

    type Json = FlatMachine<JsonMap>;

    fn keys(state: &FlatState) -> Vec<String> {
        state
            .actions()
            .iter()
            .map(|action| dispatch_key(action).into_owned())
            .collect()
    }

    fn light() -> Json {
        FlatMachine::builder()
            .initial("green")
            .state(StateNode::new("green").entry("enter_green").activity("blink"))
            .state(StateNode::new("yellow").entry("enter_yellow").exit("leave_yellow"))
            .state(StateNode::new("red").final_state())
            .transition(
                TransitionBuilder::new()
                    .from("green")
                    .on("TIMER")
                    .to("yellow")
                    .action("count"),
            )
            .unwrap()
            .transition(TransitionBuilder::new().from("yellow").on("TIMER").to("red"))
            .unwrap()
            .transition(TransitionBuilder::new().from("yellow").on("NOTE").action("log"))
            .unwrap()
            .transition(TransitionBuilder::new().from("yellow").on("IGNORE"))
            .unwrap()
            .transition(TransitionBuilder::new().from("yellow").on("AGAIN").to("yellow"))
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn initial_state_runs_entry_then_activity_starts() {
        let machine = light();
        let initial = machine.initial_state();

        assert_eq!(initial.name(), "green");
        assert_eq!(keys(&initial), vec!["enter_green", "blink:start"]);
    }

    #[test]
    fn initial_state_is_shared() {
        let machine = light();
        assert!(Rc::ptr_eq(&machine.initial_state(), &machine.initial_state()));
    }

    #[test]
    fn targeted_transition_orders_actions() {
        let machine = light();
        let next = machine.transition(&machine.initial_state(), &"TIMER".into(), &JsonMap::new());

        assert_eq!(next.name(), "yellow");
        assert_eq!(keys(&next), vec!["blink:stop", "count", "enter_yellow"]);
    }

    #[test]
    fn unknown_event_returns_the_same_state() {
        let machine = light();
        let current = machine.initial_state();
        let next = machine.transition(&current, &"NOPE".into(), &JsonMap::new());

        assert!(Rc::ptr_eq(&current, &next));
    }

    #[test]
    fn targetless_transition_keeps_the_state_and_runs_its_actions() {
        let machine = light();
        let ext = JsonMap::new();
        let yellow = machine.transition(&machine.initial_state(), &"TIMER".into(), &ext);
        let noted = machine.transition(&yellow, &"NOTE".into(), &ext);

        assert!(!Rc::ptr_eq(&yellow, &noted));
        assert_eq!(noted.name(), "yellow");
        assert_eq!(keys(&noted), vec!["log"]);
    }

    #[test]
    fn targetless_transition_without_actions_is_no_transition() {
        let machine = light();
        let ext = JsonMap::new();
        let yellow = machine.transition(&machine.initial_state(), &"TIMER".into(), &ext);
        let ignored = machine.transition(&yellow, &"IGNORE".into(), &ext);

        assert!(Rc::ptr_eq(&yellow, &ignored));
    }

    #[test]
    fn self_transition_exits_and_reenters() {
        let machine = light();
        let ext = JsonMap::new();
        let yellow = machine.transition(&machine.initial_state(), &"TIMER".into(), &ext);
        let again = machine.transition(&yellow, &"AGAIN".into(), &ext);

        assert_eq!(again.name(), "yellow");
        assert_eq!(keys(&again), vec!["leave_yellow", "enter_yellow"]);
    }

    #[test]
    fn final_states_report_final() {
        let machine = light();
        let ext = JsonMap::new();
        let yellow = machine.transition(&machine.initial_state(), &"TIMER".into(), &ext);
        let red = machine.transition(&yellow, &"TIMER".into(), &ext);

        assert!(red.is_final());
    }

    #[test]
    fn first_passing_guard_wins() {
        let machine: Json = FlatMachine::builder()
            .initial("idle")
            .state(StateNode::new("idle"))
            .state(StateNode::new("small"))
            .state(StateNode::new("large"))
            .transition(
                TransitionBuilder::new()
                    .from("idle")
                    .on("GO")
                    .to("large")
                    .when(|ext: &JsonMap, _: &Event| ext.get("size") == Some(&json!("large"))),
            )
            .unwrap()
            .transition(TransitionBuilder::new().from("idle").on("GO").to("small"))
            .unwrap()
            .build()
            .unwrap();

        let idle = machine.initial_state();
        let large = crate::core::json_patch(json!({ "size": "large" })).unwrap();

        assert_eq!(machine.transition(&idle, &"GO".into(), &large).name(), "large");
        assert_eq!(machine.transition(&idle, &"GO".into(), &JsonMap::new()).name(), "small");
    }

    #[test]
    fn guards_see_the_event_payload() {
        let machine: Json = FlatMachine::builder()
            .initial("idle")
            .state(StateNode::new("idle"))
            .state(StateNode::new("done"))
            .transition(
                TransitionBuilder::new()
                    .from("idle")
                    .on("GO")
                    .to("done")
                    .when(|_: &JsonMap, event: &Event| event.get("ok") == Some(&json!(true))),
            )
            .unwrap()
            .build()
            .unwrap();
        let idle = machine.initial_state();

        let refused = machine.transition(&idle, &Event::new("GO"), &JsonMap::new());
        let accepted = machine.transition(&idle, &Event::new("GO").with("ok", true), &JsonMap::new());

        assert!(Rc::ptr_eq(&idle, &refused));
        assert_eq!(accepted.name(), "done");
    }
}
