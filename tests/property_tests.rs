//! Property-based tests for batching and extended state invariants.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated action batches and patches.

mod common;

use common::{count_changes, Json, R};
use proptest::prelude::*;
use serde_json::Value;
use statewise::builder::TransitionBuilder;
use statewise::core::{Action, ExtendedState, JsonMap};
use statewise::flat::{FlatMachine, StateNode};
use statewise::reducer::{dispatch_key, ReducerMap};
use statewise::runtime::Runtime;
use std::cell::RefCell;
use std::rc::Rc;

/// One generated action: `true` updates the extended state, `false` runs
/// an effect.
fn action_key(index: usize, is_update: bool) -> String {
    if is_update {
        format!("set{index}")
    } else {
        format!("fx{index}")
    }
}

/// Observed by effect `index`: keys in its captured snapshot and keys in
/// the live extended state when it ran.
type EffectLog = Rc<RefCell<Vec<(usize, usize, usize)>>>;

fn batch_runtime(batch: &[bool], log: &EffectLog) -> Runtime<Json> {
    let node = batch
        .iter()
        .enumerate()
        .fold(StateNode::new("batch"), |node, (index, &is_update)| {
            node.entry(action_key(index, is_update).as_str())
        });
    let machine: Json = FlatMachine::builder()
        .initial("start")
        .state(StateNode::new("start"))
        .state(node)
        .transition(TransitionBuilder::new().from("start").on("GO").to("batch"))
        .unwrap()
        .build()
        .unwrap();

    let mut reducers = ReducerMap::<Json>::new();
    for (index, &is_update) in batch.iter().enumerate() {
        let key = action_key(index, is_update);
        if is_update {
            let mut patch = JsonMap::new();
            patch.insert(key.clone(), Value::Bool(true));
            reducers.insert(key, R::update(patch));
        } else {
            let log = Rc::clone(log);
            reducers.insert(
                key,
                R::effect(move |runtime, arg| {
                    log.borrow_mut().push((
                        index,
                        arg.extstate.len(),
                        runtime.extended_state().len(),
                    ));
                }),
            );
        }
    }

    let runtime = Runtime::builder()
        .machine(machine)
        .reducer(reducers)
        .build()
        .unwrap();
    runtime.init();
    runtime
}

prop_compose! {
    fn arbitrary_patch()(entries in prop::collection::btree_map("[a-e]", 0..100i64, 0..5)) -> JsonMap {
        entries
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()
    }
}

proptest! {
    #[test]
    fn one_change_per_batch(batch in prop::collection::vec(any::<bool>(), 0..12)) {
        let log: EffectLog = Rc::default();
        let runtime = batch_runtime(&batch, &log);
        let changes = count_changes(&runtime);

        runtime.transition("GO").unwrap();

        prop_assert_eq!(changes.get(), 1);
    }

    #[test]
    fn effects_run_after_every_update_in_order(batch in prop::collection::vec(any::<bool>(), 0..12)) {
        let log: EffectLog = Rc::default();
        let runtime = batch_runtime(&batch, &log);

        runtime.transition("GO").unwrap();

        let total_updates = batch.iter().filter(|&&is_update| is_update).count();
        let expected: Vec<(usize, usize, usize)> = batch
            .iter()
            .enumerate()
            .filter(|(_, &is_update)| !is_update)
            .map(|(index, _)| {
                let earlier_updates = batch[..index].iter().filter(|&&is_update| is_update).count();
                (index, earlier_updates, total_updates)
            })
            .collect();
        prop_assert_eq!(log.borrow().clone(), expected);
    }

    #[test]
    fn before_and_after_carry_the_full_list(batch in prop::collection::vec(any::<bool>(), 1..12)) {
        let log: EffectLog = Rc::default();
        let runtime = batch_runtime(&batch, &log);
        let seen: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();
        let keys = |actions: &[Action]| -> Vec<String> {
            actions.iter().map(|action| dispatch_key(action).into_owned()).collect()
        };
        {
            let seen = Rc::clone(&seen);
            runtime.before_actions().on(move |actions| seen.borrow_mut().push(keys(actions)));
        }
        {
            let seen = Rc::clone(&seen);
            runtime.after_actions().on(move |actions| seen.borrow_mut().push(keys(actions)));
        }

        runtime.transition("GO").unwrap();

        let expected: Vec<String> = batch
            .iter()
            .enumerate()
            .map(|(index, &is_update)| action_key(index, is_update))
            .collect();
        prop_assert_eq!(seen.borrow().clone(), vec![expected.clone(), expected]);
    }

    #[test]
    fn merge_keeps_absent_keys(base in arbitrary_patch(), patch in arbitrary_patch()) {
        let merged = base.merge(patch.clone());

        for (key, value) in &base {
            let expected = patch.get(key).unwrap_or(value);
            prop_assert_eq!(merged.get(key), Some(expected));
        }
        for (key, value) in &patch {
            prop_assert_eq!(merged.get(key), Some(value));
        }
    }

    #[test]
    fn merge_never_mutates_the_original(base in arbitrary_patch(), patch in arbitrary_patch()) {
        let snapshot = base.clone();
        let _ = base.merge(patch);
        prop_assert_eq!(base, snapshot);
    }
}
