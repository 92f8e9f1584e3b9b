//! Applying a reducer result to the runtime.

use super::arg::ReducerArg;
use super::result::ReducerResult;
use crate::core::Machine;
use crate::runtime::Runtime;
use std::rc::Rc;

/// Effect bound to its runtime and argument, ready to run.
pub type DeferredEffect = Box<dyn FnOnce()>;

/// Apply `result` for one action.
///
/// Any update is resolved against `arg` and merged into the runtime's
/// extended state immediately. Any effect is returned as a deferred closure
/// instead of being run; it captures `arg` by value so it later observes the
/// state as it was when this action was processed.
pub fn apply_reducer_result<M: Machine>(
    runtime: &Runtime<M>,
    arg: &ReducerArg<M>,
    result: ReducerResult<M>,
) -> Option<DeferredEffect> {
    if let Some(update) = result.update() {
        runtime.set_extended_state(update.resolve(arg));
    }

    let effect = Rc::clone(result.effect()?);
    let runtime = runtime.downgrade();
    let arg = arg.clone();
    Some(Box::new(move || {
        if let Some(runtime) = runtime.upgrade() {
            effect(&runtime, &arg);
        }
    }))
}
