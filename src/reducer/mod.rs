//! Reducers: how actions turn into extended state updates and side effects.
//!
//! Every action of a batch is normalized to a dispatch key, looked up in a
//! compiled [`ReducerMap`] and resolved to a [`ReducerResult`]:
//!
//! - **Updates** are merged into the extended state right away
//! - **Effects** are queued and run once the whole batch has been reduced
//!
//! [`Reducer`] bundles the constructors application code uses to describe
//! these results, along with the timer activity helpers.

mod activity;
mod apply;
mod arg;
mod map;
mod result;
mod spec;

pub use activity::{ActivityReducers, TimerActivity, MIN_INTERVAL};
pub use apply::{apply_reducer_result, DeferredEffect};
pub use arg::ReducerArg;
pub use map::{dispatch_key, ReducerMap};
pub use result::{EffectFn, ReducerResult, Update, UpdaterFn};
pub use spec::{ReducerFn, ReducerSpec};

use crate::core::{Machine, Patch};
use crate::runtime::Runtime;
use activity::{timer_activity, TimerKind};
use std::future::Future;
use std::marker::PhantomData;
use std::rc::Rc;

/// Constructors for reducer results, maps and activity helpers.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use statewise::core::{json_patch, JsonMap};
/// use statewise::flat::FlatMachine;
/// use statewise::reducer::{Reducer, ReducerMap};
///
/// type Json = FlatMachine<JsonMap>;
/// type R = Reducer<Json>;
///
/// let map = ReducerMap::<Json>::new()
///     .with("reset", R::update(json_patch(json!({ "count": 0 })).unwrap()))
///     .with("inc", R::update_with(|arg| {
///         let count = arg.extstate["count"].as_i64().unwrap_or(0);
///         json_patch(json!({ "count": count + 1 }))
///     }))
///     .with("log", R::effect(|_runtime, arg| println!("{:?}", arg.action)));
///
/// assert_eq!(map.len(), 3);
/// ```
pub struct Reducer<M>(PhantomData<M>);

impl<M: Machine> Reducer<M> {
    pub fn no_update() -> ReducerResult<M> {
        ReducerResult::NoUpdate
    }

    /// Merge a literal patch.
    pub fn update(patch: Patch<M>) -> ReducerResult<M> {
        ReducerResult::Update(Update::Patch(patch))
    }

    /// Merge the patch computed from the reducer argument, if any.
    pub fn update_with<F>(updater: F) -> ReducerResult<M>
    where
        F: Fn(&ReducerArg<M>) -> Option<Patch<M>> + 'static,
    {
        ReducerResult::Update(Update::with(updater))
    }

    /// Run `effect` after all updates of the batch.
    pub fn effect<F>(effect: F) -> ReducerResult<M>
    where
        F: Fn(&Runtime<M>, &ReducerArg<M>) + 'static,
    {
        ReducerResult::Effect(Rc::new(effect))
    }

    /// Spawn the future built by `effect` after all updates of the batch.
    ///
    /// The future is spawned on the current `LocalSet` and never joined.
    /// Whatever it does to the runtime after its first suspension point
    /// happens outside the operation that queued it and produces its own
    /// change notification.
    ///
    /// # Panics
    ///
    /// The returned effect panics when it runs outside a
    /// [`tokio::task::LocalSet`], since it uses [`tokio::task::spawn_local`].
    /// The panic unwinds out of the `init` or `transition` that ran the
    /// batch and leaves the runtime unusable.
    pub fn effect_async<F, Fut>(effect: F) -> ReducerResult<M>
    where
        F: Fn(Runtime<M>, ReducerArg<M>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        Self::effect(move |runtime, arg| {
            tokio::task::spawn_local(effect(runtime.clone(), arg.clone()));
        })
    }

    pub fn update_with_effect<F>(update: Update<M>, effect: F) -> ReducerResult<M>
    where
        F: Fn(&Runtime<M>, &ReducerArg<M>) + 'static,
    {
        ReducerResult::UpdateWithEffect(update, Rc::new(effect))
    }

    /// Compile a map into a single dispatching reducer.
    pub fn map(map: ReducerMap<M>) -> ReducerSpec<M> {
        map.compile()
    }

    /// Fire `config.event` once, `config.period` after the activity starts.
    pub fn timeout_activity(config: TimerActivity) -> ActivityReducers<M> {
        timer_activity(config, TimerKind::Timeout)
    }

    /// Fire `config.event` every `config.period` while the activity runs.
    ///
    /// Periods shorter than [`MIN_INTERVAL`] tick at [`MIN_INTERVAL`].
    pub fn interval_activity(config: TimerActivity) -> ActivityReducers<M> {
        timer_activity(config, TimerKind::Interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{json_patch, JsonMap};
    use crate::flat::FlatMachine;
    use serde_json::json;

    type R = Reducer<FlatMachine<JsonMap>>;

    #[test]
    fn no_update_has_neither_update_nor_effect() {
        let result = R::no_update();
        assert!(result.is_no_update());
        assert!(result.update().is_none());
        assert!(result.effect().is_none());
    }

    #[test]
    fn update_carries_only_an_update() {
        let result = R::update(json_patch(json!({ "foo": 1 })).unwrap());
        assert!(matches!(result.update(), Some(Update::Patch(_))));
        assert!(result.effect().is_none());
    }

    #[test]
    fn update_with_carries_an_updater() {
        let result = R::update_with(|_| None);
        assert!(matches!(result.update(), Some(Update::With(_))));
    }

    #[test]
    fn effect_carries_only_an_effect() {
        let result = R::effect(|_, _| {});
        assert!(result.update().is_none());
        assert!(result.effect().is_some());
    }

    #[test]
    fn update_with_effect_carries_both() {
        let result = R::update_with_effect(Update::patch(JsonMap::new()), |_, _| {});
        assert!(result.update().is_some());
        assert!(result.effect().is_some());
    }

    #[test]
    fn map_compiles_into_a_function_spec() {
        let map = ReducerMap::<FlatMachine<JsonMap>>::new().with("a", R::no_update());
        let spec = R::map(map);
        assert!(matches!(spec, ReducerSpec::Fn(_)));
    }
}
