//! Reducer results: what one action does to the runtime.

use super::arg::ReducerArg;
use crate::core::{Machine, Patch};
use crate::runtime::Runtime;
use std::fmt;
use std::rc::Rc;

/// Side effect run after every update of its batch has been applied.
///
/// Receives the live runtime and the snapshot taken when its action was
/// processed.
pub type EffectFn<M> = Rc<dyn Fn(&Runtime<M>, &ReducerArg<M>)>;

/// Updater computing a patch from the reducer argument.
pub type UpdaterFn<M> = Rc<dyn Fn(&ReducerArg<M>) -> Option<Patch<M>>>;

/// Extended state update carried by a [`ReducerResult`].
pub enum Update<M: Machine> {
    /// Literal patch merged as-is.
    Patch(Patch<M>),
    /// Patch computed from the reducer argument. `None` means no update.
    With(UpdaterFn<M>),
}

impl<M: Machine> Update<M> {
    pub fn patch(patch: Patch<M>) -> Self {
        Self::Patch(patch)
    }

    pub fn with<F>(updater: F) -> Self
    where
        F: Fn(&ReducerArg<M>) -> Option<Patch<M>> + 'static,
    {
        Self::With(Rc::new(updater))
    }

    /// Resolve to a concrete patch for this argument.
    pub fn resolve(&self, arg: &ReducerArg<M>) -> Option<Patch<M>> {
        match self {
            Self::Patch(patch) => Some(patch.clone()),
            Self::With(updater) => updater(arg),
        }
    }
}

impl<M: Machine> Clone for Update<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Patch(patch) => Self::Patch(patch.clone()),
            Self::With(updater) => Self::With(Rc::clone(updater)),
        }
    }
}

impl<M: Machine> fmt::Debug for Update<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patch(patch) => f.debug_tuple("Patch").field(patch).finish(),
            Self::With(_) => f.write_str("With(<fn>)"),
        }
    }
}

/// Consequence of one action.
pub enum ReducerResult<M: Machine> {
    NoUpdate,
    Update(Update<M>),
    Effect(EffectFn<M>),
    /// The update is applied before the effect is queued.
    UpdateWithEffect(Update<M>, EffectFn<M>),
}

impl<M: Machine> ReducerResult<M> {
    pub fn update(&self) -> Option<&Update<M>> {
        match self {
            Self::Update(update) | Self::UpdateWithEffect(update, _) => Some(update),
            Self::NoUpdate | Self::Effect(_) => None,
        }
    }

    pub fn effect(&self) -> Option<&EffectFn<M>> {
        match self {
            Self::Effect(effect) | Self::UpdateWithEffect(_, effect) => Some(effect),
            Self::NoUpdate | Self::Update(_) => None,
        }
    }

    pub fn is_no_update(&self) -> bool {
        matches!(self, Self::NoUpdate)
    }
}

impl<M: Machine> Clone for ReducerResult<M> {
    fn clone(&self) -> Self {
        match self {
            Self::NoUpdate => Self::NoUpdate,
            Self::Update(update) => Self::Update(update.clone()),
            Self::Effect(effect) => Self::Effect(Rc::clone(effect)),
            Self::UpdateWithEffect(update, effect) => {
                Self::UpdateWithEffect(update.clone(), Rc::clone(effect))
            }
        }
    }
}

impl<M: Machine> fmt::Debug for ReducerResult<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoUpdate => f.write_str("NoUpdate"),
            Self::Update(update) => f.debug_tuple("Update").field(update).finish(),
            Self::Effect(_) => f.write_str("Effect(<fn>)"),
            Self::UpdateWithEffect(update, _) => f
                .debug_tuple("UpdateWithEffect")
                .field(update)
                .field(&"<fn>")
                .finish(),
        }
    }
}

impl<M: Machine> Default for ReducerResult<M> {
    fn default() -> Self {
        Self::NoUpdate
    }
}

/// A reducer that returns nothing is treated as [`ReducerResult::NoUpdate`].
impl<M: Machine> From<()> for ReducerResult<M> {
    fn from(_: ()) -> Self {
        Self::NoUpdate
    }
}

impl<M: Machine> From<Option<ReducerResult<M>>> for ReducerResult<M> {
    fn from(result: Option<ReducerResult<M>>) -> Self {
        result.unwrap_or_default()
    }
}

impl<M: Machine> From<Update<M>> for ReducerResult<M> {
    fn from(update: Update<M>) -> Self {
        Self::Update(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::JsonMap;
    use crate::flat::FlatMachine;

    type Json = FlatMachine<JsonMap>;
    type Outcome = ReducerResult<Json>;

    #[test]
    fn unit_converts_to_no_update() {
        assert!(Outcome::from(()).is_no_update());
    }

    #[test]
    fn none_converts_to_no_update() {
        assert!(Outcome::from(None).is_no_update());
    }

    #[test]
    fn some_keeps_the_inner_result() {
        let result = Outcome::from(Some(Outcome::Update(Update::patch(JsonMap::new()))));
        assert!(matches!(result, ReducerResult::Update(Update::Patch(_))));
    }

    #[test]
    fn update_converts_to_update_result() {
        let result = Outcome::from(Update::with(|_| None));
        assert!(result.update().is_some());
        assert!(result.effect().is_none());
    }

    #[test]
    fn debug_hides_closures() {
        let effect: EffectFn<Json> = Rc::new(|_: &Runtime<Json>, _: &ReducerArg<Json>| {});
        let result = Outcome::UpdateWithEffect(Update::with(|_| None), effect);
        assert_eq!(format!("{result:?}"), "UpdateWithEffect(With(<fn>), \"<fn>\")");
    }
}
