//! Reducer specifications: a fixed result or a function producing one.

use super::arg::ReducerArg;
use super::result::ReducerResult;
use crate::core::Machine;
use std::fmt;
use std::rc::Rc;

/// Function-form reducer.
pub type ReducerFn<M> = Rc<dyn Fn(&ReducerArg<M>) -> ReducerResult<M>>;

/// How an action is reduced.
pub enum ReducerSpec<M: Machine> {
    /// Same result for every invocation.
    Result(ReducerResult<M>),
    /// Result computed from the reducer argument.
    Fn(ReducerFn<M>),
}

impl<M: Machine> ReducerSpec<M> {
    /// Wrap a reducer function.
    ///
    /// The function may return anything convertible into a
    /// [`ReducerResult`]; returning `()` or `None` means
    /// [`ReducerResult::NoUpdate`].
    pub fn from_fn<F, R>(reducer: F) -> Self
    where
        F: Fn(&ReducerArg<M>) -> R + 'static,
        R: Into<ReducerResult<M>>,
    {
        Self::Fn(Rc::new(move |arg: &ReducerArg<M>| -> ReducerResult<M> {
            reducer(arg).into()
        }))
    }

    /// Produce the result for one action.
    pub fn resolve(&self, arg: &ReducerArg<M>) -> ReducerResult<M> {
        match self {
            Self::Result(result) => result.clone(),
            Self::Fn(reducer) => reducer(arg),
        }
    }
}

/// The default reducer accepts nothing: every action is a no-op.
impl<M: Machine> Default for ReducerSpec<M> {
    fn default() -> Self {
        Self::Result(ReducerResult::NoUpdate)
    }
}

impl<M: Machine> From<ReducerResult<M>> for ReducerSpec<M> {
    fn from(result: ReducerResult<M>) -> Self {
        Self::Result(result)
    }
}

impl<M: Machine> Clone for ReducerSpec<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Result(result) => Self::Result(result.clone()),
            Self::Fn(reducer) => Self::Fn(Rc::clone(reducer)),
        }
    }
}

impl<M: Machine> fmt::Debug for ReducerSpec<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Result(result) => f.debug_tuple("Result").field(result).finish(),
            Self::Fn(_) => f.write_str("Fn(<fn>)"),
        }
    }
}
