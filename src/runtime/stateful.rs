//! Stateful runtime orchestrating transitions, reducers and effects.

use super::channel::{Channel, EventKind, ListenerId};
use super::error::RuntimeError;
use crate::builder::RuntimeBuilder;
use crate::core::{Action, Event, ExtendedState, Machine, MachineState, Patch};
use crate::reducer::{apply_reducer_result, dispatch_key, DeferredEffect, ReducerArg, ReducerSpec};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Payload of the `change` notification.
pub struct Change<M: Machine> {
    /// `None` only if the extended state changed before `init`.
    pub state: Option<Rc<M::State>>,
    pub extstate: Rc<M::Ext>,
}

impl<M: Machine> Clone for Change<M> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            extstate: Rc::clone(&self.extstate),
        }
    }
}

impl<M: Machine> fmt::Debug for Change<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Change")
            .field("state", &self.state)
            .field("extstate", &self.extstate)
            .finish()
    }
}

struct Channels<M: Machine> {
    change: Channel<Change<M>>,
    before_actions: Channel<[Action]>,
    action: Channel<ReducerArg<M>>,
    after_actions: Channel<[Action]>,
}

struct Inner<M: Machine> {
    machine: M,
    reducer: ReducerSpec<M>,
    initial_state: Rc<M::State>,
    initial_extstate: Rc<M::Ext>,
    state: RefCell<Option<Rc<M::State>>>,
    extstate: RefCell<Rc<M::Ext>>,
    depth: Cell<usize>,
    effects: RefCell<Vec<DeferredEffect>>,
    channels: Channels<M>,
}

/// Runtime pairing a [`Machine`] with its extended state.
///
/// `Runtime` is a cheap handle: clones share the same instance. It is
/// neither `Send` nor `Sync`; all operations happen on one thread, and
/// nested calls made from effects are folded into the outer operation.
///
/// Every `init`, `transition` and extended state update emits exactly one
/// `change` notification, however many nested updates it triggers.
///
/// # Example
///
/// ```rust
/// use statewise::core::{JsonMap, MachineState};
/// use statewise::flat::{FlatMachine, StateNode};
/// use statewise::builder::TransitionBuilder;
/// use statewise::runtime::Runtime;
///
/// let machine = FlatMachine::<JsonMap>::builder()
///     .initial("down")
///     .state(StateNode::new("down"))
///     .state(StateNode::new("up"))
///     .transition(TransitionBuilder::new().from("down").on("SWITCH").to("up"))?
///     .transition(TransitionBuilder::new().from("up").on("SWITCH").to("down"))?
///     .build()?;
///
/// let runtime = Runtime::builder().machine(machine).build()?;
/// runtime.init();
/// assert_eq!(runtime.state().unwrap().name(), "down");
///
/// runtime.transition("SWITCH")?;
/// assert_eq!(runtime.state().unwrap().name(), "up");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Runtime<M: Machine> {
    inner: Rc<Inner<M>>,
}

/// Non-owning handle to a [`Runtime`].
pub struct WeakRuntime<M: Machine> {
    inner: Weak<Inner<M>>,
}

impl<M: Machine> WeakRuntime<M> {
    /// Get the runtime back if it is still alive.
    pub fn upgrade(&self) -> Option<Runtime<M>> {
        self.inner.upgrade().map(|inner| Runtime { inner })
    }
}

impl<M: Machine> Clone for WeakRuntime<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<M: Machine> fmt::Debug for WeakRuntime<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakRuntime")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<M: Machine> Runtime<M> {
    /// Start building a runtime.
    pub fn builder() -> RuntimeBuilder<M> {
        RuntimeBuilder::new()
    }

    pub(crate) fn from_parts(machine: M, extstate: M::Ext, reducer: ReducerSpec<M>) -> Self {
        let initial_state = machine.initial_state();
        let initial_extstate = Rc::new(extstate);
        Self {
            inner: Rc::new(Inner {
                machine,
                reducer,
                initial_state,
                extstate: RefCell::new(Rc::clone(&initial_extstate)),
                initial_extstate,
                state: RefCell::new(None),
                depth: Cell::new(0),
                effects: RefCell::new(Vec::new()),
                channels: Channels {
                    change: Channel::new(EventKind::Change),
                    before_actions: Channel::new(EventKind::BeforeActions),
                    action: Channel::new(EventKind::Action),
                    after_actions: Channel::new(EventKind::AfterActions),
                },
            }),
        }
    }

    /// Reset the state and extended state to their construction-time values
    /// and process the initial state's entry actions.
    ///
    /// May be called at any time to hard-reset the runtime.
    pub fn init(&self) {
        let initial = Rc::clone(&self.inner.initial_state);
        tracing::debug!(state = initial.name(), "initializing runtime");

        *self.inner.state.borrow_mut() = Some(initial);
        *self.inner.extstate.borrow_mut() = Rc::clone(&self.inner.initial_extstate);

        self.guard_change(|| self.invoke_actions(None));
    }

    /// Send an event to the machine.
    ///
    /// If the machine reports no transition nothing happens and no
    /// notification is emitted. Otherwise the new state is adopted and its
    /// actions are processed as one batch.
    pub fn transition(&self, event: impl Into<Event>) -> Result<(), RuntimeError> {
        let event = event.into();
        let current = self.state().ok_or_else(|| RuntimeError::NotInitialized {
            event: event.name.clone(),
        })?;
        let extstate = self.extended_state();

        let next = self.inner.machine.transition(&current, &event, &extstate);
        if Rc::ptr_eq(&next, &current) {
            tracing::trace!(state = current.name(), event = %event, "event ignored");
            return Ok(());
        }

        tracing::debug!(from = current.name(), to = next.name(), event = %event, "state transition");
        self.guard_change(|| {
            *self.inner.state.borrow_mut() = Some(next);
            self.invoke_actions(Some(Rc::new(event)));
        });
        Ok(())
    }

    /// Merge `patch` into the extended state. `None` is a no-op.
    pub fn set_extended_state(&self, patch: Option<Patch<M>>) {
        let Some(patch) = patch else {
            return;
        };

        self.guard_change(|| {
            let next = self.inner.extstate.borrow().merge(patch);
            *self.inner.extstate.borrow_mut() = Rc::new(next);
        });
    }

    /// Merge the patch computed from the current extended state, if any.
    pub fn update_extended_state<F>(&self, updater: F)
    where
        F: FnOnce(&M::Ext) -> Option<Patch<M>>,
    {
        let current = self.extended_state();
        self.set_extended_state(updater(&current));
    }

    /// Current state, `None` before the first `init`.
    pub fn state(&self) -> Option<Rc<M::State>> {
        self.inner.state.borrow().clone()
    }

    /// Current extended state snapshot.
    pub fn extended_state(&self) -> Rc<M::Ext> {
        Rc::clone(&self.inner.extstate.borrow())
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.state.borrow().is_some()
    }

    pub fn machine(&self) -> &M {
        &self.inner.machine
    }

    pub fn downgrade(&self) -> WeakRuntime<M> {
        WeakRuntime {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Emitted once per externally triggered operation.
    pub fn change(&self) -> &Channel<Change<M>> {
        &self.inner.channels.change
    }

    /// Emitted with the full action list before a batch is processed.
    pub fn before_actions(&self) -> &Channel<[Action]> {
        &self.inner.channels.before_actions
    }

    /// Emitted once per action, in list order, after it has been reduced.
    pub fn action(&self) -> &Channel<ReducerArg<M>> {
        &self.inner.channels.action
    }

    /// Emitted with the full action list once every action was reduced.
    pub fn after_actions(&self) -> &Channel<[Action]> {
        &self.inner.channels.after_actions
    }

    /// Remove a listener from whichever channel it was registered on.
    pub fn off(&self, id: ListenerId) -> bool {
        let channels = &self.inner.channels;
        match id.kind() {
            EventKind::Change => channels.change.off(id),
            EventKind::BeforeActions => channels.before_actions.off(id),
            EventKind::Action => channels.action.off(id),
            EventKind::AfterActions => channels.after_actions.off(id),
        }
    }

    /// Run `body` with the change guard held, emitting `change` when the
    /// outermost guarded call returns.
    fn guard_change(&self, body: impl FnOnce()) {
        let depth = &self.inner.depth;
        depth.set(depth.get() + 1);

        body();

        depth.set(depth.get() - 1);
        if depth.get() == 0 {
            let change = Change {
                state: self.state(),
                extstate: self.extended_state(),
            };
            tracing::trace!(
                state = change.state.as_deref().map(MachineState::name),
                "emitting change"
            );
            self.inner.channels.change.emit(&change);
        }
    }

    fn invoke_actions(&self, event: Option<Rc<Event>>) {
        let Some(state) = self.state() else {
            return;
        };
        if state.actions().is_empty() {
            return;
        }

        let actions: Rc<[Action]> = Rc::from(state.actions());
        let outer_effects = self.inner.effects.replace(Vec::new());

        self.inner.channels.before_actions.emit(&actions);

        for action in actions.iter() {
            let arg = ReducerArg {
                state: self.state().unwrap_or_else(|| Rc::clone(&state)),
                extstate: self.extended_state(),
                event: event.clone(),
                action: action.clone(),
            };
            tracing::trace!(key = %dispatch_key(action), "reducing action");

            let result = self.inner.reducer.resolve(&arg);
            if let Some(effect) = apply_reducer_result(self, &arg, result) {
                self.inner.effects.borrow_mut().push(effect);
            }

            self.inner.channels.action.emit(&arg);
        }

        self.inner.channels.after_actions.emit(&actions);

        let effects = self.inner.effects.replace(outer_effects);
        for effect in effects {
            effect();
        }
    }
}

impl<M: Machine> Clone for Runtime<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M: Machine> fmt::Debug for Runtime<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("state", &self.state())
            .field("extstate", &self.extended_state())
            .field("depth", &self.inner.depth.get())
            .finish_non_exhaustive()
    }
}
