//! Timer-backed activities.
//!
//! Each helper call owns one private timer slot. The `:start` effect clears
//! whatever the slot holds and schedules a fresh tokio task; the `:stop`
//! effect aborts the task and empties the slot. At most one callback per
//! helper is pending at any time, and none fires after `:stop`.
//!
//! Timers are spawned with [`tokio::task::spawn_local`], so a runtime using
//! these helpers must be driven from inside a [`tokio::task::LocalSet`].
//! Interval periods shorter than [`MIN_INTERVAL`] are raised to it.

use super::arg::ReducerArg;
use super::map::ReducerMap;
use super::result::ReducerResult;
use crate::core::{Event, Machine};
use crate::runtime::{Runtime, WeakRuntime};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

/// Configuration of a timer activity.
#[derive(Clone, Debug, PartialEq)]
pub struct TimerActivity {
    /// Activity name as declared on the hosting state.
    pub activity: String,
    /// Delay before firing (timeout) or between firings (interval).
    pub period: Duration,
    /// Event sent to the runtime when the timer fires.
    pub event: Event,
}

impl TimerActivity {
    pub fn new(activity: impl Into<String>, period: Duration, event: impl Into<Event>) -> Self {
        Self {
            activity: activity.into(),
            period,
            event: event.into(),
        }
    }
}

/// Activity name plus the `:start` / `:stop` reducers implementing it.
pub struct ActivityReducers<M: Machine> {
    pub activity: String,
    pub map: ReducerMap<M>,
}

impl<M: Machine> std::fmt::Debug for ActivityReducers<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityReducers")
            .field("activity", &self.activity)
            .field("map", &self.map)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerKind {
    Timeout,
    Interval,
}

type TimerSlot = Rc<RefCell<Option<JoinHandle<()>>>>;

/// Shortest period an interval ticks at; tokio rejects a zero period.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub(crate) fn timer_activity<M: Machine>(
    config: TimerActivity,
    kind: TimerKind,
) -> ActivityReducers<M> {
    let slot: TimerSlot = Rc::default();

    let start = {
        let slot = Rc::clone(&slot);
        let config = config.clone();
        move |runtime: &Runtime<M>, _: &ReducerArg<M>| {
            clear(&slot);
            tracing::debug!(activity = %config.activity, ?kind, period = ?config.period, "timer started");
            let handle = spawn_timer(runtime.downgrade(), config.clone(), kind);
            *slot.borrow_mut() = Some(handle);
        }
    };

    let stop = {
        let activity = config.activity.clone();
        move |_: &Runtime<M>, _: &ReducerArg<M>| {
            if clear(&slot) {
                tracing::debug!(activity = %activity, "timer stopped");
            }
        }
    };

    let map = ReducerMap::<M>::new()
        .with(
            format!("{}:start", config.activity),
            ReducerResult::Effect(Rc::new(start)),
        )
        .with(
            format!("{}:stop", config.activity),
            ReducerResult::Effect(Rc::new(stop)),
        );

    ActivityReducers {
        activity: config.activity,
        map,
    }
}

/// Abort the pending timer, if any. Returns whether one was pending.
fn clear(slot: &TimerSlot) -> bool {
    match slot.borrow_mut().take() {
        Some(handle) => {
            handle.abort();
            true
        }
        None => false,
    }
}

fn spawn_timer<M: Machine>(
    runtime: WeakRuntime<M>,
    config: TimerActivity,
    kind: TimerKind,
) -> JoinHandle<()> {
    tokio::task::spawn_local(async move {
        match kind {
            TimerKind::Timeout => {
                sleep(config.period).await;
                fire(&runtime, &config);
            }
            TimerKind::Interval => {
                let period = config.period.max(MIN_INTERVAL);
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    if !fire(&runtime, &config) {
                        break;
                    }
                }
            }
        }
    })
}

/// Send the timer's event. Returns `false` once the runtime is gone.
fn fire<M: Machine>(runtime: &WeakRuntime<M>, config: &TimerActivity) -> bool {
    let Some(runtime) = runtime.upgrade() else {
        tracing::debug!(activity = %config.activity, "runtime dropped, timer exits");
        return false;
    };

    tracing::debug!(activity = %config.activity, event = %config.event, "timer fired");
    if let Err(err) = runtime.transition(config.event.clone()) {
        tracing::warn!(activity = %config.activity, error = %err, "timer transition failed");
    }
    true
}
