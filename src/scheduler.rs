//! # Second-Aligned Tick Scheduler
//!
//! Invokes a callback once per wall-clock second, phase-aligned to the second
//! boundary.
//!
//! ## Drift Correction
//! Every cycle reads the live clock and sleeps `1000 - (now_ms % 1000)` ms. Nothing is
//! accumulated from a fixed interval, so a slow callback or a late wake-up only
//! affects the tick it happened on; the next one lands on the boundary again.
//!
//! ## Cancellation
//! [`TickHandle::cancel`] (or [`TickScheduler::stop`]) guarantees that once it
//! returns the callback will not run again:
//! - the cancelled flag is checked under a firing gate the callback also runs under
//! - a cancel from another thread waits for an in-flight callback to finish
//! - a cancel from inside the callback skips the gate, so it cannot deadlock
//!
//! Repeated cancels are no-ops.
//!
//! ## Faults
//! A callback returning `Err` or panicking is a lost tick. It is logged and counted,
//! never propagated, and the schedule carries on.

use crate::clock::WallClock;
use crate::ClockError;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delay from `now_ms` (epoch milliseconds) to the next whole second.
///
/// An instant exactly on a boundary waits a full second, so a tick never fires
/// twice for the same second.
pub fn delay_to_next_second(now_ms: i64) -> Duration {
    let remaining = 1000 - now_ms.rem_euclid(1000);
    Duration::from_millis(remaining as u64)
}

#[derive(Default)]
struct TickState {
    cancelled: AtomicBool,
    /// Held while the cancelled check and the callback run
    gate: Mutex<()>,
    firing_thread: Mutex<Option<ThreadId>>,
    task: Mutex<Option<JoinHandle<()>>>,
    ticks: AtomicU64,
    lost: AtomicU64,
}

/// Handle to a running schedule. Clones refer to the same schedule.
///
/// Dropping a handle does not stop the schedule; call [`TickHandle::cancel`].
#[derive(Clone)]
pub struct TickHandle {
    state: Arc<TickState>,
}

impl TickHandle {
    /// Stop the schedule. Safe to call repeatedly and from inside the callback.
    pub fn cancel(&self) {
        let first = !self.state.cancelled.swap(true, Ordering::SeqCst);

        let reentrant = *self.state.firing_thread.lock() == Some(thread::current().id());
        if !reentrant {
            drop(self.state.gate.lock());
        }

        if first {
            if let Some(task) = self.state.task.lock().take() {
                task.abort();
            }
            info!(
                "tick schedule stopped after {} ticks ({} lost)",
                self.ticks(),
                self.lost_ticks()
            );
        }
    }

    pub fn is_active(&self) -> bool {
        !self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Ticks fired so far, lost ones included.
    pub fn ticks(&self) -> u64 {
        self.state.ticks.load(Ordering::SeqCst)
    }

    /// Ticks whose callback failed or panicked.
    pub fn lost_ticks(&self) -> u64 {
        self.state.lost.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("active", &self.is_active())
            .field("ticks", &self.ticks())
            .field("lost", &self.lost_ticks())
            .finish()
    }
}

/// Fires callbacks on second boundaries of a [`WallClock`].
#[derive(Clone)]
pub struct TickScheduler {
    clock: Arc<dyn WallClock>,
}

impl TickScheduler {
    pub fn new(clock: Arc<dyn WallClock>) -> Self {
        Self { clock }
    }

    /// Start ticking on the current tokio runtime.
    ///
    /// The callback receives the instant captured when it fires.
    pub fn start<F>(&self, callback: F) -> Result<TickHandle, ClockError>
    where
        F: FnMut(DateTime<Utc>) -> Result<(), ClockError> + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ClockError::NoRuntime)?;

        let state = Arc::new(TickState::default());
        let task = runtime.spawn(run(Arc::clone(&self.clock), Arc::clone(&state), callback));
        *state.task.lock() = Some(task);

        debug!("tick schedule started");
        Ok(TickHandle { state })
    }

    /// Cancel `handle`. Equivalent to [`TickHandle::cancel`].
    pub fn stop(&self, handle: &TickHandle) {
        handle.cancel();
    }
}

async fn run<F>(clock: Arc<dyn WallClock>, state: Arc<TickState>, mut callback: F)
where
    F: FnMut(DateTime<Utc>) -> Result<(), ClockError> + Send + 'static,
{
    loop {
        tokio::time::sleep(delay_to_next_second(clock.now_millis())).await;

        if !fire(clock.as_ref(), &state, &mut callback) {
            break;
        }
    }
}

/// One tick. Returns false once the schedule is cancelled.
fn fire<F>(clock: &dyn WallClock, state: &TickState, callback: &mut F) -> bool
where
    F: FnMut(DateTime<Utc>) -> Result<(), ClockError>,
{
    let _gate = state.gate.lock();
    if state.cancelled.load(Ordering::SeqCst) {
        return false;
    }

    let instant = clock.now();
    *state.firing_thread.lock() = Some(thread::current().id());
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(instant)));
    *state.firing_thread.lock() = None;

    state.ticks.fetch_add(1, Ordering::SeqCst);
    let fault = match outcome {
        Ok(Ok(())) => None,
        Ok(Err(err)) => Some(ClockError::CallbackFault(err.to_string())),
        Err(payload) => Some(ClockError::CallbackFault(panic_message(payload.as_ref()))),
    };
    if let Some(fault) = fault {
        state.lost.fetch_add(1, Ordering::SeqCst);
        warn!("lost tick at {}: {}", instant, fault);
    }

    !state.cancelled.load(Ordering::SeqCst)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "callback panicked".to_string()
    }
}
