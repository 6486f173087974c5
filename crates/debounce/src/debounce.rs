//! Trailing-edge debouncing
//!
//! Each call replaces the pending invocation and restarts the delay. The
//! wrapped action runs once the delay elapses with no newer call, using the
//! arguments of the last call only.

use crate::timer::{Job, Timer, TimerHandle, TokioTimer};
use crate::DebounceError;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::trace;

/// Quiet window used when none is given
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

type Action<A> = Arc<dyn Fn(A) + Send + Sync>;

/// The single scheduled invocation a debouncer may own
struct PendingCall<A, H> {
    /// Arguments of the most recent call
    args: A,
    /// Cancels the delay timer
    handle: H,
    /// Distinguishes this call from any that superseded it
    id: u64,
}

struct DebounceState<A, H> {
    pending: Option<PendingCall<A, H>>,
    next_id: u64,
    /// Actions currently executing
    firing: usize,
}

/// Collapses bursts of calls into one delayed invocation
///
/// Cloning yields another handle onto the same pending state.
pub struct Debouncer<A, T: Timer = TokioTimer> {
    action: Action<A>,
    delay: Duration,
    timer: Arc<T>,
    state: Arc<Mutex<DebounceState<A, T::Handle>>>,
}

impl<A, T> Debouncer<A, T>
where
    A: Send + 'static,
    T: Timer,
{
    /// Wrap `action` so that it fires `delay` after the last call
    pub fn new<F>(action: F, delay: Duration, timer: T) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            action: Arc::new(action),
            delay,
            timer: Arc::new(timer),
            state: Arc::new(Mutex::new(DebounceState {
                pending: None,
                next_id: 0,
                firing: 0,
            })),
        }
    }

    /// Wrap `action` with the default 500ms quiet window
    pub fn with_default_delay<F>(action: F, timer: T) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::new(action, DEFAULT_DELAY, timer)
    }

    /// Wrap an asynchronous action
    ///
    /// The future is spawned on the caller's tokio runtime when the timer
    /// fires. Once spawned it always runs to completion; only the
    /// scheduling can be cancelled.
    pub fn new_async<F, Fut>(action: F, delay: Duration, timer: T) -> Result<Self, DebounceError>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| DebounceError::NoRuntime)?;
        Ok(Self::new(
            move |args| {
                runtime.spawn(action(args));
            },
            delay,
            timer,
        ))
    }

    /// Schedule the action with `args`, superseding any pending call
    pub fn call(&self, args: A) {
        let mut state = self.state.lock();

        if let Some(previous) = state.pending.take() {
            trace!("Superseding pending call {}", previous.id);
            previous.handle.cancel();
        }

        let id = state.next_id;
        state.next_id += 1;

        let job_state = Arc::clone(&self.state);
        let action = Arc::clone(&self.action);
        let job: Job = Box::new(move || fire(&job_state, &action, id));

        let handle = self.timer.schedule(self.delay, job);
        state.pending = Some(PendingCall { args, handle, id });
    }

    /// Drop the pending call without running it
    ///
    /// Returns whether a call was pending.
    pub fn cancel(&self) -> bool {
        let pending = self.state.lock().pending.take();
        match pending {
            Some(pending) => {
                trace!("Cancelled pending call {}", pending.id);
                pending.handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Run the pending call now instead of waiting for the delay
    ///
    /// Returns whether a call was pending.
    pub fn flush(&self) -> bool {
        let pending = {
            let mut state = self.state.lock();
            let pending = state.pending.take();
            if pending.is_some() {
                state.firing += 1;
            }
            pending
        };

        match pending {
            Some(pending) => {
                pending.handle.cancel();
                let _firing = FiringGuard(self.state.as_ref());
                trace!("Flushing pending call {}", pending.id);
                (self.action)(pending.args);
                true
            }
            None => false,
        }
    }

    /// Whether a call is waiting for its quiet window
    pub fn is_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    /// Whether nothing is pending and no action is executing
    pub fn is_idle(&self) -> bool {
        let state = self.state.lock();
        state.pending.is_none() && state.firing == 0
    }

    /// Length of the quiet window
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<A, T: Timer> Clone for Debouncer<A, T> {
    fn clone(&self) -> Self {
        Self {
            action: Arc::clone(&self.action),
            delay: self.delay,
            timer: Arc::clone(&self.timer),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A, T: Timer> std::fmt::Debug for Debouncer<A, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &state.pending.is_some())
            .field("firing", &state.firing)
            .finish()
    }
}

/// Return a plain callable that debounces `action`
pub fn make_debounced<A, T, F>(action: F, delay: Duration, timer: T) -> impl Fn(A) + Clone + Send + Sync
where
    A: Send + 'static,
    T: Timer,
    F: Fn(A) + Send + Sync + 'static,
{
    let debouncer = Debouncer::new(action, delay, timer);
    move |args| debouncer.call(args)
}

/// Timer callback: run the action only if call `id` still owns the pending slot
fn fire<A, H>(state: &Mutex<DebounceState<A, H>>, action: &Action<A>, id: u64) {
    let args = {
        let mut guard = state.lock();
        match guard.pending.take() {
            Some(pending) if pending.id == id => {
                guard.firing += 1;
                pending.args
            }
            other => {
                // Superseded between the timer elapsing and taking the lock
                guard.pending = other;
                return;
            }
        }
    };

    let _firing = FiringGuard(state);
    trace!("Firing call {}", id);
    action(args);
}

/// Decrements the firing count even if the action panics
struct FiringGuard<'a, A, H>(&'a Mutex<DebounceState<A, H>>);

impl<A, H> Drop for FiringGuard<'_, A, H> {
    fn drop(&mut self) {
        self.0.lock().firing -= 1;
    }
}
