//! Delay timers
//!
//! A `Timer` runs a job once after a delay and hands back a handle that can
//! cancel it. Jobs never run inside `schedule`, even for a zero delay.

use crate::DebounceError;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Deferred unit of work run by a timer
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Source of cancellable delayed execution
pub trait Timer: Send + Sync + 'static {
    /// Handle returned for each scheduled job
    type Handle: TimerHandle;

    /// Run `job` once `delay` has elapsed
    fn schedule(&self, delay: Duration, job: Job) -> Self::Handle;
}

/// Cancellation handle for one scheduled job
pub trait TimerHandle: Send + 'static {
    /// Prevent the job from running if it has not started yet
    fn cancel(self);
}

/// Timer backed by tokio's sleep on a runtime handle
#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    /// Timer on the runtime the caller is running in
    pub fn current() -> Result<Self, DebounceError> {
        Handle::try_current()
            .map(Self::from_handle)
            .map_err(|_| DebounceError::NoRuntime)
    }

    /// Timer on an explicit runtime
    pub fn from_handle(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Timer for TokioTimer {
    type Handle = TokioTimerHandle;

    fn schedule(&self, delay: Duration, job: Job) -> Self::Handle {
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            job();
        });
        TokioTimerHandle { task }
    }
}

/// Handle to a job sleeping on the tokio runtime
#[derive(Debug)]
pub struct TokioTimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle for TokioTimerHandle {
    fn cancel(self) {
        self.task.abort();
    }
}

/// Virtual clock for deterministic tests
///
/// Time only moves when `advance` is called. Jobs run in deadline order,
/// ties broken by scheduling order, and the clock reads each job's deadline
/// while that job runs.
#[derive(Clone, Default)]
pub struct ManualTimer {
    clock: Arc<Mutex<ManualClock>>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_seq: u64,
    jobs: BTreeMap<(Duration, u64), Job>,
}

impl ManualTimer {
    /// Create a clock reading zero with nothing scheduled
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }

    /// Number of scheduled jobs not yet run or cancelled
    pub fn pending(&self) -> usize {
        self.clock.lock().jobs.len()
    }

    /// Move time forward by `by`, running every job that comes due
    ///
    /// Jobs scheduled by a running job are picked up if they fall inside the
    /// window. Returns the number of jobs run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.clock.lock().now + by;
        let mut ran = 0;

        loop {
            // Never hold the clock lock while a job runs
            let job = {
                let mut clock = self.clock.lock();
                let due = clock
                    .jobs
                    .first_key_value()
                    .map(|(&key, _)| key)
                    .filter(|&(deadline, _)| deadline <= target);

                match due {
                    Some(key) => {
                        clock.now = key.0;
                        clock.jobs.remove(&key)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };

            match job {
                Some(job) => {
                    job();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl std::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let clock = self.clock.lock();
        f.debug_struct("ManualTimer")
            .field("now", &clock.now)
            .field("pending", &clock.jobs.len())
            .finish()
    }
}

impl Timer for ManualTimer {
    type Handle = ManualTimerHandle;

    fn schedule(&self, delay: Duration, job: Job) -> Self::Handle {
        let mut clock = self.clock.lock();
        let key = (clock.now + delay, clock.next_seq);
        clock.next_seq += 1;
        clock.jobs.insert(key, job);

        ManualTimerHandle {
            clock: Arc::downgrade(&self.clock),
            key,
        }
    }
}

/// Handle to a job on a `ManualTimer`
#[derive(Debug)]
pub struct ManualTimerHandle {
    clock: Weak<Mutex<ManualClock>>,
    key: (Duration, u64),
}

impl TimerHandle for ManualTimerHandle {
    fn cancel(self) {
        if let Some(clock) = self.clock.upgrade() {
            clock.lock().jobs.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_job(counter: &Arc<AtomicUsize>) -> Job {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_manual_timer_runs_at_deadline() {
        let timer = ManualTimer::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let _handle = timer.schedule(Duration::from_millis(500), counting_job(&counter));

        assert_eq!(timer.advance(Duration::from_millis(499)), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(timer.now(), Duration::from_millis(500));
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn test_manual_timer_zero_delay_is_deferred() {
        let timer = ManualTimer::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let _handle = timer.schedule(Duration::ZERO, counting_job(&counter));

        // Not run by schedule itself
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(timer.pending(), 1);

        assert_eq!(timer.advance(Duration::ZERO), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_manual_timer_cancel() {
        let timer = ManualTimer::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let handle = timer.schedule(Duration::from_millis(10), counting_job(&counter));

        handle.cancel();
        assert_eq!(timer.pending(), 0);
        assert_eq!(timer.advance(Duration::from_secs(1)), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_manual_timer_deadline_order() {
        let timer = ManualTimer::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay_ms) in [("late", 30u64), ("early", 10), ("tie-a", 20), ("tie-b", 20)] {
            let order = Arc::clone(&order);
            let clock = timer.clone();
            let _ = timer.schedule(
                Duration::from_millis(delay_ms),
                Box::new(move || order.lock().push((label, clock.now()))),
            );
        }

        assert_eq!(timer.advance(Duration::from_millis(100)), 4);
        assert_eq!(
            *order.lock(),
            vec![
                ("early", Duration::from_millis(10)),
                ("tie-a", Duration::from_millis(20)),
                ("tie-b", Duration::from_millis(20)),
                ("late", Duration::from_millis(30)),
            ]
        );
        assert_eq!(timer.now(), Duration::from_millis(100));
    }

    #[test]
    fn test_manual_timer_job_scheduled_by_job() {
        let timer = ManualTimer::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let inner_timer = timer.clone();
        let inner_counter = Arc::clone(&counter);
        let _ = timer.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                let _ = inner_timer.schedule(Duration::from_millis(10), counting_job(&inner_counter));
            }),
        );

        assert_eq!(timer.advance(Duration::from_millis(20)), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tokio_timer_requires_runtime() {
        assert!(matches!(TokioTimer::current(), Err(DebounceError::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_timer_fires_and_cancels() {
        let timer = TokioTimer::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));
        let cancelled = Arc::new(AtomicUsize::new(0));

        let _keep = timer.schedule(Duration::from_millis(50), counting_job(&fired));
        let handle = timer.schedule(Duration::from_millis(50), counting_job(&cancelled));
        handle.cancel();

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(cancelled.load(Ordering::SeqCst), 0);
    }
}
