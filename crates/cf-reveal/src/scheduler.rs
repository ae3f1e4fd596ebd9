//! Scheduler abstraction for roll completion timers
//!
//! The engine never derives state from animation-frame events; it schedules
//! a callback after the declared roll duration. Abstracting the timer lets
//! tests fast-forward virtual time instead of sleeping.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

/// A deferred unit of work
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Schedules a task to run once after a delay
pub trait Scheduler: Send + Sync {
    fn schedule_after(&self, delay: Duration, task: ScheduledTask) -> ScheduleHandle;
}

/// Cancellation handle for a scheduled task.
///
/// Dropping the handle does NOT cancel the task — a roll in progress always
/// completes unless a caller explicitly aborts it.
pub struct ScheduleHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduleHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Prevent the task from running (best-effort; a task already started
    /// cannot be recalled)
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for ScheduleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleHandle").finish_non_exhaustive()
    }
}

/// Real-time scheduler backed by the tokio runtime.
///
/// Must be used from within a runtime; the spawned task sleeps for the delay
/// and then runs the callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, task: ScheduledTask) -> ScheduleHandle {
        let join = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        ScheduleHandle::new(move || join.abort())
    }
}

struct ManualEntry {
    seq: u64,
    due_ms: f64,
    cancelled: Arc<AtomicBool>,
    task: Option<ScheduledTask>,
}

struct ManualInner {
    now_ms: f64,
    next_seq: u64,
    queue: Vec<ManualEntry>,
}

/// Virtual-time scheduler for tests.
///
/// Tasks are queued with an absolute due time; [`ManualScheduler::advance`]
/// moves the clock forward and runs everything that came due, in due order.
#[derive(Clone)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ManualInner {
                now_ms: 0.0,
                next_seq: 0,
                queue: Vec::new(),
            })),
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> f64 {
        self.inner.lock().now_ms
    }

    /// Number of tasks not yet run or cancelled
    pub fn pending(&self) -> usize {
        self.inner.lock().queue.len()
    }

    /// Move the clock forward, running every task that comes due. Tasks run
    /// outside the internal lock so they may schedule follow-ups.
    pub fn advance(&self, delta_ms: f64) {
        let target = self.inner.lock().now_ms + delta_ms;
        loop {
            let entry = {
                let mut inner = self.inner.lock();
                let next = inner
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.due_ms <= target)
                    .min_by(|(_, a), (_, b)| {
                        a.due_ms
                            .partial_cmp(&b.due_ms)
                            .unwrap_or(std::cmp::Ordering::Equal)
                            .then(a.seq.cmp(&b.seq))
                    })
                    .map(|(idx, _)| idx);

                match next {
                    Some(idx) => {
                        let entry = inner.queue.swap_remove(idx);
                        inner.now_ms = inner.now_ms.max(entry.due_ms);
                        entry
                    }
                    None => {
                        inner.now_ms = target;
                        break;
                    }
                }
            };

            if !entry.cancelled.load(Ordering::SeqCst) {
                if let Some(task) = entry.task {
                    task();
                }
            }
        }
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, task: ScheduledTask) -> ScheduleHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut inner = self.inner.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let due_ms = inner.now_ms + delay.as_secs_f64() * 1000.0;
        inner.queue.push(ManualEntry {
            seq,
            due_ms,
            cancelled: Arc::clone(&cancelled),
            task: Some(task),
        });
        ScheduleHandle::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}
