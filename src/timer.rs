use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::runtime::SprintEvent;

/// Period of the elapsed-time counter
pub const SECOND: Duration = Duration::from_secs(1);

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one scheduled repeating task; ticks from a cancelled timer carry a stale id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    fn next() -> Self {
        Self(NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Shared cancellation flag between a guard and the task it controls
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Owning handle of a repeating task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TimerGuard {
    id: TimerId,
    token: CancelToken,
}

impl TimerGuard {
    pub fn new() -> (Self, CancelToken) {
        let token = CancelToken::default();
        let guard = Self {
            id: TimerId::next(),
            token: token.clone(),
        };
        (guard, token)
    }

    pub fn id(&self) -> TimerId {
        self.id
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        tracing::trace!(timer = self.id.0, "timer_cancelled");
        self.token.cancel();
    }
}

/// Something that can start a repeating tick
pub trait Scheduler: std::fmt::Debug {
    fn every(&self, period: Duration) -> TimerGuard;
}

/// Production scheduler: one sleeping thread per timer, posting ticks to the app's event channel
#[derive(Clone, Debug)]
pub struct ThreadScheduler {
    tx: Sender<SprintEvent>,
}

impl ThreadScheduler {
    pub fn new(tx: Sender<SprintEvent>) -> Self {
        Self { tx }
    }
}

impl Scheduler for ThreadScheduler {
    fn every(&self, period: Duration) -> TimerGuard {
        let (guard, token) = TimerGuard::new();
        let id = guard.id();
        let tx = self.tx.clone();

        thread::spawn(move || loop {
            thread::sleep(period);
            if token.is_cancelled() || tx.send(SprintEvent::Tick(id)).is_err() {
                break;
            }
        });

        tracing::debug!(timer = id.0, period_ms = period.as_millis() as u64, "timer_started");
        guard
    }
}

/// Scheduler that never fires on its own; tests deliver ticks by hand via the recorded tokens
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    started: Arc<std::sync::Mutex<Vec<(TimerId, CancelToken)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every timer started so far, oldest first
    pub fn started(&self) -> Vec<(TimerId, CancelToken)> {
        self.started
            .lock()
            .map(|timers| timers.clone())
            .unwrap_or_default()
    }

    /// Timers that have been started and not yet cancelled
    pub fn live(&self) -> Vec<TimerId> {
        self.started()
            .into_iter()
            .filter(|(_, token)| !token.is_cancelled())
            .map(|(id, _)| id)
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, _period: Duration) -> TimerGuard {
        let (guard, token) = TimerGuard::new();
        if let Ok(mut timers) = self.started.lock() {
            timers.push((guard.id(), token));
        }
        guard
    }
}
