use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

use crate::timer::TimerId;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum SprintEvent {
    Key(KeyEvent),
    Resize,
    /// One second elapsed on the given timer
    Tick(TimerId),
    /// Nothing arrived within the redraw interval
    Idle,
}

/// Source of app events (keyboard, resize, timer ticks)
pub trait SprintEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<SprintEvent, RecvTimeoutError>;

    /// Sender that feeds this source, handed to the timer scheduler
    fn sender(&self) -> Sender<SprintEvent>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    tx: Sender<SprintEvent>,
    rx: Receiver<SprintEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let key_tx = tx.clone();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // some platforms report both press and release
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    SprintEvent::Key(key)
                }
                Ok(CtEvent::Resize(_, _)) => SprintEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::error!(%err, "terminal_read_failed");
                    break;
                }
            };

            if key_tx.send(evt).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SprintEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SprintEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn sender(&self) -> Sender<SprintEvent> {
        self.tx.clone()
    }
}

/// Test event source fed from a channel the test owns
pub struct TestEventSource {
    tx: Sender<SprintEvent>,
    rx: Receiver<SprintEvent>,
}

impl TestEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl Default for TestEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SprintEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SprintEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn sender(&self) -> Sender<SprintEvent> {
        self.tx.clone()
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: SprintEventSource> {
    event_source: E,
    redraw_interval: Duration,
}

impl<E: SprintEventSource> Runner<E> {
    pub fn new(event_source: E, redraw_interval: Duration) -> Self {
        Self {
            event_source,
            redraw_interval,
        }
    }

    pub fn sender(&self) -> Sender<SprintEvent> {
        self.event_source.sender()
    }

    /// Blocks up to the redraw interval and returns the next event, or Idle on timeout
    pub fn step(&self) -> SprintEvent {
        match self.event_source.recv_timeout(self.redraw_interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                SprintEvent::Idle
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn step_returns_idle_on_timeout() {
        let runner = Runner::new(TestEventSource::new(), Duration::from_millis(1));

        assert_matches!(runner.step(), SprintEvent::Idle);
    }

    #[test]
    fn step_passes_through_events() {
        let runner = Runner::new(TestEventSource::new(), Duration::from_millis(10));
        runner.sender().send(SprintEvent::Resize).unwrap();

        assert_matches!(runner.step(), SprintEvent::Resize);
    }

    #[test]
    fn step_delivers_ticks_in_order() {
        let runner = Runner::new(TestEventSource::new(), Duration::from_millis(10));
        let (first, _) = crate::timer::TimerGuard::new();
        let (second, _) = crate::timer::TimerGuard::new();
        let tx = runner.sender();
        tx.send(SprintEvent::Tick(first.id())).unwrap();
        tx.send(SprintEvent::Tick(second.id())).unwrap();

        assert_matches!(runner.step(), SprintEvent::Tick(id) if id == first.id());
        assert_matches!(runner.step(), SprintEvent::Tick(id) if id == second.id());
        assert_matches!(runner.step(), SprintEvent::Idle);
    }
}
