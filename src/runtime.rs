use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::clock::ClockId;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// One period elapsed on the given clock's tick source
    Tick(ClockId),
    /// A finished analysis request, tagged with the id it was issued under
    Analysis { request: u64, text: String },
    /// Nothing arrived within the frame interval
    Frame,
}

/// Source of application events (keyboard, resize, ticks, background results)
pub trait EventSource {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source: crossterm input plus anything sent through [`sender`](Self::sender)
pub struct TerminalEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl TerminalEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if input_tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if input_tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { tx, rx }
    }

    /// Handle for background producers (tick sources, analysis workers)
    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Default for TerminalEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TerminalEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Redraw cadence for the runner
pub trait FrameClock {
    fn interval(&self) -> Duration;
}

/// Fixed interval frame clock
#[derive(Clone, Copy, Debug)]
pub struct FixedFrameClock {
    interval: Duration,
}

impl FixedFrameClock {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl FrameClock for FixedFrameClock {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source fed from a plain channel
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: EventSource, F: FrameClock> {
    event_source: E,
    frame_clock: F,
}

impl<E: EventSource, F: FrameClock> Runner<E, F> {
    pub fn new(event_source: E, frame_clock: F) -> Self {
        Self {
            event_source,
            frame_clock,
        }
    }

    /// Blocks up to the frame interval and returns the next event, or Frame on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.frame_clock.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_returns_frame_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let runner = Runner::new(es, FixedFrameClock::new(Duration::from_millis(1)));

        assert_eq!(runner.step(), AppEvent::Frame);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Tick(ClockId::Question)).unwrap();
        tx.send(AppEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let runner = Runner::new(es, FixedFrameClock::new(Duration::from_millis(10)));

        assert_eq!(runner.step(), AppEvent::Tick(ClockId::Question));
        assert_eq!(runner.step(), AppEvent::Resize);
    }
}
