//! Per-second tick sources and the elapsed-seconds counter both timers share.
//!
//! A tick source lives exactly as long as its [`TickHandle`]. Dropping the
//! handle stops the source, so a counter that is stopped, reset or dropped
//! never leaves a thread ticking in the background.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::runtime::AppEvent;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies which timer a tick belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockId {
    Question,
    Stopwatch,
}

/// Ownership of a running tick source. The source stops when this is dropped.
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TickHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}

/// Starts repeating tick sources
pub trait TickScheduler {
    fn schedule(&self, clock: ClockId, period: Duration) -> TickHandle;
}

/// One background thread per live clock, delivering `AppEvent::Tick` into the app's event channel
#[derive(Debug, Clone)]
pub struct ThreadScheduler {
    tx: Sender<AppEvent>,
}

impl ThreadScheduler {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl TickScheduler for ThreadScheduler {
    fn schedule(&self, clock: ClockId, period: Duration) -> TickHandle {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let events = self.tx.clone();

        let worker = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if events.send(AppEvent::Tick(clock)).is_err() {
                        break;
                    }
                }
                // stop sender dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        debug!(?clock, "tick source started");

        TickHandle::new(move || {
            drop(stop_tx);
            let _ = worker.join();
            debug!(?clock, "tick source stopped");
        })
    }
}

/// Scheduler that never ticks on its own; ticks are fed by hand.
/// Tracks live handles so tests can assert nothing leaks.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    live: Rc<RefCell<HashMap<ClockId, usize>>>,
    scheduled: Rc<RefCell<HashMap<ClockId, usize>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self, clock: ClockId) -> bool {
        self.live.borrow().get(&clock).copied().unwrap_or(0) > 0
    }

    pub fn live_count(&self) -> usize {
        self.live.borrow().values().sum()
    }

    /// How many times a source was started for `clock`
    pub fn times_scheduled(&self, clock: ClockId) -> usize {
        self.scheduled.borrow().get(&clock).copied().unwrap_or(0)
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&self, clock: ClockId, _period: Duration) -> TickHandle {
        *self.live.borrow_mut().entry(clock).or_insert(0) += 1;
        *self.scheduled.borrow_mut().entry(clock).or_insert(0) += 1;

        let live = Rc::clone(&self.live);
        TickHandle::new(move || {
            if let Some(n) = live.borrow_mut().get_mut(&clock) {
                *n = n.saturating_sub(1);
            }
        })
    }
}

/// Elapsed seconds that advance by one per tick while a tick source is held
pub struct SecondCounter {
    clock: ClockId,
    scheduler: Rc<dyn TickScheduler>,
    elapsed: u64,
    ticks: Option<TickHandle>,
}

impl SecondCounter {
    pub fn new(clock: ClockId, scheduler: Rc<dyn TickScheduler>) -> Self {
        Self {
            clock,
            scheduler,
            elapsed: 0,
            ticks: None,
        }
    }

    pub fn clock(&self) -> ClockId {
        self.clock
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.ticks.is_some()
    }

    pub fn start(&mut self) {
        if self.ticks.is_none() {
            self.ticks = Some(self.scheduler.schedule(self.clock, TICK_PERIOD));
        }
    }

    pub fn stop(&mut self) {
        self.ticks = None;
    }

    /// Zero the count and start a fresh tick source
    pub fn restart(&mut self) {
        self.stop();
        self.elapsed = 0;
        self.start();
    }

    /// Count a tick. Ticks for other clocks, or arriving after a stop, are ignored.
    pub fn on_tick(&mut self, clock: ClockId) -> bool {
        if clock != self.clock || !self.is_running() {
            return false;
        }
        self.elapsed += 1;
        true
    }
}

impl fmt::Debug for SecondCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecondCounter")
            .field("clock", &self.clock)
            .field("elapsed", &self.elapsed)
            .field("running", &self.is_running())
            .finish()
    }
}
