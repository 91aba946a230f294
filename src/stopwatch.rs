use std::rc::Rc;

use crate::clock::{ClockId, SecondCounter, TickScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    Stopped,
    Running,
}

/// Free-running start/stop stopwatch, independent of study sessions
#[derive(Debug)]
pub struct Stopwatch {
    counter: SecondCounter,
}

impl Stopwatch {
    pub fn new(scheduler: Rc<dyn TickScheduler>) -> Self {
        Self {
            counter: SecondCounter::new(ClockId::Stopwatch, scheduler),
        }
    }

    pub fn state(&self) -> StopwatchState {
        if self.counter.is_running() {
            StopwatchState::Running
        } else {
            StopwatchState::Stopped
        }
    }

    pub fn elapsed(&self) -> u64 {
        self.counter.elapsed()
    }

    pub fn start_stop(&mut self) {
        match self.state() {
            StopwatchState::Running => self.counter.stop(),
            StopwatchState::Stopped => self.counter.start(),
        }
    }

    /// Release the tick source without touching the count
    pub fn stop(&mut self) {
        self.counter.stop();
    }

    /// Back to zero and running, whatever the previous state
    pub fn reset(&mut self) {
        self.counter.restart();
    }

    pub fn on_tick(&mut self, clock: ClockId) -> bool {
        self.counter.on_tick(clock)
    }
}
