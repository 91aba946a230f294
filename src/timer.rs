use std::rc::Rc;

use crate::clock::{ClockId, SecondCounter, TickScheduler};
use crate::session::QuestionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Paused,
}

/// Emitted when the user classifies the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub time_in_seconds: u64,
    pub status: QuestionStatus,
}

/// Times the question currently on screen.
///
/// Starts running at zero. Classifying a question is accepted in either state
/// and always leaves the timer running at zero for the next one.
#[derive(Debug)]
pub struct QuestionTimer {
    counter: SecondCounter,
}

impl QuestionTimer {
    pub fn start(scheduler: Rc<dyn TickScheduler>) -> Self {
        let mut counter = SecondCounter::new(ClockId::Question, scheduler);
        counter.start();
        Self { counter }
    }

    pub fn state(&self) -> TimerState {
        if self.counter.is_running() {
            TimerState::Running
        } else {
            TimerState::Paused
        }
    }

    pub fn elapsed(&self) -> u64 {
        self.counter.elapsed()
    }

    pub fn pause(&mut self) {
        self.counter.stop();
    }

    pub fn resume(&mut self) {
        self.counter.start();
    }

    pub fn toggle_pause(&mut self) {
        match self.state() {
            TimerState::Running => self.pause(),
            TimerState::Paused => self.resume(),
        }
    }

    pub fn on_tick(&mut self, clock: ClockId) -> bool {
        self.counter.on_tick(clock)
    }

    pub fn complete(&mut self, status: QuestionStatus) -> Completion {
        let completion = Completion {
            time_in_seconds: self.counter.elapsed(),
            status,
        };
        self.counter.restart();
        completion
    }

    /// End the session. Time on the unfinished question is dropped and returned.
    pub fn finish(self) -> u64 {
        self.counter.elapsed()
    }
}
