//! Statistics derived from a session's records.
//!
//! Everything here is a pure function of `&[QuestionRecord]`; an empty slice
//! yields all-zero statistics rather than an error.

use crate::session::{QuestionRecord, QuestionStatus};
use crate::util::{mean, round_to};

/// Occurrences of each status across a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
}

impl StatusCounts {
    pub fn from_records(records: &[QuestionRecord]) -> Self {
        records.iter().fold(Self::default(), |mut counts, r| {
            match r.status {
                QuestionStatus::Correct => counts.correct += 1,
                QuestionStatus::Incorrect => counts.incorrect += 1,
                QuestionStatus::Skipped => counts.skipped += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: QuestionStatus) -> usize {
        match status {
            QuestionStatus::Correct => self.correct,
            QuestionStatus::Incorrect => self.incorrect,
            QuestionStatus::Skipped => self.skipped,
        }
    }

    pub fn total(&self) -> usize {
        self.correct + self.incorrect + self.skipped
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    /// Sum of all question times, seconds
    pub total_time: u64,
    /// Mean seconds per question, one decimal place
    pub avg_time: f64,
    /// Whole percent of questions marked correct
    pub accuracy: u32,
    pub solved: usize,
    pub counts: StatusCounts,
}

impl SessionStats {
    pub fn from_records(records: &[QuestionRecord]) -> Self {
        let times: Vec<f64> = records.iter().map(|r| r.time_in_seconds as f64).collect();
        let counts = StatusCounts::from_records(records);
        let solved = records.len();

        let accuracy = if solved > 0 {
            (100.0 * counts.correct as f64 / solved as f64).round() as u32
        } else {
            0
        };

        Self {
            total_time: records.iter().map(|r| r.time_in_seconds).sum(),
            avg_time: mean(&times).map(|m| round_to(m, 1)).unwrap_or(0.0),
            accuracy,
            solved,
            counts,
        }
    }
}

/// One bar of the time-per-question chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartBar {
    pub question_number: u32,
    pub time_in_seconds: u64,
    /// None for the question still being timed
    pub status: Option<QuestionStatus>,
}

impl ChartBar {
    pub fn label(&self) -> String {
        format!("Q{}", self.question_number)
    }
}

pub fn chart_series(records: &[QuestionRecord]) -> Vec<ChartBar> {
    records
        .iter()
        .map(|r| ChartBar {
            question_number: r.question_number,
            time_in_seconds: r.time_in_seconds,
            status: Some(r.status),
        })
        .collect()
}

/// Series for a session in progress: finished questions plus the live one
pub fn live_chart_series(
    records: &[QuestionRecord],
    current_number: u32,
    current_elapsed: u64,
) -> Vec<ChartBar> {
    let mut bars = chart_series(records);
    bars.push(ChartBar {
        question_number: current_number,
        time_in_seconds: current_elapsed,
        status: None,
    });
    bars
}
