use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Exam subject a study session is tagged with
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    #[default]
    Physics,
    Chemistry,
    Mathematics,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Mathematics];

    pub fn next(self) -> Self {
        match self {
            Subject::Physics => Subject::Chemistry,
            Subject::Chemistry => Subject::Mathematics,
            Subject::Mathematics => Subject::Physics,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Subject::Physics => Subject::Mathematics,
            Subject::Chemistry => Subject::Physics,
            Subject::Mathematics => Subject::Chemistry,
        }
    }
}

/// How the user classified a question when they moved on from it
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum QuestionStatus {
    Correct,
    Incorrect,
    Skipped,
}

impl QuestionStatus {
    pub const ALL: [QuestionStatus; 3] = [
        QuestionStatus::Correct,
        QuestionStatus::Incorrect,
        QuestionStatus::Skipped,
    ];
}

/// One finished question attempt. Created once, never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    pub question_number: u32,
    pub time_in_seconds: u64,
    pub status: QuestionStatus,
}

/// A continuous study block for one subject and chapter.
///
/// Records can only be appended through [`Session::record`], which numbers
/// them sequentially from 1, so `records()[i].question_number == i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    subject: Subject,
    chapter: String,
    started_at: DateTime<Local>,
    records: Vec<QuestionRecord>,
}

impl Session {
    pub fn new(subject: Subject, chapter: impl Into<String>) -> Self {
        Self {
            subject,
            chapter: chapter.into(),
            started_at: Local::now(),
            records: Vec::new(),
        }
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Number the question currently being worked on will receive
    pub fn next_question_number(&self) -> u32 {
        self.records.len() as u32 + 1
    }

    /// Append the outcome of the current question and return the stored record
    pub fn record(&mut self, time_in_seconds: u64, status: QuestionStatus) -> QuestionRecord {
        let record = QuestionRecord {
            question_number: self.next_question_number(),
            time_in_seconds,
            status,
        };
        self.records.push(record);
        record
    }
}
