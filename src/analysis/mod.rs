//! Session feedback from a generative-text model.
//!
//! Prompt construction and response normalization live here; the HTTP client
//! sits behind [`GenerativeClient`] so it can be swapped for a fake. Whatever
//! the client does, [`analyze_session`] returns a displayable string.

pub mod gemini;

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use itertools::Itertools;
use tracing::{error, info, warn};

use crate::dashboard::SessionStats;
use crate::error::AnalysisError;
use crate::runtime::AppEvent;
use crate::session::Session;

pub use gemini::GeminiClient;

pub const NO_CONTENT_FALLBACK: &str = "Could not generate analysis at this time.";
pub const ERROR_FALLBACK: &str = "Error generating AI insights. Please check your connection.";

/// Sends one prompt to a text model. `Ok(None)` means the model answered without text.
pub trait GenerativeClient: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<Option<String>, AnalysisError>;
}

pub fn build_prompt(session: &Session) -> String {
    let records = session.records();
    // same rounded average the dashboard card shows
    let stats = SessionStats::from_records(records);

    let per_question = records
        .iter()
        .map(|r| {
            format!(
                "Q{}: {}s, Status: {}",
                r.question_number, r.time_in_seconds, r.status
            )
        })
        .join("\n");

    format!(
        "Analyze this JEE study session data and provide actionable tips for the student.\n\
         Subject: {subject}\n\
         Chapter: {chapter}\n\
         Stats:\n\
         - Total Questions: {total}\n\
         - Average Time per Question: {avg_time:.1} seconds\n\
         - Correct: {correct}\n\
         - Skipped: {skipped}\n\
         \n\
         Data per question:\n\
         {per_question}\n\
         \n\
         Format your response in friendly Markdown. Focus on time management and potential areas of improvement.",
        subject = session.subject(),
        chapter = session.chapter(),
        total = stats.solved,
        avg_time = stats.avg_time,
        correct = stats.counts.correct,
        skipped = stats.counts.skipped,
    )
}

/// Ask the model about a session. Never fails: errors and empty answers become fallback text.
pub fn analyze_session(client: &dyn GenerativeClient, session: &Session) -> String {
    let prompt = build_prompt(session);

    match client.generate(&prompt) {
        Ok(Some(text)) if !text.trim().is_empty() => {
            info!(chars = text.len(), "analysis received");
            text
        }
        Ok(_) => {
            warn!("analysis response carried no text");
            NO_CONTENT_FALLBACK.to_string()
        }
        Err(err) => {
            error!(error = %err, "analysis request failed");
            ERROR_FALLBACK.to_string()
        }
    }
}

/// Run [`analyze_session`] on a worker thread and post the result as `AppEvent::Analysis`.
///
/// The send is allowed to fail: if the app has gone away the result is dropped.
pub fn spawn_analysis(
    client: Arc<dyn GenerativeClient>,
    session: Session,
    request: u64,
    tx: Sender<AppEvent>,
) {
    thread::spawn(move || {
        let text = panic::catch_unwind(AssertUnwindSafe(|| {
            analyze_session(client.as_ref(), &session)
        }))
        .unwrap_or_else(|_| {
            error!(request, "analysis worker panicked");
            ERROR_FALLBACK.to_string()
        });

        if tx.send(AppEvent::Analysis { request, text }).is_err() {
            warn!(request, "analysis finished after the app closed");
        }
    });
}
