//! Error types surfaced inside the crate. None of them reach the user directly.

use thiserror::Error;

/// Failures talking to the generative-text API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("no API key configured (set GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,
    #[error("analysis request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed analysis response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
