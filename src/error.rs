use thiserror::Error;

use crate::session::state::Flow;

/// Failure talking to the summarizer backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Connection refused, DNS failure, reset mid-body, ...
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx response. `detail` is the backend's `{"detail": ...}` field when present.
    #[error("backend returned {status}{}", detail_suffix(.detail))]
    Rejected { status: u16, detail: Option<String> },

    /// 2xx response whose body could not be decoded.
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

impl BackendError {
    /// Message shown to the user: the backend's detail if it sent one, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            BackendError::Rejected {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

/// Failure pulling a transcript out of an export archive.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no .txt transcript found in archive")]
    NoTranscriptFound,

    #[error("unreadable archive: {0}")]
    UnreadableArchive(String),
}

impl ExtractionError {
    pub fn status_message(&self) -> &'static str {
        match self {
            ExtractionError::NoTranscriptFound => {
                "❌ No .txt file found inside ZIP. Export chat again (Without media)."
            }
            ExtractionError::UnreadableArchive(_) => "❌ Failed to read ZIP. Try exporting again.",
        }
    }
}

impl From<zip::result::ZipError> for ExtractionError {
    fn from(err: zip::result::ZipError) -> Self {
        ExtractionError::UnreadableArchive(err.to_string())
    }
}

impl From<std::io::Error> for ExtractionError {
    fn from(err: std::io::Error) -> Self {
        ExtractionError::UnreadableArchive(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{} is still running; wait for it to finish", .0.label())]
    Busy(Flow),
}
