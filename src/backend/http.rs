use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::{
    AnalyticsRequest, AnalyticsResult, AskRequest, AskResponse, ChatBackend, SummarizeRequest,
    SummarizeResponse,
};
use crate::error::BackendError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Summarizer backend reached over HTTP/JSON.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        // No client-side timeout: long chats on a local model take minutes.
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        decode_response(status, &text)
    }
}

/// Map a raw HTTP status + body to either the decoded payload or a [`BackendError`].
pub fn decode_response<R: DeserializeOwned>(status: u16, body: &str) -> Result<R, BackendError> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").cloned())
            .and_then(|d| match d {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Null => None,
                // FastAPI validation errors come back as a list of objects
                other => Some(other.to_string()),
            });
        warn!("Backend returned {status}");
        return Err(BackendError::Rejected { status, detail });
    }

    serde_json::from_str(body).map_err(|e| BackendError::Malformed(e.to_string()))
}

impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        &self.base_url
    }

    fn summarize(&self, req: &SummarizeRequest) -> Result<SummarizeResponse, BackendError> {
        self.post_json("/summarize", req)
    }

    fn ask(&self, req: &AskRequest) -> Result<AskResponse, BackendError> {
        self.post_json("/ask", req)
    }

    fn analytics(&self, req: &AnalyticsRequest) -> Result<AnalyticsResult, BackendError> {
        self.post_json("/analytics", req)
    }
}
