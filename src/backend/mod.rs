pub mod http;
pub mod window;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::error::BackendError;

/// Model tier label forwarded to the backend. The client does not check
/// that the backend actually behaves differently for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Fast,
    #[default]
    Accurate,
}

impl ModelTier {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fast" => Some(ModelTier::Fast),
            "accurate" => Some(ModelTier::Accurate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Fast => "fast",
            ModelTier::Accurate => "accurate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarizeRequest {
    pub chat_text: String,
    pub model: ModelTier,
    pub last_n: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    pub chat_text: String,
    pub summary: String,
    pub question: String,
    pub model: ModelTier,
    pub last_n: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsRequest {
    pub chat_text: String,
    pub last_n: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

/// Chat statistics computed entirely by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    #[serde(default)]
    pub total_messages: u64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub most_active_day: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub most_active_hour: Option<String>,
    #[serde(default)]
    pub messages_per_user: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_words: Vec<WordCount>,
    #[serde(default)]
    pub top_emojis: Vec<EmojiCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: u64,
}

impl AnalyticsResult {
    /// Users ordered by message count, busiest first (ties by name).
    pub fn users_by_activity(&self) -> Vec<(&str, u64)> {
        let mut users: Vec<(&str, u64)> = self
            .messages_per_user
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        users.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        users
    }
}

// `most_active_hour` comes back as "21:00" from some backends and 21 from others.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// The remote summarizer. One method per backend endpoint.
pub trait ChatBackend {
    /// Base URL or other short description, used in log lines.
    fn name(&self) -> &str;

    fn summarize(&self, req: &SummarizeRequest) -> Result<SummarizeResponse, BackendError>;

    fn ask(&self, req: &AskRequest) -> Result<AskResponse, BackendError>;

    fn analytics(&self, req: &AnalyticsRequest) -> Result<AnalyticsResult, BackendError>;
}
