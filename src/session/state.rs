use serde::Serialize;

/// The three independent request flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Summarize,
    Ask,
    Analyze,
}

impl Flow {
    pub const ALL: [Flow; 3] = [Flow::Summarize, Flow::Ask, Flow::Analyze];

    pub fn label(&self) -> &'static str {
        match self {
            Flow::Summarize => "summarize",
            Flow::Ask => "ask",
            Flow::Analyze => "analyze",
        }
    }

    /// Status message used when the backend gives no detail.
    pub fn fallback_error(&self) -> &'static str {
        match self {
            Flow::Summarize => "Error generating summary.",
            Flow::Ask => "Error answering question.",
            Flow::Analyze => "Error generating analytics.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// State of one flow. Always replaced as a whole through the constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState<T> {
    status: FlowStatus,
    result: Option<T>,
    error: Option<String>,
}

impl<T> Default for FlowState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T> FlowState<T> {
    pub fn idle() -> Self {
        Self {
            status: FlowStatus::Idle,
            result: None,
            error: None,
        }
    }

    pub fn in_flight() -> Self {
        Self {
            status: FlowStatus::InFlight,
            result: None,
            error: None,
        }
    }

    pub fn succeeded(result: T) -> Self {
        Self {
            status: FlowStatus::Succeeded,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: FlowStatus::Failed,
            result: None,
            error: Some(message.into()),
        }
    }

    pub fn status(&self) -> FlowStatus {
        self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == FlowStatus::InFlight
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
