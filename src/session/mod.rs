//! Request orchestration for the summarize, ask and analyze flows.
//!
//! Each flow is split into `begin_*` (precondition check, move to
//! `InFlight`, hand back the request to send) and `finish_*` (apply the
//! backend outcome). The `run_*` helpers do both around a blocking
//! [`ChatBackend`] call. Every flow owns its own result slot; the status
//! line is shared and the last writer wins.

pub mod state;

use std::io::{Read, Seek};
use tracing::{info, warn};

use crate::backend::window::{self, WindowMode};
use crate::backend::{
    AnalyticsRequest, AnalyticsResult, AskRequest, AskResponse, ChatBackend, ModelTier,
    SummarizeRequest, SummarizeResponse,
};
use crate::error::{BackendError, SessionError};
use crate::ingest::archive;
use crate::ingest::Transcript;
use state::{Flow, FlowState, FlowStatus};

/// Model and window settings read whenever a request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub model: ModelTier,
    pub window_mode: WindowMode,
    /// Window size as the user typed it; parsed and clamped on use.
    pub window_input: String,
    pub min_window: u32,
    pub max_window: u32,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            model: ModelTier::default(),
            window_mode: WindowMode::default(),
            window_input: window::DEFAULT_WINDOW.to_string(),
            min_window: window::MIN_WINDOW,
            max_window: window::MAX_WINDOW,
        }
    }
}

impl RequestConfig {
    /// `last_n` for summarize/ask. `0` means the whole chat.
    pub fn effective_window(&self) -> u32 {
        window::effective_window(
            self.window_mode,
            &self.window_input,
            self.min_window,
            self.max_window,
        )
    }
}

/// A question and the answer produced for the current summary, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaExchange<'a> {
    pub question: &'a str,
    pub answer: Option<&'a str>,
}

/// An ask request in flight, tagged with the summary it was asked against.
#[derive(Debug, Clone)]
pub struct PendingAsk {
    pub request: AskRequest,
    summary_generation: u64,
}

#[derive(Debug, Default)]
pub struct Session {
    transcript: Option<Transcript>,
    config: RequestConfig,
    summary: FlowState<String>,
    answer: FlowState<String>,
    analytics: FlowState<AnalyticsResult>,
    question: String,
    status: Option<String>,
    // Bumped whenever the summary is cleared or replaced; answers computed
    // against an older generation are dropped.
    summary_generation: u64,
}

impl Session {
    pub fn new(config: RequestConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RequestConfig {
        &mut self.config
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn flow_status(&self, flow: Flow) -> FlowStatus {
        match flow {
            Flow::Summarize => self.summary.status(),
            Flow::Ask => self.answer.status(),
            Flow::Analyze => self.analytics.status(),
        }
    }

    /// The first flow currently waiting on the backend.
    pub fn busy_flow(&self) -> Option<Flow> {
        Flow::ALL
            .into_iter()
            .find(|flow| self.flow_status(*flow) == FlowStatus::InFlight)
    }

    /// Raw summary text from the last successful summarize.
    pub fn summary(&self) -> Option<&str> {
        self.summary.result().map(String::as_str)
    }

    pub fn analytics(&self) -> Option<&AnalyticsResult> {
        self.analytics.result()
    }

    pub fn qa(&self) -> QaExchange<'_> {
        QaExchange {
            question: &self.question,
            answer: self.answer.result().map(String::as_str),
        }
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    // ---- transcript acquisition ----

    /// Replace the transcript. Refused while any flow is in flight, since
    /// its result would land on the new transcript. Resets every derived slot.
    pub fn load_transcript(&mut self, transcript: Transcript) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.reset_derived();
        info!("Transcript replaced ({})", transcript.origin().describe());
        self.transcript = Some(transcript);
        Ok(())
    }

    /// Extract a transcript from a chat export zip and load it.
    ///
    /// Returns `Ok(false)` when extraction failed; the reason is on the
    /// status line and the previous transcript is kept.
    pub fn load_archive<R: Read + Seek>(&mut self, reader: R) -> Result<bool, SessionError> {
        self.ensure_idle()?;

        match archive::extract_transcript(reader) {
            Ok(extracted) => {
                let message = format!("✅ Loaded: {}", extracted.entry_name);
                self.load_transcript(Transcript::from(extracted))?;
                self.status = Some(message);
                Ok(true)
            }
            Err(e) => {
                warn!("Archive extraction failed: {e}");
                self.status = Some(e.status_message().to_string());
                Ok(false)
            }
        }
    }

    /// Drop the transcript and everything derived from it.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.reset_derived();
        self.transcript = None;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        match self.busy_flow() {
            Some(flow) => Err(SessionError::Busy(flow)),
            None => Ok(()),
        }
    }

    fn reset_derived(&mut self) {
        self.summary = FlowState::idle();
        self.analytics = FlowState::idle();
        self.clear_qa();
        self.status = None;
    }

    fn clear_qa(&mut self) {
        self.summary_generation += 1;
        self.question.clear();
        if !self.answer.is_in_flight() {
            self.answer = FlowState::idle();
        }
    }

    fn chat_text(&self) -> &str {
        self.transcript.as_ref().map(Transcript::text).unwrap_or("")
    }

    fn has_transcript(&self) -> bool {
        self.transcript.as_ref().is_some_and(|t| !t.is_blank())
    }

    // ---- preconditions ----

    pub fn can_summarize(&self) -> bool {
        self.has_transcript() && !self.summary.is_in_flight()
    }

    pub fn can_ask(&self) -> bool {
        self.summary().is_some_and(|s| !s.trim().is_empty())
            && !self.question.trim().is_empty()
            && !self.answer.is_in_flight()
    }

    pub fn can_analyze(&self) -> bool {
        self.has_transcript() && !self.analytics.is_in_flight()
    }

    // ---- summarize ----

    pub fn begin_summarize(&mut self) -> Option<SummarizeRequest> {
        if !self.can_summarize() {
            return None;
        }

        self.status = None;
        self.summary = FlowState::in_flight();
        self.clear_qa();

        Some(SummarizeRequest {
            chat_text: self.chat_text().to_string(),
            model: self.config.model,
            last_n: self.config.effective_window(),
        })
    }

    pub fn finish_summarize(&mut self, outcome: Result<SummarizeResponse, BackendError>) {
        if !self.summary.is_in_flight() {
            warn!("Ignoring summarize completion: flow is not in flight");
            return;
        }

        self.summary = match outcome {
            Ok(resp) => {
                let summary = resp.summary.unwrap_or_default();
                info!("Summary received ({} chars)", summary.chars().count());
                FlowState::succeeded(summary)
            }
            Err(e) => self.fail(Flow::Summarize, &e),
        };
        self.clear_qa();
    }

    pub fn run_summarize(&mut self, backend: &dyn ChatBackend) -> FlowStatus {
        if let Some(req) = self.begin_summarize() {
            info!(
                "Summarizing via {} (model={}, last_n={})",
                backend.name(),
                req.model.as_str(),
                req.last_n
            );
            let outcome = backend.summarize(&req);
            self.finish_summarize(outcome);
        }
        self.summary.status()
    }

    // ---- ask ----

    pub fn begin_ask(&mut self) -> Option<PendingAsk> {
        if !self.can_ask() {
            return None;
        }

        self.status = None;
        self.answer = FlowState::in_flight();

        Some(PendingAsk {
            request: AskRequest {
                chat_text: self.chat_text().to_string(),
                summary: self.summary().unwrap_or_default().to_string(),
                question: self.question.clone(),
                model: self.config.model,
                last_n: self.config.effective_window(),
            },
            summary_generation: self.summary_generation,
        })
    }

    pub fn finish_ask(&mut self, pending: PendingAsk, outcome: Result<AskResponse, BackendError>) {
        if !self.answer.is_in_flight() {
            warn!("Ignoring ask completion: flow is not in flight");
            return;
        }

        if pending.summary_generation != self.summary_generation {
            info!("Dropping answer computed against a superseded summary");
            self.answer = FlowState::idle();
            return;
        }

        self.answer = match outcome {
            Ok(resp) => FlowState::succeeded(resp.answer.unwrap_or_default()),
            Err(e) => self.fail(Flow::Ask, &e),
        };
    }

    pub fn run_ask(&mut self, backend: &dyn ChatBackend) -> FlowStatus {
        if let Some(pending) = self.begin_ask() {
            info!("Asking via {}", backend.name());
            let outcome = backend.ask(&pending.request);
            self.finish_ask(pending, outcome);
        }
        self.answer.status()
    }

    // ---- analyze ----

    pub fn begin_analyze(&mut self) -> Option<AnalyticsRequest> {
        if !self.can_analyze() {
            return None;
        }

        self.status = None;
        self.analytics = FlowState::in_flight();

        // Analytics always covers the full transcript.
        Some(AnalyticsRequest {
            chat_text: self.chat_text().to_string(),
            last_n: 0,
        })
    }

    pub fn finish_analyze(&mut self, outcome: Result<AnalyticsResult, BackendError>) {
        if !self.analytics.is_in_flight() {
            warn!("Ignoring analyze completion: flow is not in flight");
            return;
        }

        self.analytics = match outcome {
            Ok(result) => FlowState::succeeded(result),
            Err(e) => self.fail(Flow::Analyze, &e),
        };
    }

    pub fn run_analyze(&mut self, backend: &dyn ChatBackend) -> FlowStatus {
        if let Some(req) = self.begin_analyze() {
            info!("Analyzing via {}", backend.name());
            let outcome = backend.analytics(&req);
            self.finish_analyze(outcome);
        }
        self.analytics.status()
    }

    fn fail<T>(&mut self, flow: Flow, err: &BackendError) -> FlowState<T> {
        warn!("{} failed: {err}", flow.label());
        let message = err.user_message(flow.fallback_error());
        self.status = Some(message.clone());
        FlowState::failed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Backend that replays canned outcomes and records every request.
    #[derive(Default)]
    struct ScriptedBackend {
        summaries: RefCell<VecDeque<Result<SummarizeResponse, BackendError>>>,
        answers: RefCell<VecDeque<Result<AskResponse, BackendError>>>,
        analytics: RefCell<VecDeque<Result<AnalyticsResult, BackendError>>>,
        summarize_calls: RefCell<Vec<SummarizeRequest>>,
        ask_calls: RefCell<Vec<AskRequest>>,
        analytics_calls: RefCell<Vec<AnalyticsRequest>>,
    }

    impl ScriptedBackend {
        fn with_summary(self, summary: Option<&str>) -> Self {
            self.summaries.borrow_mut().push_back(Ok(SummarizeResponse {
                summary: summary.map(str::to_string),
            }));
            self
        }

        fn with_answer(self, answer: &str) -> Self {
            self.answers.borrow_mut().push_back(Ok(AskResponse {
                answer: Some(answer.to_string()),
            }));
            self
        }

        fn with_analytics(self, result: Result<AnalyticsResult, BackendError>) -> Self {
            self.analytics.borrow_mut().push_back(result);
            self
        }

        fn with_answer_error(self, err: BackendError) -> Self {
            self.answers.borrow_mut().push_back(Err(err));
            self
        }

        fn with_summary_error(self, err: BackendError) -> Self {
            self.summaries.borrow_mut().push_back(Err(err));
            self
        }
    }

    impl ChatBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        fn summarize(&self, req: &SummarizeRequest) -> Result<SummarizeResponse, BackendError> {
            self.summarize_calls.borrow_mut().push(req.clone());
            self.summaries
                .borrow_mut()
                .pop_front()
                .expect("unexpected summarize call")
        }

        fn ask(&self, req: &AskRequest) -> Result<AskResponse, BackendError> {
            self.ask_calls.borrow_mut().push(req.clone());
            self.answers.borrow_mut().pop_front().expect("unexpected ask call")
        }

        fn analytics(&self, req: &AnalyticsRequest) -> Result<AnalyticsResult, BackendError> {
            self.analytics_calls.borrow_mut().push(req.clone());
            self.analytics
                .borrow_mut()
                .pop_front()
                .expect("unexpected analytics call")
        }
    }

    fn session_with_chat() -> Session {
        let mut session = Session::default();
        session
            .load_transcript(Transcript::pasted("Ana: ship friday?\nBen: yes"))
            .unwrap();
        session
    }

    fn summarized_session() -> Session {
        let mut session = session_with_chat();
        let backend = ScriptedBackend::default().with_summary(Some("🧠 Main Topics\n- shipping"));
        session.run_summarize(&backend);
        session
    }

    #[test]
    fn summarize_sends_transcript_model_and_window() {
        let mut session = session_with_chat();
        session.config_mut().model = ModelTier::Fast;
        session.config_mut().window_mode = WindowMode::Recent;
        session.config_mut().window_input = "5".to_string();

        let backend = ScriptedBackend::default().with_summary(Some("done"));
        assert_eq!(session.run_summarize(&backend), FlowStatus::Succeeded);

        let calls = backend.summarize_calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].chat_text, "Ana: ship friday?\nBen: yes");
        assert_eq!(calls[0].model, ModelTier::Fast);
        assert_eq!(calls[0].last_n, window::MIN_WINDOW);
        assert_eq!(session.summary(), Some("done"));
    }

    #[test]
    fn summarize_all_mode_sends_zero_window() {
        let mut session = session_with_chat();
        session.config_mut().window_input = "250".to_string();

        let backend = ScriptedBackend::default().with_summary(Some("done"));
        session.run_summarize(&backend);
        assert_eq!(backend.summarize_calls.borrow()[0].last_n, 0);
    }

    #[test]
    fn summarize_requires_a_transcript() {
        let mut session = Session::default();
        assert!(session.begin_summarize().is_none());

        session.load_transcript(Transcript::pasted("   \n")).unwrap();
        let backend = ScriptedBackend::default();
        assert_eq!(session.run_summarize(&backend), FlowStatus::Idle);
        assert!(backend.summarize_calls.borrow().is_empty());
    }

    #[test]
    fn restarting_an_in_flight_flow_is_a_noop() {
        let mut session = session_with_chat();
        assert!(session.begin_summarize().is_some());

        let backend = ScriptedBackend::default();
        assert_eq!(session.run_summarize(&backend), FlowStatus::InFlight);
        assert!(session.begin_summarize().is_none());
        assert!(backend.summarize_calls.borrow().is_empty());

        assert!(session.begin_analyze().is_some());
        assert!(session.begin_analyze().is_none());
        assert_eq!(session.run_analyze(&backend), FlowStatus::InFlight);
        assert!(backend.analytics_calls.borrow().is_empty());
    }

    #[test]
    fn missing_summary_key_yields_empty_summary() {
        let mut session = session_with_chat();
        let backend = ScriptedBackend::default()
            .with_summary(Some("old summary"))
            .with_summary(None);

        session.run_summarize(&backend);
        assert_eq!(session.summary(), Some("old summary"));

        assert_eq!(session.run_summarize(&backend), FlowStatus::Succeeded);
        assert_eq!(session.summary(), Some(""));
        assert_eq!(session.status(), None);
    }

    #[test]
    fn summarize_failure_uses_backend_detail() {
        let mut session = session_with_chat();
        let backend = ScriptedBackend::default().with_summary_error(BackendError::Rejected {
            status: 503,
            detail: Some("Ollama is not running".to_string()),
        });

        assert_eq!(session.run_summarize(&backend), FlowStatus::Failed);
        assert_eq!(session.summary(), None);
        assert_eq!(session.status(), Some("Ollama is not running"));
    }

    #[test]
    fn summarize_transport_failure_uses_fallback() {
        let mut session = session_with_chat();
        let backend = ScriptedBackend::default()
            .with_summary_error(BackendError::Transport("connection refused".to_string()));

        session.run_summarize(&backend);
        assert_eq!(session.status(), Some("Error generating summary."));
    }

    #[test]
    fn ask_requires_summary_and_question() {
        let mut session = session_with_chat();
        session.set_question("when do we ship?");
        assert!(!session.can_ask());
        assert!(session.begin_ask().is_none());

        let mut session = summarized_session();
        assert!(!session.can_ask());
        session.set_question("   ");
        assert!(!session.can_ask());
        session.set_question("when do we ship?");
        assert!(session.can_ask());
    }

    #[test]
    fn ask_sends_summary_and_question() {
        let mut session = summarized_session();
        session.set_question("when do we ship?");

        let backend = ScriptedBackend::default().with_answer("Friday.");
        assert_eq!(session.run_ask(&backend), FlowStatus::Succeeded);

        let calls = backend.ask_calls.borrow();
        assert_eq!(calls[0].summary, "🧠 Main Topics\n- shipping");
        assert_eq!(calls[0].question, "when do we ship?");
        assert_eq!(calls[0].chat_text, "Ana: ship friday?\nBen: yes");
        assert_eq!(
            session.qa(),
            QaExchange {
                question: "when do we ship?",
                answer: Some("Friday.")
            }
        );
    }

    #[test]
    fn ask_failure_reports_detail_or_fallback() {
        let mut session = summarized_session();
        session.set_question("when do we ship?");
        let backend = ScriptedBackend::default()
            .with_answer("Friday.")
            .with_answer_error(BackendError::Rejected {
                status: 400,
                detail: Some("Question too long".to_string()),
            })
            .with_answer_error(BackendError::Transport("connection reset".to_string()));

        assert_eq!(session.run_ask(&backend), FlowStatus::Succeeded);

        assert_eq!(session.run_ask(&backend), FlowStatus::Failed);
        assert_eq!(session.status(), Some("Question too long"));
        assert_eq!(session.qa().answer, None);

        assert_eq!(session.run_ask(&backend), FlowStatus::Failed);
        assert_eq!(session.status(), Some("Error answering question."));
        assert_eq!(session.flow_status(Flow::Ask), FlowStatus::Failed);
        assert_eq!(session.summary(), Some("🧠 Main Topics\n- shipping"));
    }

    #[test]
    fn new_summary_resets_qa_exchange() {
        let mut session = summarized_session();
        session.set_question("when do we ship?");
        let backend = ScriptedBackend::default()
            .with_answer("Friday.")
            .with_summary(Some("✅ Decisions\n- ship"));
        session.run_ask(&backend);
        assert!(session.qa().answer.is_some());

        session.run_summarize(&backend);
        assert_eq!(
            session.qa(),
            QaExchange {
                question: "",
                answer: None
            }
        );
    }

    #[test]
    fn failed_summary_also_resets_qa_exchange() {
        let mut session = summarized_session();
        session.set_question("q");
        let backend = ScriptedBackend::default()
            .with_answer("a")
            .with_summary_error(BackendError::Transport("down".to_string()));
        session.run_ask(&backend);

        session.run_summarize(&backend);
        assert_eq!(session.qa().answer, None);
        assert!(!session.can_ask());
    }

    #[test]
    fn answer_for_superseded_summary_is_dropped() {
        let mut session = summarized_session();
        session.set_question("when do we ship?");
        let pending = session.begin_ask().unwrap();

        // A new summarize starts and finishes while the answer is pending.
        let req = session.begin_summarize().unwrap();
        assert_eq!(req.chat_text, "Ana: ship friday?\nBen: yes");
        session.finish_summarize(Ok(SummarizeResponse {
            summary: Some("fresh".to_string()),
        }));

        session.finish_ask(
            pending,
            Ok(AskResponse {
                answer: Some("stale".to_string()),
            }),
        );
        assert_eq!(session.qa().answer, None);
        assert_eq!(session.flow_status(Flow::Ask), FlowStatus::Idle);
        assert_eq!(session.summary(), Some("fresh"));
    }

    #[test]
    fn analyze_always_sends_full_window() {
        let mut session = session_with_chat();
        session.config_mut().window_mode = WindowMode::Recent;
        session.config_mut().window_input = "50".to_string();

        let result = AnalyticsResult {
            total_messages: 2,
            ..Default::default()
        };
        let backend = ScriptedBackend::default().with_analytics(Ok(result.clone()));
        assert_eq!(session.run_analyze(&backend), FlowStatus::Succeeded);
        assert_eq!(backend.analytics_calls.borrow()[0].last_n, 0);
        assert_eq!(session.analytics(), Some(&result));
    }

    #[test]
    fn analyze_failure_clears_previous_result() {
        let mut session = session_with_chat();
        let backend = ScriptedBackend::default()
            .with_analytics(Ok(AnalyticsResult::default()))
            .with_analytics(Err(BackendError::Rejected {
                status: 500,
                detail: None,
            }));

        session.run_analyze(&backend);
        assert!(session.analytics().is_some());

        assert_eq!(session.run_analyze(&backend), FlowStatus::Failed);
        assert!(session.analytics().is_none());
        assert_eq!(session.status(), Some("Error generating analytics."));
    }

    #[test]
    fn starting_a_flow_clears_stale_status() {
        let mut session = session_with_chat();
        let backend = ScriptedBackend::default()
            .with_summary_error(BackendError::Transport("down".to_string()));
        session.run_summarize(&backend);
        assert!(session.status().is_some());

        assert!(session.begin_analyze().is_some());
        assert_eq!(session.status(), None);
    }

    #[test]
    fn flows_are_independent() {
        let mut session = summarized_session();
        session.set_question("q");

        assert!(session.begin_analyze().is_some());
        assert!(session.begin_ask().is_some());
        assert!(session.begin_summarize().is_some());
        assert_eq!(session.flow_status(Flow::Analyze), FlowStatus::InFlight);
        assert_eq!(session.flow_status(Flow::Ask), FlowStatus::InFlight);
    }

    #[test]
    fn transcript_replacement_is_blocked_while_in_flight() {
        let mut session = session_with_chat();
        session.begin_analyze().unwrap();

        let err = session
            .load_transcript(Transcript::pasted("other"))
            .unwrap_err();
        assert_eq!(err, SessionError::Busy(Flow::Analyze));
        assert_eq!(session.clear().unwrap_err(), SessionError::Busy(Flow::Analyze));
        assert_eq!(
            session.transcript().map(Transcript::text),
            Some("Ana: ship friday?\nBen: yes")
        );

        session.finish_analyze(Ok(AnalyticsResult::default()));
        session.load_transcript(Transcript::pasted("other")).unwrap();
        assert!(session.analytics().is_none());
    }

    #[test]
    fn failed_archive_load_keeps_previous_transcript() {
        let mut session = summarized_session();

        let empty_zip = {
            let writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
            let mut cursor = writer.finish().unwrap();
            cursor.set_position(0);
            cursor
        };
        assert!(!session.load_archive(empty_zip).unwrap());
        assert_eq!(
            session.status(),
            Some("❌ No .txt file found inside ZIP. Export chat again (Without media).")
        );
        assert_eq!(
            session.transcript().map(Transcript::text),
            Some("Ana: ship friday?\nBen: yes")
        );
        assert!(session.summary().is_some());
    }

    #[test]
    fn archive_load_replaces_transcript_and_derived_state() {
        use std::io::Write;

        let mut session = summarized_session();
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        writer
            .start_file("_chat.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"Cam: new chat").unwrap();
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);

        assert!(session.load_archive(cursor).unwrap());
        assert_eq!(session.transcript().map(Transcript::text), Some("Cam: new chat"));
        assert_eq!(session.summary(), None);
        assert_eq!(session.status(), Some("✅ Loaded: _chat.txt"));
    }

    #[test]
    fn late_completion_is_ignored() {
        let mut session = session_with_chat();
        session.finish_summarize(Ok(SummarizeResponse {
            summary: Some("ghost".to_string()),
        }));
        assert_eq!(session.summary(), None);
        assert_eq!(session.flow_status(Flow::Summarize), FlowStatus::Idle);
    }
}
