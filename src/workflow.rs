//! Workflow controller: pure transitions over `WorkflowState`.
//!
//! Requests are split in two halves. `submit_script` / `select_topic` return
//! the loading state plus the `Request` to run; once the service answers,
//! `complete` folds the `Outcome` back in. The TUI runs the request on a task
//! in between, `Controller` just awaits it.

use tracing::{debug, warn};

use crate::defaults::Defaults;
use crate::error::{ServiceError, WorkflowError};
use crate::gemini::ScriptService;
use crate::types::{AnalysisResult, WorkflowState, WorkflowStep};

/// Outbound call a transition asks the caller to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Analyze { script: String },
    Generate { topic: String, analysis: AnalysisResult },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Analyzed(Result<AnalysisResult, ServiceError>),
    Generated(Result<String, ServiceError>),
}

pub type Begin = Result<(WorkflowState, Option<Request>), WorkflowError>;

fn ensure_idle(state: &WorkflowState) -> Result<(), WorkflowError> {
    if state.is_loading {
        warn!("rejected: a request is already in flight");
        return Err(WorkflowError::RequestInFlight);
    }
    Ok(())
}

/// Update the script being edited. Frozen once analysis has started.
pub fn set_script(state: &WorkflowState, text: impl Into<String>) -> WorkflowState {
    if state.is_loading || state.step != WorkflowStep::Input {
        return state.clone();
    }
    WorkflowState { original_script: text.into(), ..state.clone() }
}

pub fn submit_script(state: &WorkflowState, text: &str) -> Begin {
    ensure_idle(state)?;

    if text.trim().is_empty() {
        let next = WorkflowState { error: Some(Defaults::MSG_EMPTY_SCRIPT.to_string()), ..state.clone() };
        return Ok((next, None));
    }

    let next = WorkflowState {
        original_script: text.to_string(),
        is_loading: true,
        error: None,
        ..state.clone()
    };
    debug!(chars = text.chars().count(), "analysis started");
    Ok((next, Some(Request::Analyze { script: text.to_string() })))
}

pub fn select_topic(state: &WorkflowState, topic: &str) -> Begin {
    ensure_idle(state)?;

    let Some(analysis) = state.analysis.clone() else {
        return Ok((state.clone(), None));
    };

    let next = WorkflowState {
        selected_topic: Some(topic.to_string()),
        is_loading: true,
        error: None,
        ..state.clone()
    };
    debug!(topic, "generation started");
    Ok((next, Some(Request::Generate { topic: topic.to_string(), analysis })))
}

/// Fold a finished request back into the state.
pub fn complete(state: &WorkflowState, outcome: Outcome) -> WorkflowState {
    if !state.is_loading {
        warn!("ignoring stale outcome: no request in flight");
        return state.clone();
    }

    match outcome {
        Outcome::Analyzed(Ok(analysis)) => {
            debug!(topics = analysis.suggested_topics.len(), "analysis complete");
            WorkflowState {
                analysis: Some(analysis),
                step: WorkflowStep::Analysis,
                is_loading: false,
                ..state.clone()
            }
        }
        Outcome::Analyzed(Err(e)) => WorkflowState {
            error: Some(e.user_message().to_string()),
            is_loading: false,
            ..state.clone()
        },
        Outcome::Generated(Ok(script)) => {
            debug!(chars = script.chars().count(), "generation complete");
            WorkflowState {
                generated_script: Some(script),
                step: WorkflowStep::Generation,
                is_loading: false,
                ..state.clone()
            }
        }
        // Topic is dropped so the list can be picked from again.
        Outcome::Generated(Err(e)) => WorkflowState {
            error: Some(e.user_message().to_string()),
            is_loading: false,
            selected_topic: None,
            ..state.clone()
        },
    }
}

pub fn reset() -> WorkflowState {
    WorkflowState::default()
}

/// Back to the topic picker, keeping the analysis.
pub fn soft_reset(state: &WorkflowState) -> Result<WorkflowState, WorkflowError> {
    ensure_idle(state)?;

    let Some(analysis) = state.analysis.clone() else {
        return Ok(reset());
    };
    Ok(WorkflowState {
        analysis: Some(analysis),
        generated_script: None,
        selected_topic: None,
        error: None,
        step: WorkflowStep::Analysis,
        ..state.clone()
    })
}

/// Run one request against the service.
pub async fn execute<S: ScriptService + ?Sized>(service: &S, request: Request) -> Outcome {
    match request {
        Request::Analyze { script } => Outcome::Analyzed(service.analyze_script(&script).await),
        Request::Generate { topic, analysis } => {
            Outcome::Generated(service.generate_new_script(&topic, &analysis).await)
        }
    }
}

/// Owns one state and a service; each operation runs begin, call and complete in one go.
pub struct Controller<S> {
    service: S,
    state: WorkflowState,
}

impl<S: ScriptService> Controller<S> {
    pub fn new(service: S) -> Self {
        Self::resume(service, WorkflowState::default())
    }

    pub fn resume(service: S, state: WorkflowState) -> Self {
        Self { service, state }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub async fn submit_script(&mut self, text: &str) -> Result<(), WorkflowError> {
        let begun = submit_script(&self.state, text)?;
        self.run(begun).await;
        Ok(())
    }

    pub async fn select_topic(&mut self, topic: &str) -> Result<(), WorkflowError> {
        let begun = select_topic(&self.state, topic)?;
        self.run(begun).await;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = reset();
    }

    pub fn soft_reset(&mut self) -> Result<(), WorkflowError> {
        self.state = soft_reset(&self.state)?;
        Ok(())
    }

    async fn run(&mut self, (next, request): (WorkflowState, Option<Request>)) {
        self.state = next;
        if let Some(request) = request {
            let outcome = execute(&self.service, request).await;
            self.state = complete(&self.state, outcome);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub(crate) fn sample_analysis() -> AnalysisResult {
        AnalysisResult {
            structure: "S".into(),
            tone: "T".into(),
            target_audience: "A".into(),
            hook_strategy: "H".into(),
            suggested_topics: ["t1", "t2", "t3", "t4", "t5"].map(String::from).to_vec(),
        }
    }

    /// Scripted service that counts calls.
    #[derive(Clone)]
    pub(crate) struct FakeService {
        pub analysis: Result<AnalysisResult, ServiceError>,
        pub script: Result<String, ServiceError>,
        pub calls: Arc<AtomicUsize>,
    }

    impl FakeService {
        pub(crate) fn ok() -> Self {
            Self {
                analysis: Ok(sample_analysis()),
                script: Ok("Generated script text".into()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScriptService for FakeService {
        async fn analyze_script(&self, _script: &str) -> Result<AnalysisResult, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.analysis.clone()
        }

        async fn generate_new_script(
            &self,
            _topic: &str,
            _analysis: &AnalysisResult,
        ) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script.clone()
        }
    }

    fn analysis_state() -> WorkflowState {
        WorkflowState { original_script: "Hello world script".into(), ..WorkflowState::with_analysis(sample_analysis()) }
    }

    #[tokio::test]
    async fn blank_submission_sets_error_without_request() {
        for text in ["", "   ", "\n\t "] {
            let service = FakeService::ok();
            let mut c = Controller::new(service.clone());
            c.submit_script(text).await.unwrap();

            assert_eq!(service.calls(), 0);
            assert_eq!(c.state().step, WorkflowStep::Input);
            assert_eq!(c.state().error.as_deref(), Some(Defaults::MSG_EMPTY_SCRIPT));
            assert!(!c.state().is_loading);
        }
    }

    #[test]
    fn submit_marks_loading_and_clears_error() {
        let before = WorkflowState { error: Some("old".into()), ..WorkflowState::default() };
        let (next, request) = submit_script(&before, "Hello world script").unwrap();
        assert!(next.is_loading);
        assert!(next.error.is_none());
        assert_eq!(next.original_script, "Hello world script");
        assert_eq!(request, Some(Request::Analyze { script: "Hello world script".into() }));
    }

    #[tokio::test]
    async fn successful_analysis_moves_to_analysis_step() {
        let mut c = Controller::new(FakeService::ok());
        c.submit_script("Hello world script").await.unwrap();

        let s = c.state();
        assert_eq!(s.step, WorkflowStep::Analysis);
        assert_eq!(s.analysis, Some(sample_analysis()));
        assert!(!s.is_loading);
        assert!(s.error.is_none());
    }

    #[tokio::test]
    async fn failed_analysis_stays_on_input_with_error() {
        let service = FakeService {
            analysis: Err(ServiceError::AnalysisFailed("HTTP 500".into())),
            ..FakeService::ok()
        };
        let mut c = Controller::new(service);
        c.submit_script("Hello world script").await.unwrap();

        let s = c.state();
        assert_eq!(s.step, WorkflowStep::Input);
        assert!(!s.is_loading);
        assert_eq!(s.error.as_deref(), Some(Defaults::MSG_ANALYSIS_FAILED));
        assert!(s.analysis.is_none());
    }

    #[tokio::test]
    async fn invalid_analysis_has_its_own_message() {
        let service = FakeService {
            analysis: Err(ServiceError::InvalidAnalysis("missing field `suggestedTopics`".into())),
            ..FakeService::ok()
        };
        let mut c = Controller::new(service);
        c.submit_script("Hello world script").await.unwrap();

        assert_eq!(c.state().step, WorkflowStep::Input);
        assert_eq!(c.state().error.as_deref(), Some(Defaults::MSG_INVALID_ANALYSIS));
    }

    #[tokio::test]
    async fn selecting_topic_without_analysis_is_a_noop() {
        let service = FakeService::ok();
        let mut c = Controller::new(service.clone());
        let before = c.state().clone();

        c.select_topic("t2").await.unwrap();

        assert_eq!(c.state(), &before);
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn successful_generation_moves_to_generation_step() {
        let mut c = Controller::resume(FakeService::ok(), analysis_state());
        c.select_topic("t3").await.unwrap();

        let s = c.state();
        assert_eq!(s.step, WorkflowStep::Generation);
        assert_eq!(s.selected_topic.as_deref(), Some("t3"));
        assert_eq!(s.generated_script.as_deref(), Some("Generated script text"));
        assert!(!s.is_loading);
        assert!(s.error.is_none());
    }

    #[tokio::test]
    async fn failed_generation_drops_topic_and_keeps_analysis() {
        let service = FakeService {
            script: Err(ServiceError::GenerationFailed("timeout".into())),
            ..FakeService::ok()
        };
        let mut c = Controller::resume(service, analysis_state());
        c.select_topic("t1").await.unwrap();

        let s = c.state();
        assert_eq!(s.step, WorkflowStep::Analysis);
        assert!(s.selected_topic.is_none());
        assert_eq!(s.analysis, Some(sample_analysis()));
        assert_eq!(s.error.as_deref(), Some(Defaults::MSG_GENERATION_FAILED));
        assert!(!s.is_loading);
    }

    #[test]
    fn reset_yields_initial_state_from_anywhere() {
        let busy = WorkflowState {
            original_script: "x".into(),
            selected_topic: Some("t1".into()),
            generated_script: Some("y".into()),
            is_loading: true,
            error: Some("e".into()),
            step: WorkflowStep::Generation,
            ..analysis_state()
        };
        for prior in [WorkflowState::default(), analysis_state(), busy] {
            let mut c = Controller::resume(FakeService::ok(), prior);
            c.reset();
            assert_eq!(c.state(), &WorkflowState::default());
        }
    }

    #[test]
    fn soft_reset_keeps_analysis_only() {
        let done = WorkflowState {
            selected_topic: Some("t2".into()),
            generated_script: Some("Generated script text".into()),
            error: Some("e".into()),
            step: WorkflowStep::Generation,
            ..analysis_state()
        };
        let s = soft_reset(&done).unwrap();
        assert_eq!(s.step, WorkflowStep::Analysis);
        assert_eq!(s.analysis, done.analysis);
        assert!(s.selected_topic.is_none());
        assert!(s.generated_script.is_none());
        assert!(s.error.is_none());
        assert_eq!(s.original_script, "Hello world script");
    }

    #[test]
    fn soft_reset_without_analysis_falls_back_to_reset() {
        let s = WorkflowState { original_script: "draft".into(), ..WorkflowState::default() };
        assert_eq!(soft_reset(&s).unwrap(), WorkflowState::default());
    }

    #[test]
    fn overlapping_requests_are_rejected() {
        let (loading, _) = submit_script(&WorkflowState::default(), "Hello world script").unwrap();

        assert_eq!(submit_script(&loading, "again"), Err(WorkflowError::RequestInFlight));
        assert_eq!(select_topic(&loading, "t1"), Err(WorkflowError::RequestInFlight));
        assert_eq!(soft_reset(&loading), Err(WorkflowError::RequestInFlight));

        let (generating, _) = select_topic(&analysis_state(), "t1").unwrap();
        assert_eq!(select_topic(&generating, "t2"), Err(WorkflowError::RequestInFlight));
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let idle = reset();
        let after = complete(&idle, Outcome::Analyzed(Ok(sample_analysis())));
        assert_eq!(after, idle);
    }

    #[test]
    fn script_edits_freeze_once_analysis_starts() {
        let s = set_script(&WorkflowState::default(), "draft");
        assert_eq!(s.original_script, "draft");

        let (loading, _) = submit_script(&s, "draft").unwrap();
        assert_eq!(set_script(&loading, "changed").original_script, "draft");
        assert_eq!(set_script(&analysis_state(), "changed").original_script, "Hello world script");
    }

    #[tokio::test]
    async fn end_to_end_analyze_then_generate() {
        let service = FakeService::ok();
        let mut c = Controller::new(service.clone());

        c.submit_script("Hello world script").await.unwrap();
        assert_eq!(c.state().step, WorkflowStep::Analysis);
        assert_eq!(c.state().analysis.as_ref().unwrap().suggested_topics[1], "t2");

        c.select_topic("t2").await.unwrap();

        let s = c.state();
        assert_eq!(s.step, WorkflowStep::Generation);
        assert_eq!(s.selected_topic.as_deref(), Some("t2"));
        assert_eq!(s.generated_script.as_deref(), Some("Generated script text"));
        assert_eq!(service.calls(), 2);

        c.soft_reset().unwrap();
        assert_eq!(c.state().step, WorkflowStep::Analysis);
        c.reset();
        assert_eq!(c.state(), &WorkflowState::default());
    }
}
