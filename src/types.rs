use serde::{Deserialize, Serialize};

/// Which screen is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkflowStep {
    #[default]
    Input,
    Analysis,
    Generation,
}

/// Structured analysis of a script (field names match the API's JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub structure: String,
    pub tone: String,
    pub target_audience: String,
    pub hook_strategy: String,
    pub suggested_topics: Vec<String>,
}

/// The single workflow record. Transitions in `crate::workflow` take a
/// reference and hand back a fresh value; nothing mutates it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    pub original_script: String,
    pub analysis: Option<AnalysisResult>,
    pub selected_topic: Option<String>,
    pub generated_script: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub step: WorkflowStep,
}

impl WorkflowState {
    /// State positioned on the topic picker for an analysis produced earlier
    /// (e.g. loaded from disk by the `generate` command).
    pub fn with_analysis(analysis: AnalysisResult) -> Self {
        Self {
            analysis: Some(analysis),
            step: WorkflowStep::Analysis,
            ..Self::default()
        }
    }
}
