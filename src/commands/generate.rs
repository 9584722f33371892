use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

use super::{emit, read_input};
use crate::gemini::{parse_analysis, ScriptService};
use crate::types::{AnalysisResult, WorkflowState, WorkflowStep};
use crate::workflow::Controller;

/// Generate a script for `topic` from an analysis produced earlier.
pub async fn generate<S: ScriptService>(service: S, analysis: AnalysisResult, topic: &str) -> Result<String> {
    let mut controller = Controller::resume(service, WorkflowState::with_analysis(analysis));
    controller.select_topic(topic).await?;

    let state = controller.state();
    match (&state.generated_script, state.step) {
        (Some(script), WorkflowStep::Generation) => Ok(script.clone()),
        _ => Err(anyhow!(state.error.clone().unwrap_or_else(|| "generation did not complete".into()))),
    }
}

pub async fn run<S: ScriptService>(service: S, analysis_path: &Path, topic: &str, out: Option<PathBuf>) -> Result<()> {
    let text = read_input(analysis_path)?;
    // Same shape checks as a live response.
    let analysis = parse_analysis(&text).with_context(|| format!("parsing {}", analysis_path.display()))?;
    if topic.trim().is_empty() {
        return Err(anyhow!("--topic must not be empty"));
    }
    let script = generate(service, analysis, topic).await?;
    emit(&script, out)
}
