use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use super::{emit, read_input};
use crate::gemini::ScriptService;
use crate::types::{AnalysisResult, WorkflowStep};
use crate::workflow::Controller;

/// Run the analysis step once and return the result, or the user-facing error.
pub async fn analyze<S: ScriptService>(service: S, script: &str) -> Result<AnalysisResult> {
    let mut controller = Controller::new(service);
    controller.submit_script(script).await?;

    let state = controller.state();
    match (&state.analysis, state.step) {
        (Some(analysis), WorkflowStep::Analysis) => Ok(analysis.clone()),
        _ => Err(anyhow!(state.error.clone().unwrap_or_else(|| "analysis did not complete".into()))),
    }
}

pub async fn run<S: ScriptService>(service: S, file: &Path, out: Option<PathBuf>) -> Result<()> {
    let script = read_input(file)?;
    let analysis = analyze(service, &script).await?;
    emit(&serde_json::to_string_pretty(&analysis)?, out)
}
