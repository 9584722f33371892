//! Error types for the script service and the workflow controller

use thiserror::Error;

use crate::defaults::Defaults;

/// Failures at the service boundary. Every variant maps to one fixed
/// user-facing message; the payload is kept for the log only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("analysis response has an invalid shape: {0}")]
    InvalidAnalysis(String),

    #[error("generation failed: {0}")]
    GenerationFailed(String),
}

impl ServiceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ServiceError::AnalysisFailed(_) => Defaults::MSG_ANALYSIS_FAILED,
            ServiceError::InvalidAnalysis(_) => Defaults::MSG_INVALID_ANALYSIS,
            ServiceError::GenerationFailed(_) => Defaults::MSG_GENERATION_FAILED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("a request is already in flight")]
    RequestInFlight,
}
