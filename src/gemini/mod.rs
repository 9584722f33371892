/// Gemini-backed script analysis and generation
///
/// The rest of the app talks to `ScriptService` only; `GeminiClient` is the
/// production implementation and tests substitute their own.
pub mod client;
pub mod prompts;
pub mod wire;

use async_trait::async_trait;

pub use client::GeminiClient;
pub use wire::parse_analysis;

use crate::error::ServiceError;
use crate::types::AnalysisResult;

#[async_trait]
pub trait ScriptService: Send + Sync {
    /// Analyze raw script text into the fixed-shape result.
    async fn analyze_script(&self, script: &str) -> Result<AnalysisResult, ServiceError>;

    /// Write a new script on `topic` in the style described by `analysis`.
    async fn generate_new_script(
        &self,
        topic: &str,
        analysis: &AnalysisResult,
    ) -> Result<String, ServiceError>;
}
