use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::prompts::{analysis_prompt, analysis_schema, generation_prompt};
use super::wire::{parse_analysis, script_or_fallback, GenerateContentRequest, GenerateContentResponse};
use super::ScriptService;
use crate::config::Config;
use crate::error::ServiceError;
use crate::types::AnalysisResult;

/// Gemini `generateContent` client. One attempt per call, no retries.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    analysis_model: String,
    generation_model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("building HTTP client")?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
            analysis_model: config.analysis_model.clone(),
            generation_model: config.generation_model.clone(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            model
        )
    }

    async fn generate_content(&self, model: &str, request: &GenerateContentRequest) -> Result<String> {
        // Not checked at startup: a missing key only surfaces on first use.
        let Some(api_key) = self.api_key.as_deref() else {
            bail!("API key is not configured");
        };

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .with_context(|| format!("sending request to {model}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Gemini API error: {} - {}", status, response.text().await.unwrap_or_default());
        }

        let body: GenerateContentResponse =
            response.json().await.context("decoding generateContent response")?;
        Ok(body.text())
    }
}

#[async_trait]
impl ScriptService for GeminiClient {
    async fn analyze_script(&self, script: &str) -> Result<AnalysisResult, ServiceError> {
        let prompt = analysis_prompt(script);
        info!(model = %self.analysis_model, prompt_chars = prompt.chars().count(), "requesting analysis");

        let request = GenerateContentRequest::text(prompt).with_json_schema(analysis_schema());
        let text = self
            .generate_content(&self.analysis_model, &request)
            .await
            .map_err(|e| {
                error!("Analysis failed: {e:#}");
                ServiceError::AnalysisFailed(format!("{e:#}"))
            })?;

        debug!(response_chars = text.chars().count(), "analysis response received");
        parse_analysis(&text).map_err(|e| {
            error!("Analysis failed: {e}");
            e
        })
    }

    async fn generate_new_script(
        &self,
        topic: &str,
        analysis: &AnalysisResult,
    ) -> Result<String, ServiceError> {
        let prompt = generation_prompt(topic, analysis);
        info!(model = %self.generation_model, topic, prompt_chars = prompt.chars().count(), "requesting generation");

        let request = GenerateContentRequest::text(prompt);
        let text = self
            .generate_content(&self.generation_model, &request)
            .await
            .map_err(|e| {
                error!("Generation failed: {e:#}");
                ServiceError::GenerationFailed(format!("{e:#}"))
            })?;

        if text.is_empty() {
            warn!("empty generation response, using fallback text");
        }
        Ok(script_or_fallback(text))
    }
}
