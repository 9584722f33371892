//! `generateContent` request/response shapes and analysis validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::Defaults;
use crate::error::ServiceError;
use crate::types::AnalysisResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: &'static str,
    pub response_schema: Value,
}

impl GenerateContentRequest {
    /// Single user turn with plain text.
    pub fn text(prompt: String) -> Self {
        Self {
            contents: vec![Content { role: "user", parts: vec![Part { text: prompt }] }],
            generation_config: None,
        }
    }

    /// Ask for `application/json` output constrained by `schema`.
    pub fn with_json_schema(mut self, schema: Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: "application/json",
            response_schema: schema,
        });
        self
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined. Empty when there is none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default()
    }
}

/// Generated script as returned, or the fixed fallback when the model sent nothing.
pub fn script_or_fallback(text: String) -> String {
    if text.is_empty() {
        return Defaults::GENERATION_FALLBACK.to_string();
    }
    text
}

/// Loose mirror of `AnalysisResult` so missing fields can be reported by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    structure: Option<String>,
    tone: Option<String>,
    target_audience: Option<String>,
    hook_strategy: Option<String>,
    suggested_topics: Option<Vec<String>>,
}

/// Parse the model's JSON reply into a complete `AnalysisResult`.
///
/// An empty reply is read as `{}` and therefore fails validation. Text that is
/// not JSON at all is an `AnalysisFailed`; JSON of the wrong shape (missing,
/// mistyped or blank fields, no usable topics) is an `InvalidAnalysis`.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, ServiceError> {
    let body = strip_code_fence(text.trim());
    let body = if body.is_empty() { "{}" } else { body };

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ServiceError::AnalysisFailed(format!("response is not valid JSON: {e}")))?;
    // serde would otherwise fill the struct from an array by position
    if !value.is_object() {
        return Err(ServiceError::InvalidAnalysis("response is not a JSON object".into()));
    }
    let raw: RawAnalysis = serde_json::from_value(value)
        .map_err(|e| ServiceError::InvalidAnalysis(e.to_string()))?;

    let structure = required_text("structure", raw.structure)?;
    let tone = required_text("tone", raw.tone)?;
    let target_audience = required_text("targetAudience", raw.target_audience)?;
    let hook_strategy = required_text("hookStrategy", raw.hook_strategy)?;

    let suggested_topics: Vec<String> = raw
        .suggested_topics
        .ok_or_else(|| missing("suggestedTopics"))?
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .collect();
    if suggested_topics.is_empty() {
        return Err(ServiceError::InvalidAnalysis("`suggestedTopics` has no topics".into()));
    }

    Ok(AnalysisResult { structure, tone, target_audience, hook_strategy, suggested_topics })
}

fn required_text(name: &str, value: Option<String>) -> Result<String, ServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(ServiceError::InvalidAnalysis(format!("`{name}` is empty"))),
        None => Err(missing(name)),
    }
}

fn missing(name: &str) -> ServiceError {
    ServiceError::InvalidAnalysis(format!("missing field `{name}`"))
}

// Models occasionally wrap JSON in a ```json fence even in JSON mode.
fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else { return s };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
