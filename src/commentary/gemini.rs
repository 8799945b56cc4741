//! Google Gemini `generateContent` client.
//!
//! Blocking HTTP with a hard timeout; the analysis pipeline is synchronous
//! and the commentary call is its only network I/O.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{CommentaryProvider, CommentaryRequest};
use crate::config::CommentaryConfig;
use crate::error::{AnalyzerError, Result};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<PartOut<'a>>,
}

#[derive(Serialize)]
struct PartOut<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartIn>,
}

#[derive(Deserialize)]
struct PartIn {
    #[serde(default)]
    text: String,
}

/// Commentary backed by the Gemini REST API.
pub struct GeminiProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiProvider {
    /// Build a provider from config, reading the key from the environment
    /// variable named by `api_key_env`.
    pub fn from_config(config: &CommentaryConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AnalyzerError::Commentary(format!(
                    "API key not found; set the {} environment variable",
                    config.api_key_env
                ))
            })?;
        Self::new(config, api_key)
    }

    pub fn new(config: &CommentaryConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalyzerError::Commentary(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AnalyzerError::Commentary(
            "model returned an empty response".into(),
        ));
    }
    Ok(text)
}

impl CommentaryProvider for GeminiProvider {
    fn comment(&self, request: &CommentaryRequest) -> Result<String> {
        let prompt = request.prompt();
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![PartOut { text: &prompt }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_bytes = prompt.len(), "requesting commentary");
        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| AnalyzerError::Commentary(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(AnalyzerError::Commentary(format!(
                "service returned {status}: {}",
                detail.chars().take(200).collect::<String>()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| AnalyzerError::Commentary(format!("invalid response: {e}")))?;
        extract_text(parsed)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
