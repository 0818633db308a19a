//! Gemini content formatter: the real [`ContentFormatter`] implementation.
//!
//! Builds the developer prompt, calls the generateContent endpoint and runs
//! the reply through the fenced-block extraction and schema validation in
//! the core crate. Transport and provider failures map to
//! [`ContentError::Generation`]; schema failures pass through unchanged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use portfolio_forge_core::content::{parse_model_response, PortfolioContent};
use portfolio_forge_core::contract::ContentFormatter;
use portfolio_forge_core::error::ContentError;

use crate::config::GeminiConfig;
use crate::prompt::developer_prompt;

const API_BASE: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiFormatter {
    http: Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CandidatePart {
    text: String,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any.
    fn first_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiFormatter {
    pub fn new(config: &GeminiConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl ContentFormatter for GeminiFormatter {
    async fn format(&self, raw: &serde_json::Value) -> Result<PortfolioContent, ContentError> {
        let prompt = developer_prompt(raw);
        let url = format!(
            "{API_BASE}/v1beta/models/{}:generateContent",
            self.model
        );
        debug!(model = %self.model, "Sending content-formatting request");

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ContentError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(%status, "Generative API returned an error");
            return Err(ContentError::Generation(format!("{status} - {text}")));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ContentError::Generation(e.to_string()))?;
        let text = reply.first_text().ok_or_else(|| {
            ContentError::Generation("response carried no candidate text".to_string())
        })?;

        parse_model_response(&text)
    }
}
