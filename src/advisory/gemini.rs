//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

use super::TextGenerator;
use crate::config::GeminiConfig;
use crate::{AqiError, Result};

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
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
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| AqiError::config(format!("Failed to create Gemini client: {e}")))?;

        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AqiError::config("Gemini API key is not set"))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            api_key,
        })
    }
}

/// Concatenated text of the first candidate
fn first_candidate_text(response: GenerateResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip_all)]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AqiError::generation(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AqiError::generation(format!("Gemini returned {status}")));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AqiError::generation(format!("Malformed Gemini response: {}", e.without_url())))?;

        let text = first_candidate_text(body)
            .ok_or_else(|| AqiError::generation("Gemini response contained no text"))?;

        info!("Generated advisory in {:.3}s", start.elapsed().as_secs_f64());
        Ok(text)
    }
}
