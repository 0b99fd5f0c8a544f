use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::NerConfig;

/// Reply from a model that accepted the request.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    Text(String),
    /// Nothing to read, e.g. a safety block. `reason` is the finish reason.
    NoText { reason: String },
}

impl From<&str> for Generation {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Anything that can turn a prompt into JSON text with a named model.
///
/// `Err` means the model could not be used (transport, status, API error)
/// and the next model should be tried. A reply without text is still `Ok`.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<Generation>;
}

#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String, // "application/json" for structured output
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

impl GeminiClient {
    pub fn new(config: &NerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<Generation> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(), // Force JSON output
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini request failed: {} {}", status, body);
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        response_generation(gemini_response)
    }
}

/// Concatenated text of the first candidate, like the SDK's `response.text`.
/// Only an `error` object fails; a blocked or empty candidate is `NoText`.
fn response_generation(response: GeminiResponse) -> Result<Generation> {
    if let Some(error) = response.error {
        anyhow::bail!("Gemini API error: {}", error.message);
    }

    let Some(candidate) = response.candidates.and_then(|c| c.into_iter().next()) else {
        return Ok(Generation::NoText {
            reason: "no candidates".to_string(),
        });
    };

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    let text: String = parts.into_iter().filter_map(|p| p.text).collect();

    if text.is_empty() {
        return Ok(Generation::NoText {
            reason: candidate.finish_reason.unwrap_or_else(|| "unknown".to_string()),
        });
    }
    Ok(Generation::Text(text))
}
