//! Outbound text generation.
//!
//! [`TextGenerator`] is the single capability the tutor needs: turn a system
//! instruction and a student message into text. [`GeminiClient`] implements
//! it against the Gemini `generateContent` REST endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::config::GeminiSettings;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to Gemini failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Gemini API returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("unexpected Gemini response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("prompt was blocked by Gemini: {0}")]
    Blocked(String),
    #[error("Gemini returned no text")]
    EmptyResponse,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instruction: &str, message: &str) -> Result<String, ProviderError>;
}

pub struct GeminiClient {
    settings: GeminiSettings,
    http: OnceCell<reqwest::Client>,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Self {
        Self {
            settings,
            http: OnceCell::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url, self.settings.model
        )
    }

    /// Builds the HTTP client on first use. Concurrent first callers wait on
    /// the same initialization and all observe one client.
    async fn http_client(&self) -> Result<&reqwest::Client, ProviderError> {
        self.http
            .get_or_try_init(|| async {
                debug!(model = %self.settings.model, "Configuring Gemini client");
                reqwest::Client::builder()
                    .user_agent(concat!("tutor-service/", env!("CARGO_PKG_VERSION")))
                    .build()
            })
            .await
            .map_err(ProviderError::Client)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, instruction: &str, message: &str) -> Result<String, ProviderError> {
        let client = self.http_client().await?;
        let payload = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: instruction }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: message }],
            }],
        };

        let response = client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(ProviderError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(ProviderError::Request)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| body.trim().to_string());
            warn!(%status, "Gemini request rejected");
            return Err(ProviderError::Status { status, message });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        parsed.into_text()
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, ProviderError> {
        let block_reason = self
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        match block_reason {
            Some(reason) => Err(ProviderError::Blocked(reason)),
            None => Err(ProviderError::EmptyResponse),
        }
    }
}
