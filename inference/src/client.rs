//! Vision model client.
//!
//! One `generateContent` round trip per verification request: a single
//! user message holding the fixed prompt text and the inline image. The
//! backend sits behind [`VisionBackend`] so tests and alternative
//! deployments can substitute it.

use std::time::Duration;

use async_trait::async_trait;
use common::{VerifyError, VerifyResult};
use serde::{Deserialize, Serialize};

use crate::codec::EncodedImage;
use crate::prompt::INSPECTION_PROMPT;

/// Default Gemini REST endpoint.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default bound on one inference round trip.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Reply from the inference boundary.
///
/// The boundary is treated as unreliable: a well-formed envelope with no
/// text content is [`InferenceReply::Empty`], not an error and not a
/// sentinel string that a genuine reply could collide with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceReply {
    /// The service answered but returned no candidates, content, or text.
    Empty,
    /// The model's free-text reply.
    Text(String),
}

impl InferenceReply {
    /// The reply text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InferenceReply::Empty => None,
            InferenceReply::Text(t) => Some(t),
        }
    }
}

/// A multimodal inference backend that can inspect one image.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// One inspection round trip: fixed prompt plus encoded image in,
    /// raw reply out. Transport and envelope failures are
    /// [`VerifyError::Inference`]; an answer without content is
    /// [`InferenceReply::Empty`].
    async fn infer(&self, image: &EncodedImage) -> VerifyResult<InferenceReply>;
}

/// Configuration for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, sent via the `x-goog-api-key` header.
    pub api_key: String,
    /// Model name, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Endpoint base; overridable for tests and proxies.
    pub endpoint: String,
    /// Bound on one round trip.
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: GEMINI_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for the Gemini `generateContent` REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl VisionBackend for GeminiClient {
    async fn infer(&self, image: &EncodedImage) -> VerifyResult<InferenceReply> {
        let body = GenerateContentRequest::inspection(image);

        let response = self
            .http
            .post(self.request_url())
            .header("x-goog-api-key", &self.config.api_key)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| VerifyError::inference_transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "no error body".to_string());
            return Err(VerifyError::inference_status(
                status.as_u16(),
                format!("model '{}' returned {}: {}", self.config.model, status, detail),
            ));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::inference_transport(format!("malformed envelope: {e}")))?;

        let reply = extract_reply(envelope);
        tracing::debug!(
            model = %self.config.model,
            empty = reply.as_text().is_none(),
            "inference round trip complete"
        );
        Ok(reply)
    }
}

// --- wire types ---------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// The fixed inspection message: one prompt part and one image part.
    fn inspection(image: &EncodedImage) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    RequestPart::Text {
                        text: INSPECTION_PROMPT.to_string(),
                    },
                    RequestPart::InlineData {
                        inline_data: InlineBlob {
                            mime_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                ],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineBlob,
    },
}

#[derive(Debug, Serialize)]
struct InlineBlob {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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

/// First candidate, first content part, first text. Anything missing or
/// empty degrades softly to [`InferenceReply::Empty`].
fn extract_reply(envelope: GenerateContentResponse) -> InferenceReply {
    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.is_empty())
        .map(InferenceReply::Text)
        .unwrap_or(InferenceReply::Empty)
}
