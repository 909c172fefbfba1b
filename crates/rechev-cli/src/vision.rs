//! Google Cloud Vision text source for photographed plates.
//!
//! The engine treats OCR as an external collaborator; this is the one
//! provider the original deployment used. The request asks for both
//! plain and document text detection and takes the first annotation's
//! full-text description.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tracing::debug;

use rechev_core::error::SourceError;

const VISION_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

/// OCR text source backed by the Vision `images:annotate` endpoint.
pub struct VisionTextSource {
    client: reqwest::Client,
    api_key: String,
}

impl VisionTextSource {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Build a source from the configured environment variable.
    pub fn from_env(var: &str) -> Result<Self, SourceError> {
        let api_key = std::env::var(var)
            .map_err(|_| SourceError::Provider(format!("{var} not configured")))?;
        Ok(Self::new(api_key))
    }

    /// OCR `data` (JPEG/PNG/WebP bytes) into text.
    pub async fn extract_text(&self, data: &[u8]) -> Result<String, SourceError> {
        let body = json!({
            "requests": [{
                "image": { "content": STANDARD.encode(data) },
                "features": [
                    { "type": "TEXT_DETECTION", "maxResults": 50 },
                    { "type": "DOCUMENT_TEXT_DETECTION" }
                ]
            }]
        });

        let response = self
            .client
            .post(VISION_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| SourceError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(SourceError::Provider(format!("{status}: {detail}")));
        }

        let result: Value = response
            .json()
            .await
            .map_err(|e| SourceError::Provider(e.to_string()))?;

        let first = result
            .get("responses")
            .and_then(|r| r.get(0))
            .cloned()
            .unwrap_or(Value::Null);

        if let Some(error) = first.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error");
            return Err(SourceError::Provider(message.to_string()));
        }

        let text = first
            .get("textAnnotations")
            .and_then(|a| a.get(0))
            .and_then(|a| a.get("description"))
            .and_then(|d| d.as_str())
            .unwrap_or_default()
            .to_string();

        if text.trim().is_empty() {
            return Err(SourceError::NoText);
        }

        debug!(chars = text.len(), "Vision OCR returned text");
        Ok(text)
    }
}
