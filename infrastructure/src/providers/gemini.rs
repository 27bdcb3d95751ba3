//! Google Gemini `generateContent` backend

use super::kind::ProviderKind;
use super::openai_compatible::map_status;
use super::{ProviderSetupError, map_transport_error};
use armykit_application::{ThinkCapability, ThinkError};
use armykit_domain::AgentIdentity;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub struct GeminiCapability {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GeminiCapability {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderSetupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderSetupError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Concatenated text of the first candidate.
fn candidate_text(response: GenerateResponse) -> Result<String, ThinkError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ThinkError::InvalidResponse("No candidates in response".to_string()))?;

    Ok(candidate
        .content
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join(""))
}

#[async_trait]
impl ThinkCapability for GeminiCapability {
    fn name(&self) -> &str {
        ProviderKind::Google.as_str()
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, identity: &AgentIdentity, prompt: &str) -> Result<String, ThinkError> {
        debug!("{} -> google generateContent ({})", identity.name(), self.model);

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, body, &self.model));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ThinkError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        candidate_text(body)
    }
}
