//! OpenAI-compatible chat completions backend
//!
//! Covers OpenAI itself and every provider that speaks the same protocol:
//! Azure, GitHub Models, DeepSeek, Sherpa and local servers (Ollama,
//! GPT4All, LM Studio, ...).

use super::kind::ProviderKind;
use super::{ProviderSetupError, map_transport_error};
use armykit_application::{ThinkCapability, ThinkError};
use armykit_domain::AgentIdentity;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub struct OpenAiCompatibleCapability {
    client: reqwest::Client,
    kind: ProviderKind,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ReplyMessage,
}

/// Assistant message in a reply. `content` may be `null`.
#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

impl OpenAiCompatibleCapability {
    pub fn new(
        kind: ProviderKind,
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
            kind,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.bearer_auth(&self.api_key);
        self.kind
            .extra_headers()
            .into_iter()
            .fold(request, |request, (name, value)| request.header(name, value))
    }

    async fn fetch_models(&self) -> Result<Vec<String>, ThinkError> {
        let response = self
            .authorized(self.client.get(self.models_url()))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, body, &self.model));
        }

        let list: ModelList = response
            .json()
            .await
            .map_err(|e| ThinkError::InvalidResponse(e.to_string()))?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }
}

/// Translate a non-success HTTP status into a [`ThinkError`].
pub(crate) fn map_status(status: StatusCode, body: String, model: &str) -> ThinkError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ThinkError::Authentication(body),
        StatusCode::TOO_MANY_REQUESTS => ThinkError::RateLimited,
        StatusCode::NOT_FOUND => ThinkError::ModelNotAvailable(model.to_string()),
        _ => ThinkError::RequestFailed(format!("HTTP {}: {}", status, body)),
    }
}

fn first_choice(response: ChatResponse) -> Result<String, ThinkError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| ThinkError::InvalidResponse("No response from model".to_string()))
}

#[async_trait]
impl ThinkCapability for OpenAiCompatibleCapability {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, identity: &AgentIdentity, prompt: &str) -> Result<String, ThinkError> {
        debug!(
            "{} -> {} chat completion ({})",
            identity.name(),
            self.kind,
            self.model
        );

        let response = self
            .authorized(self.client.post(self.chat_url()))
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, body, &self.model));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ThinkError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        first_choice(body)
    }

    async fn available_models(&self) -> Result<Vec<String>, ThinkError> {
        if let Some(models) = self.kind.predefined_models() {
            return Ok(models.iter().map(|m| m.to_string()).collect());
        }
        if !self.kind.is_local() {
            return Ok(vec![self.model.clone()]);
        }

        match self.fetch_models().await {
            Ok(models) => Ok(models),
            Err(e) => {
                warn!("Could not list models from {}: {}", self.base_url, e);
                Ok(vec![self.model.clone()])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capability(kind: ProviderKind, base_url: &str) -> OpenAiCompatibleCapability {
        OpenAiCompatibleCapability::new(
            kind,
            base_url,
            "key",
            "gpt-4o-mini",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let backend = capability(ProviderKind::OpenAi, "https://api.openai.com/v1/");
        assert_eq!(
            backend.chat_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(backend.models_url(), "https://api.openai.com/v1/models");
    }

    #[test]
    fn test_request_is_a_single_user_message() {
        let backend = capability(ProviderKind::Deepseek, "https://api.deepseek.com/v1");
        let value =
            serde_json::to_value(backend.build_request("You are X, a Y. Do it")).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "You are X, a Y. Do it");
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_first_choice() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Valid."},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice(body).unwrap(), "Valid.");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_choice(empty),
            Err(ThinkError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_null_content_is_an_empty_reply() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice(body).unwrap(), "");

        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert_eq!(first_choice(body).unwrap(), "");
    }

    #[test]
    fn test_map_status() {
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, "bad key".into(), "m"),
            ThinkError::Authentication(body) if body == "bad key"
        ));
        assert_eq!(
            map_status(StatusCode::TOO_MANY_REQUESTS, String::new(), "m"),
            ThinkError::RateLimited
        );
        assert_eq!(
            map_status(StatusCode::NOT_FOUND, String::new(), "gpt-9"),
            ThinkError::ModelNotAvailable("gpt-9".to_string())
        );
        assert!(matches!(
            map_status(StatusCode::BAD_GATEWAY, "oops".into(), "m"),
            ThinkError::RequestFailed(msg) if msg.contains("502")
        ));
    }

    #[tokio::test]
    async fn test_hosted_providers_list_predefined_models() {
        let backend = capability(ProviderKind::Github, "https://models.inference.ai.azure.com");
        let models = backend.available_models().await.unwrap();
        assert_eq!(models.len(), 5);
        assert_eq!(models[0], "gpt-3.5-turbo");
        assert_eq!(models[4], "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_other_remote_providers_list_configured_model() {
        let backend = OpenAiCompatibleCapability::new(
            ProviderKind::Sherpa,
            "https://api.sherpacoder.com/v1",
            "key",
            "sherpa-coder",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            backend.available_models().await.unwrap(),
            vec!["sherpa-coder".to_string()]
        );
    }

    #[tokio::test]
    async fn test_local_listing_falls_back_to_configured_model() {
        // Port 9 (discard) refuses connections on test machines.
        let backend = capability(ProviderKind::Ollama, "http://127.0.0.1:9/v1");
        assert_eq!(
            backend.available_models().await.unwrap(),
            vec!["gpt-4o-mini".to_string()]
        );
    }
}
