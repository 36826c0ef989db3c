//! Hugging Face router backend (OpenAI-compatible chat completions).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Backend, ProviderError};

const HF_ROUTER_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// Default inference provider routed to by Hugging Face.
pub const DEFAULT_PROVIDER: &str = "featherless-ai";

/// Default request timeout for the outbound call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ─────────────────────────────────────────────────────────────────────────────
// API Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn first_choice_text(response: ApiResponse) -> Result<String, ProviderError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("empty completion list".into()))?;

    choice
        .message
        .content
        .ok_or_else(|| ProviderError::InvalidResponse("completion has no text content".into()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend Implementation
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for creating a Hugging Face backend.
#[derive(Debug, Clone)]
pub struct HfBackendBuilder {
    token: String,
    model: String,
    provider: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl HfBackendBuilder {
    pub fn new(token: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            model: model.into(),
            provider: Some(DEFAULT_PROVIDER.to_string()),
            base_url: HF_ROUTER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Route to a specific inference provider, or `None` for router default.
    pub fn provider(mut self, provider: Option<String>) -> Self {
        self.provider = provider;
        self
    }

    /// Override the chat-completions endpoint (used in tests).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Bound the outbound call. A hung provider fails the request with a
    /// normal provider failure instead of blocking its task forever.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> HfBackend {
        HfBackend {
            client: reqwest::Client::new(),
            token: self.token,
            model: self.model,
            provider: self.provider,
            base_url: self.base_url,
            timeout: self.timeout,
        }
    }
}

/// Hugging Face router backend.
pub struct HfBackend {
    client: reqwest::Client,
    token: String,
    model: String,
    provider: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl HfBackend {
    pub fn builder(token: impl Into<String>, model: impl Into<String>) -> HfBackendBuilder {
        HfBackendBuilder::new(token, model)
    }
}

impl std::fmt::Display for HfBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let provider = self.provider.as_deref().unwrap_or("auto");
        write!(f, "huggingface({}, provider={provider})", self.model)
    }
}

impl Backend for HfBackend {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_request = ApiRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            provider: self.provider.clone(),
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .header("content-type", "application/json")
            .timeout(self.timeout)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!("{status}: {body}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        first_choice_text(api_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice_text() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "4"}},
                {"message": {"role": "assistant", "content": "four"}}
            ]
        }"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(first_choice_text(response).unwrap(), "4");
    }

    #[test]
    fn empty_choice_list_is_invalid() {
        let response: ApiResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let err = first_choice_text(response).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn missing_content_is_invalid() {
        let json = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        let err = first_choice_text(response).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn request_serializes_single_user_message() {
        let request = ApiRequest {
            model: "Qwen/Qwen3-14B".into(),
            messages: vec![ApiMessage {
                role: "user",
                content: "hello".into(),
            }],
            provider: Some(DEFAULT_PROVIDER.into()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["provider"], "featherless-ai");
    }

    #[test]
    fn backend_display() {
        let backend = HfBackend::builder("hf_test", "Qwen/Qwen3-14B").build();
        assert_eq!(
            backend.to_string(),
            "huggingface(Qwen/Qwen3-14B, provider=featherless-ai)"
        );
    }
}
