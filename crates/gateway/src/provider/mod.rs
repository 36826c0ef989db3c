//! Inference provider adapters.
//!
//! [`Backend`] is the seam between the gateway and a concrete provider API;
//! [`ModelClient`] sits on top of it and is the system's sole
//! error-normalization point.

mod hf;

pub use hf::{DEFAULT_PROVIDER, HfBackend, HfBackendBuilder};

use std::future::Future;

use thiserror::Error;

use crate::tool::ToolResult;

/// Errors from provider calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network: {0}")]
    Network(String),
    #[error("provider api: {0}")]
    Api(String),
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Trait for inference backends.
///
/// `complete` issues exactly one outbound call and returns the completion
/// text. No retries, no reinterpretation of the prompt.
pub trait Backend: Send + Sync {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

/// Adapter wrapping a [`Backend`] behind the tool's result type.
///
/// Every provider failure is converted to [`ToolResult::Failure`] here; a
/// raw error never crosses this boundary, so callers can treat `invoke` as
/// infallible.
pub struct ModelClient<B> {
    backend: B,
}

impl<B: Backend> ModelClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Ask the model one question. Always returns a [`ToolResult`].
    pub async fn invoke(&self, prompt: &str) -> ToolResult {
        match self.backend.complete(prompt).await {
            Ok(text) => ToolResult::Success { text },
            Err(e) => {
                tracing::warn!(error = %e, "provider call failed");
                ToolResult::Failure {
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoBackend;

    impl Backend for EchoBackend {
        async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    struct ApiErrorBackend;

    impl Backend for ApiErrorBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Api("429 Too Many Requests".into()))
        }
    }

    #[tokio::test]
    async fn invoke_wraps_completion_text() {
        let client = ModelClient::new(EchoBackend);
        let result = client.invoke("hi").await;
        assert_eq!(
            result,
            ToolResult::Success {
                text: "echo: hi".into()
            }
        );
    }

    #[tokio::test]
    async fn invoke_normalizes_errors_to_failure() {
        let client = ModelClient::new(ApiErrorBackend);
        match client.invoke("hi").await {
            ToolResult::Failure { message } => {
                assert!(message.contains("429"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
