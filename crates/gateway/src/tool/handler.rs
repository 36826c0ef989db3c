//! Tool invocation handler.

use crate::provider::{Backend, ModelClient};

use super::{ToolRequest, ToolResult};

/// The shared invocation path both transport bindings call into.
///
/// Currently a pass-through to the model client; kept as a distinct layer so
/// cross-cutting behavior (timing, additional tools) has a single insertion
/// point instead of one per transport.
pub struct QueryHandler<B> {
    client: ModelClient<B>,
}

impl<B: Backend> QueryHandler<B> {
    pub fn new(client: ModelClient<B>) -> Self {
        Self { client }
    }

    /// Run the query tool. Always yields a [`ToolResult`]; provider failures
    /// arrive here already normalized into the `Failure` variant.
    pub async fn handle(&self, request: ToolRequest) -> ToolResult {
        let result = self.client.invoke(&request.prompt).await;
        tracing::debug!(failure = result.is_failure(), "query tool invoked");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;

    struct FixedBackend(&'static str);

    impl Backend for FixedBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingBackend;

    impl Backend for FailingBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Network("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn handle_passes_through_success() {
        let handler = QueryHandler::new(ModelClient::new(FixedBackend("4")));
        let result = handler
            .handle(ToolRequest {
                prompt: "2+2".into(),
            })
            .await;
        assert_eq!(result, ToolResult::Success { text: "4".into() });
    }

    #[tokio::test]
    async fn handle_never_errors_on_provider_failure() {
        let handler = QueryHandler::new(ModelClient::new(FailingBackend));
        let result = handler.handle(ToolRequest { prompt: "hi".into() }).await;
        match result {
            ToolResult::Failure { message } => assert!(!message.is_empty()),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_prompt_is_passed_to_the_provider() {
        let handler = QueryHandler::new(ModelClient::new(FixedBackend("hello")));
        let result = handler.handle(ToolRequest { prompt: String::new() }).await;
        assert!(!result.is_failure());
    }
}
