//! MCP session transport binding.
//!
//! Registers the `queryModel` contract with an [`McpServer`] and adapts the
//! shared handler's result into the protocol envelope: one text content
//! block carrying the same `{"result"}` / `{"error"}` payload the HTTP
//! binding returns, with the protocol's `isError` flag set on failure.

use std::sync::Arc;

use serde_json::{Value, json};

use gateway::{Backend, QueryHandler, ToolRequest, ToolResult, query_model};
use mcp::{CallToolResult, McpServer, Tool};

pub const SERVER_NAME: &str = "modelgate";

/// Build an MCP server with the query tool registered against `handler`.
pub fn build_server<B>(handler: Arc<QueryHandler<B>>) -> Result<McpServer, mcp::Error>
where
    B: Backend + 'static,
{
    let spec = query_model();
    let tool = Tool {
        name: spec.name,
        description: Some(spec.description),
        input_schema: spec.schema,
    };

    let mut server = McpServer::new(SERVER_NAME, env!("CARGO_PKG_VERSION"));
    server.register_tool(tool, move |args| {
        let handler = handler.clone();
        async move { run_query(&handler, args).await }
    })?;
    Ok(server)
}

/// This binding's serialization of a tool result.
fn envelope(result: &ToolResult) -> Value {
    match result {
        ToolResult::Success { text } => json!({ "result": text }),
        ToolResult::Failure { message } => json!({ "error": message }),
    }
}

async fn run_query<B: Backend>(handler: &QueryHandler<B>, args: Value) -> CallToolResult {
    // The session layer validated `prompt` against the schema already.
    let prompt = args
        .get("prompt")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let result = handler.handle(ToolRequest { prompt }).await;
    let payload = envelope(&result).to_string();

    if result.is_failure() {
        CallToolResult::error_text(payload)
    } else {
        CallToolResult::text(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway::{ModelClient, ProviderError};
    use mcp::{JsonRpcRequest, RequestId};

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

    fn handler<B: Backend>(backend: B) -> Arc<QueryHandler<B>> {
        Arc::new(QueryHandler::new(ModelClient::new(backend)))
    }

    fn call_query(prompt: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".into(),
            id: Some(RequestId::Number(1)),
            method: "tools/call".into(),
            params: Some(json!({
                "name": "queryModel",
                "arguments": { "prompt": prompt }
            })),
        }
    }

    /// Parse the single text content block out of a tools/call result.
    fn content_payload(result: &Value) -> Value {
        let content = result["content"].as_array().unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0]["type"], "text");
        serde_json::from_str(content[0]["text"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn query_tool_is_listed() {
        let server = build_server(handler(FixedBackend("ok"))).unwrap();
        let tools = server.tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "queryModel");
        assert_eq!(tools[0].input_schema["required"][0], "prompt");
    }

    #[tokio::test]
    async fn call_returns_result_payload_in_text_block() {
        let server = build_server(handler(FixedBackend("4"))).unwrap();
        let response = server
            .handle_request(call_query(json!("2+2")))
            .await
            .unwrap();
        let result = response.result.unwrap();
        let payload = content_payload(&result);
        assert_eq!(payload, json!({"result": "4"}));
        assert!(result.get("isError").is_none());
    }

    #[tokio::test]
    async fn failing_provider_yields_error_payload_and_is_error_flag() {
        let server = build_server(handler(FailingBackend)).unwrap();
        let response = server
            .handle_request(call_query(json!("hi")))
            .await
            .unwrap();
        let result = response.result.unwrap();
        let payload = content_payload(&result);
        assert!(payload.get("error").is_some());
        assert!(payload.get("result").is_none());
        assert_eq!(result["isError"], true);
    }

    #[tokio::test]
    async fn non_string_prompt_is_rejected_by_the_session_layer() {
        let server = build_server(handler(FixedBackend("unreachable"))).unwrap();
        let response = server
            .handle_request(call_query(json!(42)))
            .await
            .unwrap();
        assert!(response.error.is_some());
        assert!(response.result.is_none());
    }

    #[tokio::test]
    async fn both_bindings_shape_the_same_payload() {
        for result in [
            ToolResult::Success { text: "4".into() },
            ToolResult::Failure {
                message: "connection refused".into(),
            },
        ] {
            assert_eq!(envelope(&result), crate::http::envelope(&result));
        }
    }
}
