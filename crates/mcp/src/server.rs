//! MCP session loop (tool registry, dispatch, stdio transport).

use std::future::Future;
use std::pin::Pin;

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::{Error, Result};
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, PROTOCOL_VERSION, ServerCapabilities, ServerInfo, Tool,
    ToolsCapability,
};

/// Maximum inbound request size (1MB).
pub const MAX_REQUEST_SIZE: usize = 1024 * 1024;

type BoxedCallFuture = Pin<Box<dyn Future<Output = CallToolResult> + Send>>;
type ToolCallback = Box<dyn Fn(Value) -> BoxedCallFuture + Send + Sync>;

struct RegisteredTool {
    tool: Tool,
    callback: ToolCallback,
}

/// An MCP server hosting a set of registered tools.
///
/// The session is long-lived per connecting client but carries no state
/// across tool calls; each call is dispatched independently.
pub struct McpServer {
    name: String,
    version: String,
    tools: Vec<RegisteredTool>,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            tools: Vec::new(),
        }
    }

    /// Register a tool and its callback.
    ///
    /// Arguments are validated against `tool.input_schema` before the
    /// callback runs, so the callback may assume required parameters are
    /// present with the declared types.
    pub fn register_tool<F, Fut>(&mut self, tool: Tool, callback: F) -> Result<()>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallToolResult> + Send + 'static,
    {
        if self.tools.iter().any(|t| t.tool.name == tool.name) {
            return Err(Error::DuplicateTool(tool.name));
        }
        self.tools.push(RegisteredTool {
            tool,
            callback: Box::new(move |args| Box::pin(callback(args))),
        });
        Ok(())
    }

    /// Registered tool definitions, in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.tool.clone()).collect()
    }

    /// Handle one raw inbound line. Returns `None` for notifications.
    ///
    /// Lines over [`MAX_REQUEST_SIZE`] are refused before parsing.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        if line.len() > MAX_REQUEST_SIZE {
            return Some(JsonRpcResponse::error(
                None,
                JsonRpcError::invalid_request(format!(
                    "request too large: {} bytes (max {MAX_REQUEST_SIZE})",
                    line.len()
                )),
            ));
        }

        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                None,
                JsonRpcError::parse_error(e.to_string()),
            )),
        }
    }

    /// Dispatch one parsed request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification received");
            return None;
        }
        // Checked above.
        let id = request.id?;

        let outcome = match request.method.as_str() {
            "initialize" => {
                tracing::info!("session initialized");
                serde_json::to_value(self.initialize_result())
                    .map_err(|e| JsonRpcError::internal(e.to_string()))
            }
            "ping" => Ok(json!({})),
            "tools/list" => serde_json::to_value(ListToolsResult { tools: self.tools() })
                .map_err(|e| JsonRpcError::internal(e.to_string())),
            "tools/call" => self.call_tool(request.params).await,
            method => Err(JsonRpcError::method_not_found(method)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(Some(id), error),
        })
    }

    /// Serve one session over the process's stdin/stdout.
    ///
    /// Protocol traffic owns stdout; anything else the process prints must
    /// go to stderr. Returns when the client closes its end.
    pub async fn serve_stdio(self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!(name = %self.name, "mcp session open");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(&line).await {
                let response_json = serde_json::to_string(&response)?;
                stdout.write_all(response_json.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("mcp session closed");
        Ok(())
    }

    // --- Internal methods ---

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
            },
            server_info: ServerInfo {
                name: self.name.clone(),
                version: self.version.clone(),
            },
        }
    }

    async fn call_tool(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params: CallToolParams =
            serde_json::from_value(params.unwrap_or(Value::Null))
                .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;

        let registered = self
            .tools
            .iter()
            .find(|t| t.tool.name == params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("unknown tool: {}", params.name)))?;

        let arguments = params.arguments.unwrap_or_else(|| json!({}));
        validate_arguments(&registered.tool.input_schema, &arguments)
            .map_err(JsonRpcError::invalid_params)?;

        let result = (registered.callback)(arguments).await;
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal(e.to_string()))
    }
}

/// Check tool arguments against the declared input schema.
///
/// Covers what the registered schemas actually use: required properties must
/// be present, and properties declared `"type": "string"` must be strings.
fn validate_arguments(schema: &Value, arguments: &Value) -> std::result::Result<(), String> {
    let Some(arguments) = arguments.as_object() else {
        return Err("arguments must be an object".to_string());
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if !arguments.contains_key(name) {
                return Err(format!("missing required parameter: {name}"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, property) in properties {
            let Some(value) = arguments.get(name) else {
                continue;
            };
            if property.get("type").and_then(Value::as_str) == Some("string")
                && !value.is_string()
            {
                return Err(format!("parameter {name} must be a string"));
            }
        }
    }

    Ok(())
}
