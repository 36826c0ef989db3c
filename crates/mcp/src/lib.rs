//! MCP (Model Context Protocol) server library.
//!
//! This crate implements the server side of MCP over newline-delimited
//! JSON-RPC on stdio: a host registers schema-described tools with
//! callbacks, then hands the process's stdin/stdout to the session loop.
//! Inbound tool calls are validated against the registered schema before a
//! callback ever runs.
//!
//! # Example
//!
//! ```no_run
//! use mcp::{CallToolResult, McpServer, Tool};
//! use serde_json::json;
//!
//! # async fn example() -> mcp::Result<()> {
//! let mut server = McpServer::new("example", "1.0.0");
//!
//! server.register_tool(
//!     Tool {
//!         name: "echo".to_string(),
//!         description: Some("Echo the input back".to_string()),
//!         input_schema: json!({
//!             "type": "object",
//!             "properties": { "text": { "type": "string" } },
//!             "required": ["text"]
//!         }),
//!     },
//!     |args| async move {
//!         let text = args["text"].as_str().unwrap_or_default().to_string();
//!         CallToolResult::text(text)
//!     },
//! )?;
//!
//! server.serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod protocol;
mod server;

pub use error::{Error, Result};
pub use protocol::{
    CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ListToolsResult, PROTOCOL_VERSION, RequestId, ServerCapabilities, ServerInfo, Tool,
    ToolContent, ToolsCapability,
};
pub use server::{MAX_REQUEST_SIZE, McpServer};
