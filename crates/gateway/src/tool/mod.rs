//! The tool contract and invocation handler.

mod contract;
mod handler;
mod types;

pub use contract::{QUERY_TOOL_NAME, query_model};
pub use handler::QueryHandler;
pub use types::{ToolRequest, ToolResult, ToolSpec};
