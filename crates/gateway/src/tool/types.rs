//! Tool-related types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated request to the query tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRequest {
    pub prompt: String,
}

/// The outcome of one tool invocation.
///
/// Exactly one variant is ever produced per request; the adapter constructs
/// it fresh and the bindings consume it immediately. Transport envelopes are
/// derived from this value, never the other way around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResult {
    Success { text: String },
    Failure { message: String },
}

impl ToolResult {
    /// Whether this is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// A tool definition exposed to callers, transport-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema for input parameters.
    pub schema: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_variants() {
        let ok = ToolResult::Success { text: "4".into() };
        assert!(!ok.is_failure());

        let err = ToolResult::Failure {
            message: "network down".into(),
        };
        assert!(err.is_failure());
    }

    #[test]
    fn result_serializes_tagged() {
        let ok = ToolResult::Success { text: "4".into() };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["text"], "4");
    }
}
