//! The static `queryModel` contract.

use serde_json::json;

use super::ToolSpec;

/// Name the tool is registered under on every transport.
pub const QUERY_TOOL_NAME: &str = "queryModel";

/// Build the `queryModel` tool contract.
///
/// Constructed once at composition time and shared read-only by the
/// transport bindings. The schema requires a single string `prompt`;
/// provider and model selection are fixed configuration, deliberately not
/// part of the contract.
pub fn query_model() -> ToolSpec {
    ToolSpec {
        name: QUERY_TOOL_NAME.to_string(),
        description: "Ask the configured language model a question and return its answer"
            .to_string(),
        schema: json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "Your question to the model"
                }
            },
            "required": ["prompt"]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_shape() {
        let spec = query_model();
        assert_eq!(spec.name, "queryModel");
        assert_eq!(spec.schema["properties"]["prompt"]["type"], "string");
        assert_eq!(spec.schema["required"][0], "prompt");
    }
}
