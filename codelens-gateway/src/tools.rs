//! Tool definitions sent with each request
//!
//! The JSON schema in each definition is the output contract the model is
//! forced to fill. The typed payloads in `codelens-core` mirror these schemas.

use serde::Serialize;
use serde_json::{json, Value};

/// Name of the review tool
pub const SUGGEST_REVIEW: &str = "suggest_review";

/// Name of the test-generation tool
pub const GENERATE_TESTS: &str = "generate_tests";

/// A function tool the model is forced to call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

impl ToolSpec {
    /// Structured code review results
    pub fn suggest_review() -> Self {
        Self {
            name: SUGGEST_REVIEW,
            description: "Return structured code review results",
            parameters: json!({
                "type": "object",
                "properties": {
                    "findings": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "type": { "type": "string", "enum": ["bug", "security", "performance", "style"] },
                                "severity": { "type": "string", "enum": ["error", "warning", "info"] },
                                "line": { "type": "number" },
                                "message": { "type": "string" },
                                "suggestion": { "type": "string" }
                            },
                            "required": ["type", "severity", "message", "suggestion"],
                            "additionalProperties": false
                        }
                    },
                    "summary": { "type": "string" },
                    "score": { "type": "number" },
                    "rewritten_code": { "type": "string" }
                },
                "required": ["findings", "summary", "score", "rewritten_code"],
                "additionalProperties": false
            }),
        }
    }

    /// Structured test cases
    pub fn generate_tests() -> Self {
        Self {
            name: GENERATE_TESTS,
            description: "Return structured test cases",
            parameters: json!({
                "type": "object",
                "properties": {
                    "test_cases": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "description": { "type": "string" },
                                "input": { "type": "string" },
                                "expected_output": { "type": "string" },
                                "type": { "type": "string", "enum": ["unit", "edge", "integration", "boundary"] }
                            },
                            "required": ["name", "description", "input", "expected_output", "type"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["test_cases"],
                "additionalProperties": false
            }),
        }
    }

    /// `tools` array entry in OpenAI format
    pub(crate) fn definition(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }

    /// `tool_choice` value forcing this tool
    pub(crate) fn forced_choice(&self) -> Value {
        json!({
            "type": "function",
            "function": { "name": self.name }
        })
    }
}
