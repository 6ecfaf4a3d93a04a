//! Chat-completion request and response types (OpenAI-compatible format)

use codelens_core::{ReviewRequest, TestRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::ToolSpec;
use crate::{Error, Result};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
struct Message<'a> {
    role: Role,
    content: &'a str,
}

/// A two-message conversation with one forced tool
///
/// Every gateway call in Codelens has this shape: a system message framing
/// the task, a user message with the fenced code, and the tool whose schema
/// is the output contract.
#[derive(Debug, Clone)]
pub struct ToolRequest {
    pub system: String,
    pub user: String,
    pub tool: ToolSpec,
}

impl ToolRequest {
    /// Create a tool request from explicit messages
    pub fn new(system: impl Into<String>, user: impl Into<String>, tool: ToolSpec) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            tool,
        }
    }

    /// Request for a `suggest_review` call
    pub fn review(request: &ReviewRequest) -> Self {
        Self::new(
            request.system_prompt(),
            request.user_prompt(),
            ToolSpec::suggest_review(),
        )
    }

    /// Request for a `generate_tests` call
    pub fn tests(request: &TestRequest) -> Self {
        Self::new(
            request.system_prompt(),
            request.user_prompt(),
            ToolSpec::generate_tests(),
        )
    }

    /// Serialize to the chat-completions request body
    pub(crate) fn to_body(&self, model: &str) -> Value {
        let messages = [
            Message {
                role: Role::System,
                content: &self.system,
            },
            Message {
                role: Role::User,
                content: &self.user,
            },
        ];

        serde_json::json!({
            "model": model,
            "messages": messages,
            "tools": [self.tool.definition()],
            "tool_choice": self.tool.forced_choice(),
        })
    }
}

/// Chat-completions response, reduced to what we read
#[derive(Debug, Deserialize)]
pub(crate) struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    function: ToolCall,
}

impl CompletionResponse {
    /// `choices[0].message.tool_calls[0].function`
    pub(crate) fn into_first_tool_call(self) -> Option<ToolCall> {
        self.choices
            .into_iter()
            .next()?
            .message
            .tool_calls?
            .into_iter()
            .next()
            .map(|call| call.function)
    }
}

/// A function call returned by the model
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCall {
    pub name: String,
    /// JSON-encoded arguments, as sent by the gateway
    pub arguments: String,
}

impl ToolCall {
    /// Decode the arguments into a typed payload
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.arguments).map_err(|e| {
            Error::MalformedUpstreamPayload(format!("{} arguments: {}", self.name, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codelens_core::TestSuite;
    use serde_json::json;

    #[test]
    fn test_body_shape() {
        let request = ToolRequest::review(&ReviewRequest::new("x = 1", "Python", "all"));
        let body = request.to_body("google/gemini-3-flash-preview");

        assert_eq!(body["model"], "google/gemini-3-flash-preview");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(
            body["messages"][1]["content"],
            "Review this Python code:\n\n```python\nx = 1\n```"
        );
        assert_eq!(body["tools"].as_array().unwrap().len(), 1);
        assert_eq!(body["tool_choice"]["function"]["name"], "suggest_review");
    }

    #[test]
    fn test_first_tool_call() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "generate_tests", "arguments": "{\"test_cases\":[]}" }
                    }]
                }
            }]
        }))
        .unwrap();

        let call = response.into_first_tool_call().unwrap();
        assert_eq!(call.name, "generate_tests");
        let suite: TestSuite = call.decode().unwrap();
        assert!(suite.test_cases.is_empty());
    }

    #[test]
    fn test_no_tool_call() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Sure!" } }]
        }))
        .unwrap();
        assert!(response.into_first_tool_call().is_none());

        let response: CompletionResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_first_tool_call().is_none());
    }

    #[test]
    fn test_decode_failure_is_malformed() {
        let call = ToolCall {
            name: "generate_tests".to_string(),
            arguments: "{not json".to_string(),
        };
        let err = call.decode::<TestSuite>().unwrap_err();
        assert!(matches!(err, Error::MalformedUpstreamPayload(_)));
    }
}
