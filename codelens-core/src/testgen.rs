//! Test-case generation domain
//!
//! Test cases are transient: they are generated per request and returned to
//! the caller without being stored.

use serde::{Deserialize, Serialize};

use crate::language::fenced_code;

/// Kind of generated test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Unit,
    Edge,
    Integration,
    Boundary,
}

/// One generated test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub description: String,
    pub input: String,
    pub expected_output: String,
    #[serde(rename = "type")]
    pub kind: TestKind,
}

/// Arguments of a `generate_tests` tool call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    pub test_cases: Vec<TestCase>,
}

impl TestSuite {
    /// Test cases of a given kind
    pub fn of_kind(&self, kind: TestKind) -> impl Iterator<Item = &TestCase> {
        self.test_cases.iter().filter(move |t| t.kind == kind)
    }
}

/// A validated test-generation submission
#[derive(Debug, Clone)]
pub struct TestRequest {
    pub code: String,
    pub language: String,
}

impl TestRequest {
    /// Create a new test-generation request
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
        }
    }

    /// System message framing the test-engineer task
    pub fn system_prompt(&self) -> String {
        format!(
            "You are a test engineer. Generate comprehensive test cases for the given {} code. \
             Include unit tests, edge cases, boundary tests, and integration tests where applicable. \
             Use the generate_tests tool to return structured results.",
            self.language
        )
    }

    /// User message carrying the fenced code
    pub fn user_prompt(&self) -> String {
        format!(
            "Generate test cases for this {} code:\n\n{}",
            self.language,
            fenced_code(&self.language, &self.code)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_suite() {
        let suite: TestSuite = serde_json::from_value(json!({
            "test_cases": [
                {
                    "name": "divides evenly",
                    "description": "Happy path",
                    "input": "f(4)",
                    "expected_output": "1.0",
                    "type": "unit"
                },
                {
                    "name": "zero divisor",
                    "description": "Raises on zero",
                    "input": "f(0)",
                    "expected_output": "ZeroDivisionError",
                    "type": "edge"
                }
            ]
        }))
        .unwrap();

        assert_eq!(suite.test_cases.len(), 2);
        assert_eq!(suite.test_cases[1].kind, TestKind::Edge);
        assert_eq!(suite.of_kind(TestKind::Unit).count(), 1);
        assert_eq!(suite.of_kind(TestKind::Boundary).count(), 0);
    }

    #[test]
    fn test_all_fields_required() {
        let result: Result<TestCase, _> = serde_json::from_value(json!({
            "name": "missing expected",
            "description": "d",
            "input": "i",
            "type": "unit"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: Result<TestCase, _> = serde_json::from_value(json!({
            "name": "n",
            "description": "d",
            "input": "i",
            "expected_output": "o",
            "type": "smoke"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_prompts() {
        let request = TestRequest::new("func Add(a, b int) int { return a + b }", "Go");
        assert!(request.system_prompt().contains("given Go code"));
        assert!(request.system_prompt().contains("generate_tests"));
        assert_eq!(
            request.user_prompt(),
            "Generate test cases for this Go code:\n\n```go\nfunc Add(a, b int) int { return a + b }\n```"
        );
    }
}
