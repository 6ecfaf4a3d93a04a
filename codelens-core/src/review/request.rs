//! Review request and prompt generation
//!
//! Builds the system and user messages sent to the language model for a
//! single review. The review type only changes the focus phrase; the output
//! contract is the same for every type.

use serde::{Deserialize, Serialize};

use crate::language::fenced_code;

/// The focus of a review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewType {
    /// Quality, security and performance together
    #[default]
    All,
    /// Code quality, bugs and style
    Quality,
    /// Security vulnerabilities
    Security,
    /// Performance bottlenecks
    Performance,
}

impl ReviewType {
    /// Parse a review-type label
    ///
    /// Unrecognised labels select the performance focus. The raw label is
    /// still what gets stored with the review.
    pub fn from_label(label: &str) -> Self {
        match label {
            "all" => ReviewType::All,
            "quality" => ReviewType::Quality,
            "security" => ReviewType::Security,
            _ => ReviewType::Performance,
        }
    }

    /// Wire label for this review type
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewType::All => "all",
            ReviewType::Quality => "quality",
            ReviewType::Security => "security",
            ReviewType::Performance => "performance",
        }
    }

    /// Focus phrase inserted into the system prompt
    pub fn focus(&self) -> &'static str {
        match self {
            ReviewType::All => "code quality, security vulnerabilities, and performance issues",
            ReviewType::Quality => "code quality, bugs, and style issues",
            ReviewType::Security => "security vulnerabilities and unsafe patterns",
            ReviewType::Performance => "performance bottlenecks and optimization opportunities",
        }
    }
}

impl std::fmt::Display for ReviewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated review submission
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    /// Submitted source code, verbatim
    pub code: String,
    /// Language display label, verbatim
    pub language: String,
    /// Review type label as submitted
    pub review_type: String,
}

impl ReviewRequest {
    /// Create a new review request
    pub fn new(
        code: impl Into<String>,
        language: impl Into<String>,
        review_type: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            review_type: review_type.into(),
        }
    }

    /// The focus selected by the submitted review type
    pub fn focus(&self) -> ReviewType {
        ReviewType::from_label(&self.review_type)
    }

    /// System message describing the reviewer role and the output contract
    pub fn system_prompt(&self) -> String {
        format!(
            "You are an expert code reviewer. Analyze the given {language} code focusing on {focus}.

Return a JSON response using the suggest_review tool with:
- findings: array of issues found, each with: type (bug|security|performance|style), severity (error|warning|info), line (number or null), message (what's wrong), suggestion (how to fix)
- summary: a 1-2 sentence overview of the code quality
- score: integer 0-100 rating the overall code quality
- rewritten_code: the improved/refactored version of the code

Be thorough but practical. Focus on real issues, not nitpicks.",
            language = self.language,
            focus = self.focus().focus(),
        )
    }

    /// User message carrying the fenced code
    pub fn user_prompt(&self) -> String {
        format!(
            "Review this {} code:\n\n{}",
            self.language,
            fenced_code(&self.language, &self.code)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_type_labels() {
        assert_eq!(ReviewType::from_label("all"), ReviewType::All);
        assert_eq!(ReviewType::from_label("quality"), ReviewType::Quality);
        assert_eq!(ReviewType::from_label("security"), ReviewType::Security);
        assert_eq!(ReviewType::from_label("performance"), ReviewType::Performance);
    }

    #[test]
    fn test_unknown_review_type_selects_performance() {
        assert_eq!(ReviewType::from_label("style"), ReviewType::Performance);
        assert_eq!(ReviewType::from_label(""), ReviewType::Performance);
        assert_eq!(ReviewType::from_label("ALL"), ReviewType::Performance);
    }

    #[test]
    fn test_all_has_combined_focus() {
        let focus = ReviewType::All.focus();
        assert!(focus.contains("code quality"));
        assert!(focus.contains("security"));
        assert!(focus.contains("performance"));
    }

    #[test]
    fn test_system_prompt_names_language_and_focus() {
        let request = ReviewRequest::new("x = 1", "Python", "security");
        let prompt = request.system_prompt();
        assert!(prompt.contains("Analyze the given Python code"));
        assert!(prompt.contains("security vulnerabilities and unsafe patterns"));
        assert!(prompt.contains("suggest_review"));
        assert!(prompt.contains("score: integer 0-100"));
    }

    #[test]
    fn test_user_prompt_fences_code() {
        let request = ReviewRequest::new("def f(x): return x/0", "Python", "all");
        assert_eq!(
            request.user_prompt(),
            "Review this Python code:\n\n```python\ndef f(x): return x/0\n```"
        );
    }

    #[test]
    fn test_focus_keeps_raw_label() {
        let request = ReviewRequest::new("fn main() {}", "Rust", "bogus");
        assert_eq!(request.focus(), ReviewType::Performance);
        assert_eq!(request.review_type, "bogus");
    }
}
