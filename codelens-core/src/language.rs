//! Languages offered by the review form and code-fence formatting

use serde::{Deserialize, Serialize};

/// A language from the fixed list the web client offers
///
/// The endpoints accept any non-empty label; this list only exists so callers
/// can tell a listed language from a free-form one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    #[serde(rename = "C++")]
    Cpp,
    Go,
    Rust,
    Ruby,
    #[serde(rename = "PHP")]
    Php,
    #[serde(rename = "C#")]
    CSharp,
}

impl Language {
    /// All listed languages, in the order the form shows them
    pub const ALL: [Language; 10] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::Cpp,
        Language::Go,
        Language::Rust,
        Language::Ruby,
        Language::Php,
        Language::CSharp,
    ];

    /// Display label, stored verbatim with each review
    pub fn label(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::CSharp => "C#",
        }
    }

    /// Look up a listed language by its exact display label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.label() == label)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Wrap code in a markdown fence tagged with the lowercased language label
pub fn fenced_code(language: &str, code: &str) -> String {
    format!("```{}\n{}\n```", language.to_lowercase(), code)
}
