//! Code review domain
//!
//! A review request carries the submitted code, its language label and the
//! review type that picks the prompt focus. The model answers with a
//! [`ReviewPayload`] through the `suggest_review` tool.

pub mod finding;
pub mod request;

pub use finding::{Finding, FindingKind, FindingsDocument, ReviewPayload, Severity};
pub use request::{ReviewRequest, ReviewType};
