//! Codelens Gateway - Language-model gateway client for Codelens
//!
//! Sends OpenAI-style chat-completion requests with a single forced tool and
//! decodes the tool-call arguments into the typed payloads from
//! `codelens-core`.

mod chat;
mod client;
mod error;
mod tools;

pub use chat::{Role, ToolCall, ToolRequest};
pub use client::{generate_tests, suggest_review, ChatGateway, GatewayClient};
pub use error::{Error, Result};
pub use tools::{ToolSpec, GENERATE_TESTS, SUGGEST_REVIEW};
