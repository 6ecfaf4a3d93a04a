//! Codelens Core - Domain types and prompt construction for Codelens
//!
//! This crate holds everything the gateway, database and server crates agree
//! on: findings and test cases, review types, the supported language list,
//! the prompts sent to the language model, and configuration/secrets loading.

pub mod config;
pub mod error;
pub mod language;
pub mod review;
pub mod secrets;
pub mod testgen;

pub use config::{Config, DatabaseConfig, GatewayConfig, ServerConfig};
pub use error::{Error, Result};
pub use language::{fenced_code, Language};
pub use review::{
    Finding, FindingKind, FindingsDocument, ReviewPayload, ReviewRequest, ReviewType, Severity,
};
pub use secrets::Secrets;
pub use testgen::{TestCase, TestKind, TestRequest, TestSuite};
