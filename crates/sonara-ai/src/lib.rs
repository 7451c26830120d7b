//! sonara-ai
//!
//! Completion providers behind the core [`CompletionClient`] seam: an AWS
//! Bedrock Converse adapter and a local Ollama adapter, with per-call token
//! usage and cost accounting. Engines never know which provider serves
//! them; the factory builds clients from configuration.

pub mod providers;
pub mod tokens;

pub use providers::{ProviderConfig, create_client};
