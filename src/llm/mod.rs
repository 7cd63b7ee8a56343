//! Azure OpenAI chat completions: used for keyword translation and article enrichment.

pub mod client;
pub mod json;
#[cfg(test)]
pub(crate) mod mock;
mod retry;
pub mod types;

pub use client::{AzureOpenAiClient, ChatClient, LlmError};
pub use types::{ChatRequest, Message};
