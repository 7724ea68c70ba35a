//! Core types for the `LLMProvider` contract (`spec.md` §6).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::LlmError;

/// Token accounting for one generation. `input`/`output`/`total` are zero,
/// and `tokens_unavailable` is set, when the provider doesn't report usage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
    pub total: u64,
    pub tokens_unavailable: bool,
}

/// The `LLMProvider` contract: `Generate(ctx, prompt) -> (text, tokens_in, tokens_out, meta)`.
/// Implementations must respect cancellation via `timeout` and MUST NOT
/// retry transparently — retry policy belongs to Generation Fanout (C5).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Stable identifier this provider was registered under (e.g. `"openai"`,
    /// `"local:llama3"`, `"mock"`).
    fn id(&self) -> &str;

    async fn generate(&self, prompt: &str, timeout: Duration) -> Result<GenerationOutcome, LlmError>;
}

/// Successful output of one `LLMProvider::generate` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub text: String,
    pub usage: TokenUsage,
    pub extensions: HashMap<String, serde_json::Value>,
}

impl GenerationOutcome {
    #[must_use]
    pub fn new(text: impl Into<String>, usage: TokenUsage) -> Self {
        Self { text: text.into(), usage, extensions: HashMap::new() }
    }
}
