//! Mock capability: deterministic providers for tests and offline runs.
//! `mock` returns a trivial fixed body; `mock-rich` echoes the prompt back
//! with populated token counts and an extension field, useful for exercising
//! downstream consumers of [`GenerationOutcome::extensions`].

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::error::LlmError;
use crate::types::{GenerationOutcome, LlmProvider, TokenUsage};

pub struct MockProvider {
    id: &'static str,
    rich: bool,
}

impl MockProvider {
    #[must_use]
    pub fn new(id: &'static str) -> Self {
        Self { id, rich: id == "mock-rich" }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn id(&self) -> &str {
        self.id
    }

    async fn generate(&self, prompt: &str, _timeout: Duration) -> Result<GenerationOutcome, LlmError> {
        if !self.rich {
            return Ok(GenerationOutcome::new(
                "fn handler() { /* generated test stub */ }".to_string(),
                TokenUsage { tokens_unavailable: true, ..TokenUsage::default() },
            ));
        }

        let text = format!("// generated against prompt of {} bytes\n{}", prompt.len(), prompt);
        let usage = TokenUsage {
            input: prompt.len() as u64 / 4,
            output: text.len() as u64 / 4,
            total: (prompt.len() + text.len()) as u64 / 4,
            tokens_unavailable: false,
        };
        let mut outcome = GenerationOutcome::new(text, usage);
        outcome.extensions.insert("mock".to_string(), json!({"echoed": true}));
        Ok(outcome)
    }
}
