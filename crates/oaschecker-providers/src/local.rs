//! Local capability: an OpenAI-compatible chat-completions endpoint served
//! on the operator's machine (e.g. an Ollama or llama.cpp server). No API
//! key is required; the base URL comes from `OASCHECKER_LOCAL_ENDPOINT`,
//! defaulting to `http://localhost:11434/v1/chat/completions`.

use async_trait::async_trait;
use serde_json::json;
use std::env;
use std::time::Duration;

use crate::error::LlmError;
use crate::types::{GenerationOutcome, LlmProvider, TokenUsage};

const DEFAULT_ENDPOINT: &str = "http://localhost:11434/v1/chat/completions";

pub struct LocalProvider {
    id: String,
    model: String,
    endpoint: String,
    client: reqwest::Client,
}

impl LocalProvider {
    #[must_use]
    pub fn new(model: &str) -> Self {
        let endpoint = env::var("OASCHECKER_LOCAL_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let id = if model == "default" { "local-default".to_string() } else { format!("local:{model}") };
        Self { id, model: model.to_string(), endpoint, client: reqwest::Client::new() }
    }
}

#[async_trait]
impl LlmProvider for LocalProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn generate(&self, prompt: &str, timeout: Duration) -> Result<GenerationOutcome, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "model": self.model,
                "messages": [{"role": "user", "content": prompt}],
            }))
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    LlmError::Timeout { provider: self.id.clone(), timeout_seconds: timeout.as_secs() }
                } else {
                    LlmError::Request { provider: self.id.clone(), reason: err.to_string() }
                }
            })?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| LlmError::MalformedResponse { provider: self.id.clone(), reason: err.to_string() })?;

        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::MalformedResponse {
                provider: self.id.clone(),
                reason: "missing choices[0].message.content".to_string(),
            })?
            .to_string();

        // Local servers routinely omit usage accounting.
        let usage = TokenUsage {
            input: body["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
            output: body["usage"]["completion_tokens"].as_u64().unwrap_or(0),
            total: body["usage"]["total_tokens"].as_u64().unwrap_or(0),
            tokens_unavailable: body["usage"].is_null(),
        };

        Ok(GenerationOutcome::new(text, usage))
    }
}
