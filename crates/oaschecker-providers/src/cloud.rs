//! Cloud capability: a single `reqwest`-backed chat-completion adapter
//! parameterized over the handful of wire shapes the well-known providers use.
//!
//! Credentials are read only from the environment variables named in
//! `spec.md` §6 — never from a config file or CLI flag.

use async_trait::async_trait;
use serde_json::json;
use std::env;
use std::time::Duration;

use crate::error::LlmError;
use crate::types::{GenerationOutcome, LlmProvider, TokenUsage};

/// The request/response shape a cloud endpoint expects. Google and Mistral
/// both speak an OpenAI-compatible chat-completions body, so they share
/// `OpenAiChat`.
#[derive(Debug, Clone, Copy)]
enum WireShape {
    OpenAiChat,
    AnthropicMessages,
}

struct CloudSpec {
    endpoint: &'static str,
    env_var: &'static str,
    model: &'static str,
    shape: WireShape,
}

fn spec_for(id: &str) -> Option<CloudSpec> {
    Some(match id {
        "openai" => CloudSpec {
            endpoint: "https://api.openai.com/v1/chat/completions",
            env_var: "OPENAI_API_KEY",
            model: "gpt-4o",
            shape: WireShape::OpenAiChat,
        },
        "openai-fast" => CloudSpec {
            endpoint: "https://api.openai.com/v1/chat/completions",
            env_var: "OPENAI_API_KEY",
            model: "gpt-4o-mini",
            shape: WireShape::OpenAiChat,
        },
        "anthropic-sonnet" => CloudSpec {
            endpoint: "https://api.anthropic.com/v1/messages",
            env_var: "ANTHROPIC_API_KEY",
            model: "claude-sonnet-4-5",
            shape: WireShape::AnthropicMessages,
        },
        "anthropic-haiku" => CloudSpec {
            endpoint: "https://api.anthropic.com/v1/messages",
            env_var: "ANTHROPIC_API_KEY",
            model: "claude-haiku-4-5",
            shape: WireShape::AnthropicMessages,
        },
        "google-flash" => CloudSpec {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
            env_var: "GOOGLE_API_KEY",
            model: "gemini-2.5-flash",
            shape: WireShape::OpenAiChat,
        },
        "google-pro" => CloudSpec {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
            env_var: "GOOGLE_API_KEY",
            model: "gemini-2.5-pro",
            shape: WireShape::OpenAiChat,
        },
        "mistral" => CloudSpec {
            endpoint: "https://api.mistral.ai/v1/chat/completions",
            env_var: "MISTRAL_API_KEY",
            model: "mistral-large-latest",
            shape: WireShape::OpenAiChat,
        },
        _ => return None,
    })
}

pub struct CloudProvider {
    id: String,
    spec: CloudSpec,
    api_key: String,
    client: reqwest::Client,
}

impl CloudProvider {
    /// Looks up the wire spec for `id` and resolves its credential from the
    /// environment. Fails eagerly, at registration time, if the env var is unset.
    pub fn new(id: &str) -> Result<Self, LlmError> {
        let spec = spec_for(id).ok_or_else(|| LlmError::Request {
            provider: id.to_string(),
            reason: "no cloud wiring registered for this identifier".to_string(),
        })?;
        let api_key = env::var(spec.env_var).map_err(|_| LlmError::CredentialsMissing {
            provider: id.to_string(),
            env_var: spec.env_var.to_string(),
        })?;
        Ok(Self { id: id.to_string(), spec, api_key, client: reqwest::Client::new() })
    }

    fn build_request(&self, prompt: &str) -> reqwest::RequestBuilder {
        match self.spec.shape {
            WireShape::OpenAiChat => self
                .client
                .post(self.spec.endpoint)
                .bearer_auth(&self.api_key)
                .json(&json!({
                    "model": self.spec.model,
                    "messages": [{"role": "user", "content": prompt}],
                })),
            WireShape::AnthropicMessages => self
                .client
                .post(self.spec.endpoint)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01")
                .json(&json!({
                    "model": self.spec.model,
                    "max_tokens": 4096,
                    "messages": [{"role": "user", "content": prompt}],
                })),
        }
    }

    fn parse_response(&self, body: &serde_json::Value) -> Result<GenerationOutcome, LlmError> {
        let malformed = |reason: &str| LlmError::MalformedResponse {
            provider: self.id.clone(),
            reason: reason.to_string(),
        };

        match self.spec.shape {
            WireShape::OpenAiChat => {
                let text = body["choices"][0]["message"]["content"]
                    .as_str()
                    .ok_or_else(|| malformed("missing choices[0].message.content"))?
                    .to_string();
                let usage = TokenUsage {
                    input: body["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
                    output: body["usage"]["completion_tokens"].as_u64().unwrap_or(0),
                    total: body["usage"]["total_tokens"].as_u64().unwrap_or(0),
                    tokens_unavailable: body["usage"].is_null(),
                };
                Ok(GenerationOutcome::new(text, usage))
            }
            WireShape::AnthropicMessages => {
                let text = body["content"][0]["text"]
                    .as_str()
                    .ok_or_else(|| malformed("missing content[0].text"))?
                    .to_string();
                let input = body["usage"]["input_tokens"].as_u64().unwrap_or(0);
                let output = body["usage"]["output_tokens"].as_u64().unwrap_or(0);
                let usage = TokenUsage {
                    input,
                    output,
                    total: input + output,
                    tokens_unavailable: body["usage"].is_null(),
                };
                Ok(GenerationOutcome::new(text, usage))
            }
        }
    }
}

#[async_trait]
impl LlmProvider for CloudProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn generate(&self, prompt: &str, timeout: Duration) -> Result<GenerationOutcome, LlmError> {
        let response = self
            .build_request(prompt)
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

        self.parse_response(&body)
    }
}
