//! Generation Fanout (C5): invokes every configured provider for one
//! operation in parallel. A failing provider is recorded, not propagated —
//! peers must complete regardless of one provider's failure.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use oaschecker_providers::LlmProvider;
use oaschecker_spec::Operation;

use crate::types::{GenerationRecord, TokenAccounting};

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs `prompt` against every provider concurrently and returns one record
/// per provider, in the same order `providers` was declared regardless of
/// completion order.
pub async fn generate_for_operation(
    operation: &Operation,
    prompt: &str,
    providers: &[Arc<dyn LlmProvider>],
    timeout: Duration,
) -> Vec<GenerationRecord> {
    let mut handles = Vec::with_capacity(providers.len());
    for provider in providers {
        let provider = Arc::clone(provider);
        let prompt = prompt.to_string();
        let operation_id = operation.operation_id.clone();
        handles.push(tokio::spawn(async move {
            invoke_one(&operation_id, provider, prompt, timeout).await
        }));
    }

    let mut records = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(record) => records.push(record),
            Err(join_err) => records.push(GenerationRecord::failed(
                "unknown",
                String::new(),
                format!("generation task panicked: {join_err}"),
                Duration::ZERO,
            )),
        }
    }
    records
}

async fn invoke_one(
    operation_id: &str,
    provider: Arc<dyn LlmProvider>,
    prompt: String,
    timeout: Duration,
) -> GenerationRecord {
    let started = Instant::now();
    match provider.generate(&prompt, timeout).await {
        Ok(outcome) => {
            tracing::debug!(operation_id, provider = provider.id(), "generation succeeded");
            GenerationRecord {
                provider: provider.id().to_string(),
                prompt,
                source_code: outcome.text,
                tokens: TokenAccounting {
                    input: outcome.usage.input,
                    output: outcome.usage.output,
                    total: outcome.usage.total,
                },
                duration: started.elapsed(),
                metadata: {
                    let mut metadata = outcome.extensions;
                    if outcome.usage.tokens_unavailable {
                        metadata.insert("tokens_unavailable".to_string(), serde_json::Value::Bool(true));
                    }
                    metadata
                },
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!(operation_id, provider = provider.id(), error = %err, "generation failed");
            GenerationRecord::failed(provider.id(), prompt, err.to_string(), started.elapsed())
        }
    }
}

/// A per-provider concurrency cap shared across operations, as required by
/// the fanout's scheduling rules (default 4, configurable).
pub struct ProviderConcurrency {
    limits: HashMap<String, Arc<tokio::sync::Semaphore>>,
    default_permits: usize,
}

impl ProviderConcurrency {
    #[must_use]
    pub fn new(default_permits: usize) -> Self {
        Self { limits: HashMap::new(), default_permits }
    }

    pub async fn acquire(&mut self, provider_id: &str) -> tokio::sync::OwnedSemaphorePermit {
        let semaphore = self
            .limits
            .entry(provider_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Semaphore::new(self.default_permits)))
            .clone();
        semaphore.acquire_owned().await.expect("semaphore is never closed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use oaschecker_providers::{GenerationOutcome, LlmError, TokenUsage};
    use oaschecker_spec::Operation;
    use std::collections::BTreeMap;

    struct AlwaysFails;
    #[async_trait]
    impl LlmProvider for AlwaysFails {
        fn id(&self) -> &str {
            "flaky"
        }
        async fn generate(&self, _prompt: &str, _timeout: Duration) -> Result<GenerationOutcome, LlmError> {
            Err(LlmError::Request { provider: "flaky".to_string(), reason: "boom".to_string() })
        }
    }

    struct AlwaysSucceeds;
    #[async_trait]
    impl LlmProvider for AlwaysSucceeds {
        fn id(&self) -> &str {
            "reliable"
        }
        async fn generate(&self, _prompt: &str, _timeout: Duration) -> Result<GenerationOutcome, LlmError> {
            Ok(GenerationOutcome::new("fn test() {}", TokenUsage { input: 1, output: 1, total: 2, tokens_unavailable: false }))
        }
    }

    fn op() -> Operation {
        Operation {
            operation_id: "GET_pets".to_string(),
            method: "GET".to_string(),
            path: "/pets".to_string(),
            summary: None,
            description: None,
            parameters: Vec::new(),
            request_body: BTreeMap::new(),
            responses: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn one_failing_provider_does_not_abort_peers() {
        let providers: Vec<Arc<dyn LlmProvider>> = vec![Arc::new(AlwaysFails), Arc::new(AlwaysSucceeds)];
        let records = generate_for_operation(&op(), "prompt", &providers, Duration::from_secs(1)).await;
        assert_eq!(records.len(), 2);
        assert!(!records[0].succeeded());
        assert!(records[1].succeeded());
    }
}
