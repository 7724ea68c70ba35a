//! `OperationResult` and `Report` (`spec.md` §3).

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use oaschecker_gate::Outcome;
use oaschecker_generate::GenerationRecord;
use oaschecker_harness::HarnessResult;
use oaschecker_spec::Operation;
use oaschecker_tracker::IssueHandle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRunRecord {
    pub generation: GenerationRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harness: Option<HarnessResultView>,
    pub outcome: Outcome,
}

/// A serde-friendly mirror of [`HarnessResult`] (which carries a `Duration`
/// via a private millis codec already, so this just re-exposes the fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessResultView {
    pub raw_output: String,
    pub elapsed_ms: u64,
    pub sub_test_count: u32,
}

impl From<&HarnessResult> for HarnessResultView {
    fn from(result: &HarnessResult) -> Self {
        Self {
            raw_output: result.raw_output.clone(),
            elapsed_ms: result.elapsed.as_millis() as u64,
            sub_test_count: result.counts.total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    pub operation: Operation,
    /// `(provider id, record)` pairs in the caller's declared provider
    /// order — a `HashMap` here would make JSON re-emission nondeterministic
    /// and break the declared-order guarantee (`spec.md` §5).
    pub by_provider: Vec<(String, ProviderRunRecord)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_handle: Option<IssueHandle>,
}

impl OperationResult {
    #[must_use]
    pub fn has_contract_failure(&self) -> bool {
        self.by_provider.iter().any(|(_, r)| r.outcome.is_contract_failure())
    }

    /// An operation that was never started because a cancellation request
    /// arrived before its turn — every provider is recorded as `NotRun`.
    #[must_use]
    pub fn not_run(operation: Operation, provider_ids: &[String]) -> Self {
        let by_provider = provider_ids
            .iter()
            .map(|id| {
                let generation =
                    GenerationRecord::failed(id.clone(), String::new(), "cancelled before start".to_string(), Duration::ZERO);
                (id.clone(), ProviderRunRecord { generation, harness: None, outcome: Outcome::NotRun })
            })
            .collect();
        Self { operation, by_provider, issue_handle: None }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderAggregate {
    pub provider: String,
    pub generated: u32,
    pub passed: u32,
    pub failed: u32,
    pub total_tokens: u64,
    pub average_duration_ms: u64,
    pub success_rate: f64,
    pub quality: f64,
    pub coverage: f64,
    pub composite_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ranking {
    pub criterion: String,
    /// provider ids, best first; ties broken lexicographically.
    pub order: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub title: String,
    pub spec_version: String,
    pub operations: Vec<OperationResult>,
    pub provider_aggregates: Vec<ProviderAggregate>,
    pub rankings: Vec<Ranking>,
    /// Narrative, human-readable recommendations derived from the
    /// aggregates and rankings above.
    pub recommendations: Vec<String>,
    pub health_score: f64,
    pub generated_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}
