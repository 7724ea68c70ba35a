//! Pipeline Orchestrator (C10): `Analyze(source, providers, filter, options) -> Report`.
//!
//! Drives C1..C9 end to end, owning filtering, concurrency bounds, and the
//! overall failure policy. Worker tasks publish completed per-operation
//! records to this task through a channel; no entity is shared by mutable
//! reference across a concurrency boundary.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

use oaschecker_gate::{classify, Outcome};
use oaschecker_generate::{generate_for_operation, DEFAULT_PROVIDER_TIMEOUT};
use oaschecker_harness::{self as harness, HarnessInput, DEFAULT_DEADLINE};
use oaschecker_providers::ProviderRegistry;
use oaschecker_report::{aggregate, AggregateInput, HarnessResultView, OperationResult, ProviderRunRecord, Report};
use oaschecker_spec::{load_specification, Operation, Specification};
use oaschecker_tracker::{IssueRequest, IssueTracker, ProviderFailureDetail};
use oaschecker_utils::error::AnalyzerError;

pub struct AnalyzeOptions {
    pub filter_operation_id: Option<String>,
    pub run_tests: bool,
    pub create_issues: bool,
    pub issue_repo: Option<String>,
    pub target_url: String,
    pub framework: Option<String>,
    pub concurrency: usize,
    pub provider_timeout: Duration,
    pub harness_deadline: Duration,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            filter_operation_id: None,
            run_tests: true,
            create_issues: false,
            issue_repo: None,
            target_url: "http://localhost:8080".to_string(),
            framework: None,
            concurrency: 4,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            harness_deadline: DEFAULT_DEADLINE,
        }
    }
}

/// Runs the full pipeline. `cancellation` is checked cooperatively: once
/// cancelled, no not-yet-started operation begins, and any in-flight
/// generation or harness run for an already-started operation is dropped
/// promptly (`spec.md` §5 "Cancellation"). The returned `Report` is
/// well-formed but partial — not-yet-started operations are recorded with
/// outcome `NotRun`.
pub async fn analyze(
    source: &str,
    providers: &[String],
    options: AnalyzeOptions,
    tracker: Option<Arc<dyn IssueTracker>>,
    cancellation: CancellationToken,
) -> Result<Report, AnalyzerError> {
    let started = Instant::now();

    let specification = load_specification(source).await.map_err(|err| AnalyzerError::SpecLoad {
        source: source.to_string(),
        reason: err.to_string(),
    })?;

    let operations = select_operations(&specification, options.filter_operation_id.as_deref())?;

    let registry = ProviderRegistry::build(providers).map_err(|err| AnalyzerError::CredentialsMissing {
        provider: providers.join(","),
        env_var: err.to_string(),
    })?;
    let providers = registry.providers().to_vec();

    let declared_count = specification.operations.len() as u32;
    let provider_ids: Vec<String> = providers.iter().map(|p| p.id().to_string()).collect();
    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let (tx, mut rx) = mpsc::channel::<OperationResult>(operations.len().max(1));

    let mut handles = Vec::with_capacity(operations.len());
    for operation in operations {
        let semaphore = Arc::clone(&semaphore);
        let providers = providers.clone();
        let provider_ids = provider_ids.clone();
        let tracker = tracker.clone();
        let tx = tx.clone();
        let issue_repo = options.issue_repo.clone();
        let target_url = options.target_url.clone();
        let framework = options.framework.clone();
        let run_tests = options.run_tests;
        let create_issues = options.create_issues;
        let provider_timeout = options.provider_timeout;
        let harness_deadline = options.harness_deadline;
        let cancellation = cancellation.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore is never closed");

            // A cancellation request must stop new operations from starting.
            if cancellation.is_cancelled() {
                let _ = tx.send(OperationResult::not_run(operation, &provider_ids)).await;
                return;
            }

            let result = process_operation(
                &operation,
                &providers,
                run_tests,
                &target_url,
                framework.as_deref(),
                provider_timeout,
                harness_deadline,
                create_issues,
                issue_repo.as_deref(),
                tracker.as_deref(),
                &cancellation,
            )
            .await;
            let _ = tx.send(result).await;
        }));
    }
    drop(tx);

    let mut collected = Vec::new();
    while let Some(result) = rx.recv().await {
        collected.push(result);
    }
    for handle in handles {
        let _ = handle.await;
    }

    // Declaration order, not completion order.
    collected.sort_by_key(|result| {
        specification
            .operations
            .iter()
            .position(|op| op.operation_id == result.operation.operation_id)
            .unwrap_or(usize::MAX)
    });

    let report = aggregate(AggregateInput {
        title: if specification.info.title.is_empty() { source.to_string() } else { specification.info.title.clone() },
        spec_version: specification.schema_version.clone(),
        declared_operation_count: declared_count,
        operations: collected,
        elapsed_ms: started.elapsed().as_millis() as u64,
    });

    Ok(report)
}

fn select_operations(specification: &Specification, filter: Option<&str>) -> Result<Vec<Operation>, AnalyzerError> {
    match filter {
        None => Ok(specification.operations.clone()),
        Some(id) => specification.find(id).cloned().map(|op| vec![op]).ok_or_else(|| {
            AnalyzerError::FilterNoMatch {
                requested: id.to_string(),
                available: specification.operations.iter().map(|op| op.operation_id.clone()).collect(),
            }
        }),
    }
}

#[allow(clippy::too_many_arguments)]
async fn process_operation(
    operation: &Operation,
    providers: &[Arc<dyn oaschecker_providers::LlmProvider>],
    run_tests: bool,
    target_url: &str,
    framework: Option<&str>,
    provider_timeout: Duration,
    harness_deadline: Duration,
    create_issues: bool,
    issue_repo: Option<&str>,
    tracker: Option<&dyn IssueTracker>,
    cancellation: &CancellationToken,
) -> OperationResult {
    let prompt = oaschecker_prompt::build(operation, framework);

    let records = tokio::select! {
        records = generate_for_operation(operation, &prompt, providers, provider_timeout) => records,
        () = cancellation.cancelled() => {
            let provider_ids: Vec<String> = providers.iter().map(|p| p.id().to_string()).collect();
            return OperationResult::not_run(operation.clone(), &provider_ids);
        }
    };

    let mut by_provider = Vec::with_capacity(records.len());
    for record in records {
        let provider_id = record.provider.clone();

        if cancellation.is_cancelled() {
            by_provider.push((
                provider_id,
                ProviderRunRecord { generation: record, harness: None, outcome: Outcome::NotRun },
            ));
            continue;
        }

        if !record.succeeded() {
            by_provider.push((
                provider_id,
                ProviderRunRecord { generation: record, harness: None, outcome: Outcome::Skipped },
            ));
            continue;
        }

        if !run_tests {
            by_provider.push((
                provider_id,
                ProviderRunRecord { generation: record, harness: None, outcome: Outcome::NotRun },
            ));
            continue;
        }

        let harness_input =
            HarnessInput { method: &operation.method, path: &operation.path, source: &record.source_code, target_url };

        let mut harness_result = tokio::select! {
            result = harness::run(&harness_input, harness_deadline) => result,
            () = cancellation.cancelled() => {
                by_provider.push((
                    provider_id,
                    ProviderRunRecord { generation: record, harness: None, outcome: Outcome::NotRun },
                ));
                continue;
            }
        };
        harness_result.raw_output = oaschecker_redaction::redact_user_string(&harness_result.raw_output);
        let outcome = classify(&harness_result);
        let harness_view = HarnessResultView::from(&harness_result);

        by_provider.push((
            provider_id,
            ProviderRunRecord { generation: record, harness: Some(harness_view), outcome },
        ));
    }

    let mut operation_result = OperationResult { operation: operation.clone(), by_provider, issue_handle: None };

    if create_issues && operation_result.has_contract_failure() {
        if let (Some(repo), Some(tracker)) = (issue_repo, tracker) {
            let failing_providers = operation_result
                .by_provider
                .iter()
                .filter_map(|(id, record)| match &record.outcome {
                    Outcome::FailedContract { failures } => Some(ProviderFailureDetail {
                        provider: id.clone(),
                        sub_test_names: failures.iter().map(|f| f.name.clone()).collect(),
                        messages: failures.iter().map(|f| f.message.clone()).collect(),
                    }),
                    _ => None,
                })
                .collect();

            let raw_output_excerpt = operation_result
                .by_provider
                .iter()
                .filter_map(|(_, r)| r.harness.as_ref().map(|h| h.raw_output.clone()))
                .collect::<Vec<_>>()
                .join("\n---\n");

            let request = IssueRequest {
                repo: repo.to_string(),
                method: operation.method.clone(),
                path: operation.path.clone(),
                operation_id: operation.operation_id.clone(),
                failing_providers,
                raw_output_excerpt,
            };

            match tracker.open_or_comment(&request).await {
                Ok(handle) => operation_result.issue_handle = Some(handle),
                Err(err) => tracing::warn!(operation_id = %operation.operation_id, error = %err, "issue tracker request failed"),
            }
        }
    }

    operation_result
}
