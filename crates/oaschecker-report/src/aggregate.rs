//! Report Aggregator (C9): rolls per-operation, per-provider outcomes into
//! the comparative [`Report`].

use std::collections::HashSet;

use chrono::Utc;
use oaschecker_gate::Outcome;

use crate::model::{OperationResult, ProviderAggregate, Ranking, Report};
use crate::scoring;

pub struct AggregateInput {
    pub title: String,
    pub spec_version: String,
    pub declared_operation_count: u32,
    pub operations: Vec<OperationResult>,
    pub elapsed_ms: u64,
}

#[must_use]
pub fn aggregate(input: AggregateInput) -> Report {
    let provider_ids = all_provider_ids(&input.operations);
    let provider_aggregates: Vec<ProviderAggregate> =
        provider_ids.iter().map(|id| aggregate_provider(id, &input.operations)).collect();

    let rankings = vec![
        rank_by("quality", &provider_aggregates, |agg| agg.quality),
        rank_by("coverage", &provider_aggregates, |agg| agg.coverage),
        rank_by("reliability", &provider_aggregates, |agg| agg.success_rate),
    ];

    let processed = input
        .operations
        .iter()
        .filter(|op| op.by_provider.iter().any(|(_, r)| !matches!(r.outcome, Outcome::NotRun)))
        .count() as u32;
    let total_verdicts: u32 = input.operations.iter().map(|op| op.by_provider.len() as u32).sum();
    let passed_verdicts: u32 = input
        .operations
        .iter()
        .flat_map(|op| op.by_provider.iter().map(|(_, r)| r))
        .filter(|r| matches!(r.outcome, Outcome::Passed))
        .count() as u32;

    let health = scoring::health_score(passed_verdicts, total_verdicts, processed, input.declared_operation_count);
    let recommendations = recommendations(&provider_aggregates, &rankings, health);

    Report {
        schema_version: "1".to_string(),
        title: input.title,
        spec_version: input.spec_version,
        operations: input.operations,
        provider_aggregates,
        rankings,
        recommendations,
        health_score: health,
        generated_at: Utc::now(),
        elapsed_ms: input.elapsed_ms,
    }
}

/// Narrative recommendations derived from the aggregates/rankings already
/// computed above (`spec.md` §4.9) — no additional scoring is introduced.
fn recommendations(aggregates: &[ProviderAggregate], rankings: &[Ranking], health: f64) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(quality) = rankings.iter().find(|r| r.criterion == "quality").and_then(|r| r.order.first()) {
        lines.push(format!("`{quality}` produced the highest-quality tests; prefer it for contract generation."));
    }
    if let Some(reliability) = rankings.iter().find(|r| r.criterion == "reliability").and_then(|r| r.order.first()) {
        lines.push(format!("`{reliability}` was the most reliable provider in this run."));
    }

    for agg in aggregates {
        if agg.generated > 0 && agg.success_rate < 0.5 {
            lines.push(format!(
                "`{}` failed more than half its generated tests ({:.0}% success); investigate before relying on it.",
                agg.provider,
                agg.success_rate * 100.0
            ));
        }
    }

    if health < 50.0 {
        lines.push(
            "overall health score is below 50; re-run with a broader provider set or inspect infrastructure failures."
                .to_string(),
        );
    }

    if lines.is_empty() {
        lines.push("no notable issues surfaced by this run.".to_string());
    }

    lines
}

fn all_provider_ids(operations: &[OperationResult]) -> Vec<String> {
    let mut ids: HashSet<String> = HashSet::new();
    for op in operations {
        ids.extend(op.by_provider.iter().map(|(id, _)| id.clone()));
    }
    let mut ids: Vec<String> = ids.into_iter().collect();
    ids.sort();
    ids
}

fn aggregate_provider(provider: &str, operations: &[OperationResult]) -> ProviderAggregate {
    let mut generated = 0u32;
    let mut passed = 0u32;
    let mut failed = 0u32;
    let mut total_tokens = 0u64;
    let mut total_duration_ms = 0u64;
    let mut quality_sum = 0.0;
    let mut coverage_sum = 0.0;
    let mut scored = 0u32;

    for op in operations {
        let Some((_, record)) = op.by_provider.iter().find(|(id, _)| id == provider) else { continue };
        generated += 1;
        total_tokens += record.generation.tokens.total;
        total_duration_ms += record.generation.duration.as_millis() as u64;

        match record.outcome {
            Outcome::Passed => passed += 1,
            Outcome::FailedContract { .. } => failed += 1,
            _ => {}
        }

        if record.generation.succeeded() {
            let sub_test_count = record.harness.as_ref().map_or(1, |h| h.sub_test_count.max(1));
            quality_sum += scoring::quality_score(&record.generation.source_code, sub_test_count);
            coverage_sum += scoring::coverage_score(&record.generation.source_code);
            scored += 1;
        }
    }

    let success_rate = if generated == 0 { 0.0 } else { f64::from(passed) / f64::from(generated) };
    let average_duration_ms = if generated == 0 { 0 } else { total_duration_ms / u64::from(generated) };
    let quality = if scored == 0 { 0.0 } else { quality_sum / f64::from(scored) };
    let coverage = if scored == 0 { 0.0 } else { coverage_sum / f64::from(scored) };
    let perf = scoring::perf_score(average_duration_ms as f64 / 1000.0);
    let composite = scoring::composite_score(quality, coverage, success_rate, perf);

    ProviderAggregate {
        provider: provider.to_string(),
        generated,
        passed,
        failed,
        total_tokens,
        average_duration_ms,
        success_rate,
        quality,
        coverage,
        composite_score: composite,
    }
}

fn rank_by(criterion: &str, aggregates: &[ProviderAggregate], score: impl Fn(&ProviderAggregate) -> f64) -> Ranking {
    let mut scored: Vec<(&ProviderAggregate, f64)> = aggregates.iter().map(|agg| (agg, score(agg))).collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.0.provider.cmp(&b.0.provider)));
    Ranking { criterion: criterion.to_string(), order: scored.into_iter().map(|(agg, _)| agg.provider.clone()).collect() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_operations_yields_zero_health_score() {
        let report = aggregate(AggregateInput {
            title: "t".to_string(),
            spec_version: "3.0.0".to_string(),
            declared_operation_count: 0,
            operations: Vec::new(),
            elapsed_ms: 0,
        });
        assert_eq!(report.health_score, 0.0);
        assert!(report.provider_aggregates.is_empty());
    }
}

