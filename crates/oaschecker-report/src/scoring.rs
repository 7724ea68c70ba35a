//! Per-provider composite scoring (`spec.md` §4.9).

const BOUNDARY_KEYWORDS: &[&str] = &["boundary", "edge", "limit", "overflow", "empty", "null"];
const ERROR_KEYWORDS: &[&str] = &["error", "invalid", "missing", "unauthorized", "forbidden", "not_found", "404", "400", "401", "403"];
const SECURITY_KEYWORDS: &[&str] = &["inject", "xss", "sql", "auth", "token", "csrf", "escape"];

/// Surface-metric quality score in `[0, 100]`: assertion density plus the
/// presence of error/boundary/security-flavored test names.
#[must_use]
pub fn quality_score(source: &str, sub_test_count: u32) -> f64 {
    if source.is_empty() {
        return 0.0;
    }
    let assertion_count = source.matches("assert").count() as f64;
    let density = (assertion_count / f64::from(sub_test_count.max(1))).min(3.0) / 3.0;
    let keyword_bonus = keyword_hits(source, ERROR_KEYWORDS).min(1) as f64 * 0.3
        + keyword_hits(source, SECURITY_KEYWORDS).min(1) as f64 * 0.2;
    ((density * 0.5 + keyword_bonus) * 100.0).min(100.0)
}

/// Surface-metric coverage score in `[0, 100]`: how many of the expected
/// scenario categories (success, error, boundary, validation) appear to be
/// represented in the generated source.
#[must_use]
pub fn coverage_score(source: &str) -> f64 {
    if source.is_empty() {
        return 0.0;
    }
    let lower = source.to_ascii_lowercase();
    let has_success = lower.contains("200") || lower.contains("success") || lower.contains("ok");
    let has_error = keyword_hits(&lower, ERROR_KEYWORDS) > 0;
    let has_boundary = keyword_hits(&lower, BOUNDARY_KEYWORDS) > 0;
    let has_validation = lower.contains("required") || lower.contains("valid");

    let hit_count = [has_success, has_error, has_boundary, has_validation].iter().filter(|b| **b).count();
    (hit_count as f64 / 4.0) * 100.0
}

fn keyword_hits(haystack: &str, keywords: &[&str]) -> usize {
    let lower = haystack.to_ascii_lowercase();
    keywords.iter().filter(|k| lower.contains(*k)).count()
}

/// `100 / (1 + durationSeconds)`.
#[must_use]
pub fn perf_score(duration_seconds: f64) -> f64 {
    100.0 / (1.0 + duration_seconds.max(0.0))
}

/// `0.30*quality + 0.25*coverage + 0.25*(100*successRate) + 0.20*perfScore`.
#[must_use]
pub fn composite_score(quality: f64, coverage: f64, success_rate: f64, perf: f64) -> f64 {
    0.30 * quality + 0.25 * coverage + 0.25 * (100.0 * success_rate) + 0.20 * perf
}

/// `0.7*(passed/total) + 0.3*(processed/declared)` on a 0-100 scale; `0` when
/// `total == 0` rather than undefined.
#[must_use]
pub fn health_score(passed: u32, total: u32, processed: u32, declared: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pass_component = f64::from(passed) / f64::from(total);
    let coverage_component = if declared == 0 { 0.0 } else { f64::from(processed) / f64::from(declared) };
    (0.7 * pass_component + 0.3 * coverage_component) * 100.0
}
