//! Test Harness (C6): materializes one generated test into an ephemeral
//! workspace, compiles and executes it under a deadline, and reports the
//! observed facts as a [`HarnessResult`]. This module never classifies the
//! result as contract vs. infrastructure failure — that is the Outcome
//! Classifier's job (C7).

use crate::async_exec::run_with_deadline;
use crate::command_spec::CommandSpec;
use crate::error::RunnerError;
use crate::parse::{looks_like_compile_diagnostic, parse_bdd_totals, parse_native};
use crate::types::{ExitKind, HarnessResult, SubTestCounts, SubTestOutcome};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Default harness deadline per `spec.md` §5 ("harness deadline (default 120 s)").
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(120);

/// Minimal description of a generated test file, enough to materialize it.
pub struct HarnessInput<'a> {
    /// HTTP method, e.g. `"GET"`.
    pub method: &'a str,
    /// Operation path, e.g. `"/pets/{id}"`.
    pub path: &'a str,
    /// The generated source text.
    pub source: &'a str,
    /// The target's base URL the generated test should call.
    pub target_url: &'a str,
}

/// Derive a deterministic, filesystem-safe test file stem from an operation's
/// method and path: slashes/braces/hyphens stripped, lowercased.
#[must_use]
pub fn test_file_stem(method: &str, path: &str) -> String {
    let mut stem = String::with_capacity(method.len() + path.len());
    stem.push_str(&method.to_lowercase());
    stem.push('_');
    for ch in path.chars() {
        match ch {
            '/' | '{' | '}' | '-' => continue,
            c if c.is_ascii_alphanumeric() || c == '_' => stem.push(c.to_ascii_lowercase()),
            _ => stem.push('_'),
        }
    }
    stem
}

/// Run one generated test to completion (or until the deadline elapses).
pub async fn run(input: &HarnessInput<'_>, deadline: Duration) -> HarnessResult {
    let start = Instant::now();

    let workspace = match TempDir::new() {
        Ok(dir) => dir,
        Err(e) => return setup_error(start.elapsed(), format!("failed to allocate workspace: {e}")),
    };

    let stem = test_file_stem(input.method, input.path);
    let source_path = workspace.path().join(format!("{stem}_test.rs"));
    if let Err(e) = std::fs::write(&source_path, input.source) {
        return setup_error(start.elapsed(), format!("failed to write source: {e}"));
    }

    let manifest_path = workspace.path().join("Cargo.toml");
    let manifest = build_manifest(&stem);
    if let Err(e) = std::fs::write(&manifest_path, manifest) {
        return setup_error(start.elapsed(), format!("failed to write manifest: {e}"));
    }

    // A fixed, closed argv template: never built from a string derived from
    // the generated source, to avoid shell-injection through LLM output.
    let cmd = CommandSpec::new("cargo")
        .args(["test", "--quiet"])
        .cwd(workspace.path())
        .env("OASCHECKER_TARGET_URL", input.target_url);

    let output = match run_with_deadline(&cmd, deadline).await {
        Ok(output) => output,
        Err(RunnerError::Timeout { .. }) => {
            return HarnessResult {
                raw_output: String::new(),
                sub_tests: Vec::new(),
                counts: SubTestCounts::default(),
                elapsed: start.elapsed(),
                exit_kind: ExitKind::Timeout,
            };
        }
        Err(e) => return setup_error(start.elapsed(), e.to_string()),
    };

    // workspace is dropped (and recursively deleted) on every path below,
    // including the early returns above.
    drop(workspace);

    if output.timed_out {
        return HarnessResult {
            raw_output: String::new(),
            sub_tests: Vec::new(),
            counts: SubTestCounts::default(),
            elapsed: start.elapsed(),
            exit_kind: ExitKind::Timeout,
        };
    }

    let raw_output = format!("{}{}", output.stdout_string(), output.stderr_string());
    let sub_tests = parse_native(&raw_output);
    let exit_kind = classify_exit(&output, &sub_tests, &raw_output);
    let counts = count_sub_tests(&sub_tests, &raw_output);

    HarnessResult {
        raw_output,
        sub_tests,
        counts,
        elapsed: start.elapsed(),
        exit_kind,
    }
}

fn setup_error(elapsed: Duration, reason: String) -> HarnessResult {
    HarnessResult {
        raw_output: reason,
        sub_tests: Vec::new(),
        counts: SubTestCounts::default(),
        elapsed,
        exit_kind: ExitKind::SetupError,
    }
}

fn classify_exit(
    output: &crate::process::ProcessOutput,
    sub_tests: &[crate::types::SubTestResult],
    raw_output: &str,
) -> ExitKind {
    if output.success() {
        return ExitKind::Normal;
    }
    if !sub_tests.is_empty() {
        return ExitKind::Normal;
    }
    if looks_like_compile_diagnostic(raw_output) {
        return ExitKind::CompileError;
    }
    ExitKind::RuntimeError
}

fn count_sub_tests(sub_tests: &[crate::types::SubTestResult], raw_output: &str) -> SubTestCounts {
    if !sub_tests.is_empty() {
        let failed = sub_tests.iter().filter(|t| t.outcome == SubTestOutcome::Fail).count() as u32;
        return SubTestCounts {
            total: sub_tests.len() as u32,
            failed,
            errored: 0,
        };
    }
    if let Some((ran, total)) = parse_bdd_totals(raw_output) {
        return SubTestCounts {
            total,
            failed: total.saturating_sub(ran),
            errored: 0,
        };
    }
    SubTestCounts::default()
}

fn build_manifest(stem: &str) -> String {
    format!(
        "[package]\nname = \"generated_{stem}\"\nversion = \"0.0.0\"\nedition = \"2021\"\n\n[dependencies]\n\n[[test]]\nname = \"{stem}_test\"\npath = \"{stem}_test.rs\"\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SubTestOutcome, SubTestResult};

    #[test]
    fn file_stem_strips_braces_slashes_and_hyphens() {
        assert_eq!(test_file_stem("GET", "/pets/{id}"), "get_petsid");
        assert_eq!(test_file_stem("POST", "/pet-store/orders"), "post_petstoreorders");
    }

    #[test]
    fn manifest_declares_no_third_party_dependencies() {
        let manifest = build_manifest("get_health");
        assert!(manifest.contains("[dependencies]"));
        assert!(!manifest.contains("reqwest"));
    }

    #[test]
    fn counts_reflect_failed_sub_tests() {
        let subs = vec![
            SubTestResult { name: "a".into(), outcome: SubTestOutcome::Pass, message: String::new() },
            SubTestResult { name: "b".into(), outcome: SubTestOutcome::Fail, message: "boom".into() },
        ];
        let counts = count_sub_tests(&subs, "");
        assert_eq!(counts.total, 2);
        assert_eq!(counts.failed, 1);
    }
}
