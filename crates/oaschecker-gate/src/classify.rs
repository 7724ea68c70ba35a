//! Outcome Classifier (C7): maps raw harness output to a tagged [`Outcome`].
//!
//! The decision procedure is evaluated top-down, first match wins. The
//! single most important invariant of the whole system lives here:
//! infrastructure noise must never create a tracker issue.

use crate::types::Outcome;
use oaschecker_harness::{ExitKind, HarnessResult, SubTestOutcome};

/// A sub-test failure counts as a contract failure only when its name isn't
/// an infrastructure marker smuggled through the sub-test channel (a
/// generated test occasionally reports its own compilation step as a
/// pseudo sub-test named `compilation`).
fn is_infrastructure_marker(name: &str) -> bool {
    name.eq_ignore_ascii_case("compilation") || name.eq_ignore_ascii_case("error")
}

/// Classify a harness result for one (operation, provider) pair.
#[must_use]
pub fn classify(result: &HarnessResult) -> Outcome {
    match result.exit_kind {
        ExitKind::SetupError => {
            return Outcome::FailedInfrastructure { reason: "setup".to_string() };
        }
        ExitKind::CompileError => {
            return Outcome::FailedInfrastructure { reason: "compile".to_string() };
        }
        ExitKind::Timeout => {
            return Outcome::FailedInfrastructure { reason: "timeout".to_string() };
        }
        ExitKind::Normal | ExitKind::RuntimeError => {}
    }

    if result.all_passed() {
        return Outcome::Passed;
    }

    let genuine_failures: Vec<_> = result
        .sub_tests
        .iter()
        .filter(|t| t.outcome == SubTestOutcome::Fail && !is_infrastructure_marker(&t.name))
        .cloned()
        .collect();

    if !genuine_failures.is_empty() {
        return Outcome::FailedContract { failures: genuine_failures };
    }

    Outcome::FailedInfrastructure { reason: "runtime".to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oaschecker_harness::{SubTestCounts, SubTestResult};
    use std::time::Duration;

    fn base(exit_kind: ExitKind) -> HarnessResult {
        HarnessResult {
            raw_output: String::new(),
            sub_tests: Vec::new(),
            counts: SubTestCounts::default(),
            elapsed: Duration::from_secs(1),
            exit_kind,
        }
    }

    #[test]
    fn setup_compile_and_timeout_are_always_infrastructure() {
        assert!(matches!(
            classify(&base(ExitKind::SetupError)),
            Outcome::FailedInfrastructure { reason } if reason == "setup"
        ));
        assert!(matches!(
            classify(&base(ExitKind::CompileError)),
            Outcome::FailedInfrastructure { reason } if reason == "compile"
        ));
        assert!(matches!(
            classify(&base(ExitKind::Timeout)),
            Outcome::FailedInfrastructure { reason } if reason == "timeout"
        ));
    }

    #[test]
    fn all_passing_subtests_is_passed() {
        let mut result = base(ExitKind::Normal);
        result.sub_tests.push(SubTestResult {
            name: "status_ok".into(),
            outcome: SubTestOutcome::Pass,
            message: String::new(),
        });
        result.counts = SubTestCounts { total: 1, failed: 0, errored: 0 };
        assert!(matches!(classify(&result), Outcome::Passed));
    }

    #[test]
    fn genuine_assertion_failure_is_contract_failure() {
        let mut result = base(ExitKind::Normal);
        result.sub_tests.push(SubTestResult {
            name: "status_ok".into(),
            outcome: SubTestOutcome::Fail,
            message: "expected 200 got 404".into(),
        });
        result.counts = SubTestCounts { total: 1, failed: 1, errored: 0 };
        assert!(classify(&result).is_contract_failure());
    }

    #[test]
    fn unclassified_failure_with_only_infra_markers_is_infrastructure() {
        let mut result = base(ExitKind::RuntimeError);
        result.sub_tests.push(SubTestResult {
            name: "compilation".into(),
            outcome: SubTestOutcome::Fail,
            message: String::new(),
        });
        result.counts = SubTestCounts { total: 1, failed: 1, errored: 0 };
        assert!(matches!(
            classify(&result),
            Outcome::FailedInfrastructure { reason } if reason == "runtime"
        ));
    }

    #[test]
    fn no_subtests_observed_on_nonzero_exit_is_infrastructure() {
        let result = base(ExitKind::RuntimeError);
        assert!(matches!(
            classify(&result),
            Outcome::FailedInfrastructure { reason } if reason == "runtime"
        ));
    }
}
