//! Data model owned by the test harness (C6).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pass/fail/skip verdict for one sub-test reported by the harness output parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubTestOutcome {
    Pass,
    Fail,
    Skip,
}

/// One sub-test entry recovered from captured process output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTestResult {
    pub name: String,
    pub outcome: SubTestOutcome,
    pub message: String,
}

/// Terminal classification of how the harness invocation ended. This is the
/// input to the outcome classifier (C7); the harness itself never interprets
/// it beyond recording the observed facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitKind {
    /// Process exited 0 or non-zero with sub-test results observed.
    Normal,
    /// Non-zero exit, no sub-tests observed, build/dependency diagnostics present.
    CompileError,
    /// The working directory, source file, or manifest could not be prepared.
    SetupError,
    /// The harness deadline elapsed before the process completed.
    Timeout,
    /// Non-zero exit, no sub-tests observed, no diagnostics matched.
    RuntimeError,
}

/// Aggregate counts over a harness run's sub-tests.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SubTestCounts {
    pub total: u32,
    pub failed: u32,
    pub errored: u32,
}

/// Everything the harness observed about one (operation, provider) compile+run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessResult {
    pub raw_output: String,
    pub sub_tests: Vec<SubTestResult>,
    pub counts: SubTestCounts,
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
    pub exit_kind: ExitKind,
}

impl HarnessResult {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.counts.total > 0 && self.counts.failed == 0 && self.counts.errored == 0
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        #[allow(clippy::cast_possible_truncation)]
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}
