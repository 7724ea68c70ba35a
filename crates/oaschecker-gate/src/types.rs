//! Outcome type for the classifier (C7).

use oaschecker_harness::SubTestResult;
use serde::{Deserialize, Serialize};

/// The classifier's verdict for one (operation, provider) pair. Variants are
/// mutually exclusive by construction, unlike the boolean-flag encoding the
/// source system used. Issue creation may be triggered only by
/// [`Outcome::FailedContract`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    FailedContract { failures: Vec<SubTestResult> },
    FailedInfrastructure { reason: String },
    Skipped,
    NotRun,
}

impl Outcome {
    #[must_use]
    pub fn is_contract_failure(&self) -> bool {
        matches!(self, Self::FailedContract { .. })
    }
}
