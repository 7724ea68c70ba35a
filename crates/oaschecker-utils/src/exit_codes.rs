//! Exit code mapping for the analysis pipeline CLI.
//!
//! Exit 0 covers every run that *completed*, including ones that found
//! contract failures — contract failures are reported, not crashes. Any
//! non-zero code means the run itself could not complete.

use crate::error::AnalyzerError;

/// Process exit code, type-safe wrapper around the numeric value used by
/// `std::process::exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// The run completed (regardless of contract failures found).
    pub const SUCCESS: Self = Self(0);
    /// Unclassified internal failure.
    pub const INTERNAL: Self = Self(1);
    /// Spec could not be loaded or parsed.
    pub const SPEC_ERROR: Self = Self(2);
    /// A required provider credential was missing.
    pub const CREDENTIALS_MISSING: Self = Self(3);
    /// The `--op-id` filter matched no operation.
    pub const FILTER_NO_MATCH: Self = Self(4);

    #[must_use]
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl From<&AnalyzerError> for ExitCode {
    fn from(err: &AnalyzerError) -> Self {
        match err {
            AnalyzerError::SpecLoad { .. }
            | AnalyzerError::SpecParse { .. }
            | AnalyzerError::SpecStructure { .. } => ExitCode::SPEC_ERROR,
            AnalyzerError::CredentialsMissing { .. } => ExitCode::CREDENTIALS_MISSING,
            AnalyzerError::FilterNoMatch { .. } => ExitCode::FILTER_NO_MATCH,
            // Per-operation errors never reach the process boundary as the run's
            // own exit code; a run-fatal wrapper around them is unclassified.
            AnalyzerError::Generation { .. }
            | AnalyzerError::HarnessSetup { .. }
            | AnalyzerError::HarnessTimeout { .. }
            | AnalyzerError::Tracker { .. }
            | AnalyzerError::Io(_) => ExitCode::INTERNAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_kinds_map_to_distinct_nonzero_codes() {
        let spec = ExitCode::from(&AnalyzerError::SpecParse { reason: "bad json".into() });
        let creds = ExitCode::from(&AnalyzerError::CredentialsMissing {
            provider: "openai".into(),
            env_var: "OPENAI_API_KEY".into(),
        });
        assert_ne!(spec, ExitCode::SUCCESS);
        assert_ne!(creds, ExitCode::SUCCESS);
        assert_ne!(spec, creds);
    }
}
