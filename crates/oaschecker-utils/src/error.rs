//! Library-level error type shared across the analysis pipeline.
//!
//! `AnalyzerError` enumerates the error taxonomy from the design: each
//! variant is either *run-fatal* (aborts the orchestrator) or *local*
//! (recorded against one operation/provider and the run continues).
//! See [`AnalyzerError::is_fatal`] and [`exit_codes`](crate::exit_codes).

use std::fmt;
use thiserror::Error;

/// The primary error type returned by the analysis pipeline's library crates.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Spec source unreachable, unsupported scheme, or non-200 HTTP response.
    #[error("failed to load spec from {source}: {reason}")]
    SpecLoad { source: String, reason: String },

    /// Spec bytes could not be decoded as JSON or YAML.
    #[error("failed to parse spec: {reason}")]
    SpecParse { reason: String },

    /// Spec decoded but violated a structural expectation (e.g. `paths` not a mapping).
    #[error("spec has unexpected structure at {path}: {reason}")]
    SpecStructure { path: String, reason: String },

    /// A named provider has no usable credential.
    #[error("missing credentials for provider `{provider}` (expected env var `{env_var}`)")]
    CredentialsMissing { provider: String, env_var: String },

    /// The `--op-id` filter matched no operation in the spec.
    #[error("operation id `{requested}` not found; available: {}", available.join(", "))]
    FilterNoMatch {
        requested: String,
        available: Vec<String>,
    },

    /// Provider-specific generation failure, local to one (operation, provider) pair.
    #[error("generation failed for provider `{provider}`: {reason}")]
    Generation { provider: String, reason: String },

    /// The harness working directory, manifest, or source file could not be prepared.
    #[error("harness setup failed: {reason}")]
    HarnessSetup { reason: String },

    /// The harness execution deadline elapsed.
    #[error("harness execution timed out after {timeout_seconds}s")]
    HarnessTimeout { timeout_seconds: u64 },

    /// Issue creation, listing, or closing failed against the tracker.
    #[error("issue tracker request failed: {reason}")]
    Tracker { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    /// Run-fatal errors abort the orchestrator; all others are recorded
    /// in the `Report` and the run continues (per the error propagation rule).
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SpecLoad { .. }
                | Self::SpecParse { .. }
                | Self::SpecStructure { .. }
                | Self::CredentialsMissing { .. }
                | Self::FilterNoMatch { .. }
        )
    }

    /// Stable taxonomy kind, used by callers/tests that must distinguish error kinds
    /// without matching on the full variant (and by log output).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SpecLoad { .. } => "spec_load_error",
            Self::SpecParse { .. } => "spec_parse_error",
            Self::SpecStructure { .. } => "spec_structure_error",
            Self::CredentialsMissing { .. } => "credentials_missing",
            Self::FilterNoMatch { .. } => "filter_no_match",
            Self::Generation { .. } => "generation_error",
            Self::HarnessSetup { .. } => "harness_setup_error",
            Self::HarnessTimeout { .. } => "harness_timeout",
            Self::Tracker { .. } => "tracker_error",
            Self::Io(_) => "io_error",
        }
    }
}

/// Rich, user-facing rendering of an error: a message plus actionable suggestions.
///
/// Implemented for [`AnalyzerError`] and used only at the CLI boundary; the
/// library core returns plain `Result<T, AnalyzerError>` everywhere else.
pub trait UserFriendlyError: fmt::Display {
    /// One-line message suitable for `eprintln!`.
    fn user_message(&self) -> String {
        self.to_string()
    }

    /// Zero or more actionable next steps shown below the message.
    fn suggestions(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether this error should abort the whole run.
    fn is_fatal(&self) -> bool;
}

impl UserFriendlyError for AnalyzerError {
    fn user_message(&self) -> String {
        match self {
            Self::CredentialsMissing { provider, env_var } => {
                format!("provider `{provider}` has no credentials (env var `{env_var}` not set)")
            }
            Self::FilterNoMatch { requested, .. } => {
                format!("no operation matches `--op-id {requested}`")
            }
            other => other.to_string(),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CredentialsMissing { env_var, .. } => {
                vec![format!("set {env_var} and re-run, or choose a `local:` / `mock` provider")]
            }
            Self::FilterNoMatch { available, .. } => {
                vec![format!("available operation ids: {}", available.join(", "))]
            }
            Self::SpecLoad { .. } | Self::SpecParse { .. } | Self::SpecStructure { .. } => {
                vec!["verify the source is a reachable http(s) URL or an existing file path".into()]
            }
            _ => Vec::new(),
        }
    }

    fn is_fatal(&self) -> bool {
        AnalyzerError::is_fatal(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_kinds_match_spec_taxonomy() {
        let fatal = AnalyzerError::FilterNoMatch {
            requested: "deletePet".into(),
            available: vec!["listPets".into(), "createPet".into()],
        };
        assert!(fatal.is_fatal());
        assert_eq!(fatal.kind(), "filter_no_match");

        let local = AnalyzerError::HarnessTimeout { timeout_seconds: 120 };
        assert!(!local.is_fatal());
        assert_eq!(local.kind(), "harness_timeout");
    }

    #[test]
    fn credentials_missing_never_echoes_a_value() {
        let err = AnalyzerError::CredentialsMissing {
            provider: "openai".into(),
            env_var: "OPENAI_API_KEY".into(),
        };
        let rendered = err.user_message();
        assert!(rendered.contains("OPENAI_API_KEY"));
        assert!(!rendered.contains("sk-"));
    }
}
