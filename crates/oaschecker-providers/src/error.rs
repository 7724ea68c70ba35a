//! Errors surfaced by `LlmProvider` implementations and the registry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to provider `{provider}` failed: {reason}")]
    Request { provider: String, reason: String },

    #[error("provider `{provider}` returned an unparsable response: {reason}")]
    MalformedResponse { provider: String, reason: String },

    #[error("provider `{provider}` timed out after {timeout_seconds}s")]
    Timeout { provider: String, timeout_seconds: u64 },

    #[error("credentials missing for provider `{provider}` (expected env var `{env_var}`)")]
    CredentialsMissing { provider: String, env_var: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("provider identifier `{0}` does not match the well-known or `local:<model>` grammar")]
    MalformedIdentifier(String),

    #[error(transparent)]
    Credentials(#[from] LlmError),
}
