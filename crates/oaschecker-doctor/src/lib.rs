//! `models status` / `models list` diagnostics (SPEC_FULL.md §11).
//!
//! Reports, per configured provider identifier, whether its credential is
//! present in the environment — without ever echoing the credential's value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use oaschecker_providers::ProviderIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorCheck {
    pub name: String,
    pub status: CheckStatus,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorOutput {
    pub schema_version: String,
    pub emitted_at: DateTime<Utc>,
    pub ok: bool,
    pub checks: Vec<DoctorCheck>,
}

fn env_var_for(id: &str) -> Option<&'static str> {
    match id {
        "openai" | "openai-fast" => Some("OPENAI_API_KEY"),
        "anthropic-sonnet" | "anthropic-haiku" => Some("ANTHROPIC_API_KEY"),
        "google-flash" | "google-pro" => Some("GOOGLE_API_KEY"),
        "mistral" => Some("MISTRAL_API_KEY"),
        _ => None,
    }
}

fn check_one(requested: &str) -> DoctorCheck {
    let parsed = match ProviderIdentifier::parse(requested) {
        Ok(parsed) => parsed,
        Err(err) => {
            return DoctorCheck { name: requested.to_string(), status: CheckStatus::Fail, details: err.to_string() };
        }
    };

    match parsed {
        ProviderIdentifier::Mock(_) => DoctorCheck {
            name: requested.to_string(),
            status: CheckStatus::Ok,
            details: "mock provider, no credential required".to_string(),
        },
        ProviderIdentifier::Local(model) => DoctorCheck {
            name: requested.to_string(),
            status: CheckStatus::Warn,
            details: format!("local provider `{model}` — reachability is not checked without a request"),
        },
        ProviderIdentifier::Cloud(_) => {
            let env_var = env_var_for(requested).unwrap_or("UNKNOWN");
            if std::env::var(env_var).is_ok() {
                DoctorCheck {
                    name: requested.to_string(),
                    status: CheckStatus::Ok,
                    details: format!("`{env_var}` is set"),
                }
            } else {
                DoctorCheck {
                    name: requested.to_string(),
                    status: CheckStatus::Fail,
                    details: format!("`{env_var}` is not set"),
                }
            }
        }
    }
}

/// Runs one check per requested identifier, sorted by provider id for
/// deterministic output, and rolls them up into a single report.
#[must_use]
pub fn status(requested: &[String]) -> DoctorOutput {
    let mut checks: Vec<DoctorCheck> = requested.iter().map(|id| check_one(id)).collect();
    checks.sort_by(|a, b| a.name.cmp(&b.name));
    let ok = checks.iter().all(|c| c.status != CheckStatus::Fail);
    DoctorOutput { schema_version: "1".to_string(), emitted_at: Utc::now(), ok, checks }
}

/// Lists every well-known identifier, for `models list`.
#[must_use]
pub fn list_well_known() -> Vec<&'static str> {
    let mut ids = oaschecker_providers::identifier::WELL_KNOWN.to_vec();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_providers_are_always_ok() {
        let output = status(&["mock".to_string(), "mock-rich".to_string()]);
        assert!(output.ok);
        assert!(output.checks.iter().all(|c| c.status == CheckStatus::Ok));
    }

    #[test]
    fn unset_cloud_credential_fails_the_overall_report() {
        std::env::remove_var("MISTRAL_API_KEY");
        let output = status(&["mistral".to_string()]);
        assert!(!output.ok);
    }

    #[test]
    fn checks_are_sorted_by_name_for_stable_output() {
        let output = status(&["mock".to_string(), "local-default".to_string()]);
        let names: Vec<_> = output.checks.iter().map(|c| c.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn list_well_known_is_sorted_and_nonempty() {
        let ids = list_well_known();
        assert!(!ids.is_empty());
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
