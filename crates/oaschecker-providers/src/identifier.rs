//! Provider identifier grammar (`spec.md` §4.3):
//!
//! ```text
//! identifier  := well-known | parameterized
//! well-known  := "openai" | "openai-fast" | "anthropic-sonnet" | "anthropic-haiku"
//!              | "google-flash" | "google-pro" | "mistral" | "local-default"
//!              | "mock" | "mock-rich"
//! parameterized := "local:" <nonempty-string>
//! ```

use crate::error::RegistryError;

pub const WELL_KNOWN: &[&str] = &[
    "openai",
    "openai-fast",
    "anthropic-sonnet",
    "anthropic-haiku",
    "google-flash",
    "google-pro",
    "mistral",
    "local-default",
    "mock",
    "mock-rich",
];

/// A parsed provider identifier, distinguishing the three capability families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderIdentifier {
    Cloud(&'static str),
    Local(String),
    Mock(&'static str),
}

impl ProviderIdentifier {
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        if let Some(model) = raw.strip_prefix("local:") {
            if model.is_empty() {
                return Err(RegistryError::MalformedIdentifier(raw.to_string()));
            }
            return Ok(Self::Local(model.to_string()));
        }

        match raw {
            "mock" => Ok(Self::Mock("mock")),
            "mock-rich" => Ok(Self::Mock("mock-rich")),
            "local-default" => Ok(Self::Local("default".to_string())),
            known if WELL_KNOWN.contains(&known) => Ok(Self::Cloud(
                WELL_KNOWN.iter().find(|w| **w == known).expect("contains check above"),
            )),
            _ => Err(RegistryError::MalformedIdentifier(raw.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            Self::Cloud(s) => (*s).to_string(),
            Self::Mock(s) => (*s).to_string(),
            Self::Local(model) if model == "default" => "local-default".to_string(),
            Self::Local(model) => format!("local:{model}"),
        }
    }
}
