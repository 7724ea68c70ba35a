//! `GenerationRecord` (`spec.md` §3): owned by C5 for one (operation, provider) pair.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenAccounting {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub provider: String,
    pub prompt: String,
    pub source_code: String,
    pub tokens: TokenAccounting,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    pub metadata: HashMap<String, serde_json::Value>,
    /// Set when generation failed for this (operation, provider) pair.
    /// `source_code` is empty in that case and the pair propagates to the
    /// harness as `Skipped`.
    pub error: Option<String>,
}

impl GenerationRecord {
    #[must_use]
    pub fn failed(provider: impl Into<String>, prompt: String, reason: String, duration: Duration) -> Self {
        Self {
            provider: provider.into(),
            prompt,
            source_code: String::new(),
            tokens: TokenAccounting::default(),
            duration,
            metadata: HashMap::new(),
            error: Some(reason),
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
