//! Request/response shapes for the Issue Driver (C8).

use serde::{Deserialize, Serialize};

/// Opaque tracker-assigned identifier for a created issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueHandle(pub String);

#[derive(Debug, Clone)]
pub struct ProviderFailureDetail {
    pub provider: String,
    pub sub_test_names: Vec<String>,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub repo: String,
    pub method: String,
    pub path: String,
    pub operation_id: String,
    pub failing_providers: Vec<ProviderFailureDetail>,
    pub raw_output_excerpt: String,
}

impl IssueRequest {
    /// Idempotence key: the driver must never open a second issue for the
    /// same `(repository, method, path)` within a run.
    #[must_use]
    pub fn idempotence_key(&self) -> (String, String, String) {
        (self.repo.clone(), self.method.clone(), self.path.clone())
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("[{}] {} — contract failure", self.method.to_ascii_uppercase(), self.path)
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let mut labels = vec![self.method.to_ascii_lowercase(), "contract-failure".to_string()];
        labels.extend(self.failing_providers.iter().map(|p| p.provider.clone()));
        labels
    }

    #[must_use]
    pub fn body(&self) -> String {
        let mut body = format!("Operation `{}` (`{} {}`) failed contract testing.\n\n", self.operation_id, self.method, self.path);
        for detail in &self.failing_providers {
            body.push_str(&format!("### {}\n", detail.provider));
            for (name, message) in detail.sub_test_names.iter().zip(detail.messages.iter()) {
                body.push_str(&format!("- `{name}`: {message}\n"));
            }
        }
        const MAX_EXCERPT: usize = 4000;
        let excerpt = truncate_at_char_boundary(&self.raw_output_excerpt, MAX_EXCERPT);
        body.push_str("\n<details><summary>raw output</summary>\n\n```\n");
        body.push_str(excerpt);
        body.push_str("\n```\n</details>\n");
        body
    }
}

/// Truncates `text` to at most `max_bytes` bytes, backing off to the nearest
/// preceding char boundary — `text` is LLM-controlled and not guaranteed to
/// have one at exactly `max_bytes`.
fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
