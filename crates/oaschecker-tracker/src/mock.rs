//! In-memory `IssueTracker` for tests and dry runs without network access.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::TrackerError;
use crate::tracker::IssueTracker;
use crate::types::{IssueHandle, IssueRequest};

#[derive(Default)]
pub struct MockTracker {
    opened: Mutex<HashMap<(String, String, String), (u64, Vec<String>)>>,
    next_id: Mutex<u64>,
}

impl MockTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.opened.lock().expect("lock poisoned").len()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn open_or_comment(&self, request: &IssueRequest) -> Result<IssueHandle, TrackerError> {
        let key = request.idempotence_key();
        let mut opened = self.opened.lock().expect("lock poisoned");
        if let Some((id, comments)) = opened.get_mut(&key) {
            comments.push(request.body());
            return Ok(IssueHandle(id.to_string()));
        }
        let mut next_id = self.next_id.lock().expect("lock poisoned");
        *next_id += 1;
        let id = *next_id;
        opened.insert(key, (id, Vec::new()));
        Ok(IssueHandle(id.to_string()))
    }

    async fn close_matching(&self, _repo: &str, _labels: &[String], _dry_run: bool) -> Result<Vec<IssueHandle>, TrackerError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(repo: &str) -> IssueRequest {
        IssueRequest {
            repo: repo.to_string(),
            method: "GET".to_string(),
            path: "/pets/{id}".to_string(),
            operation_id: "GET_pets_id".to_string(),
            failing_providers: Vec::new(),
            raw_output_excerpt: String::new(),
        }
    }

    #[tokio::test]
    async fn repeated_calls_for_the_same_key_reuse_the_first_handle() {
        let tracker = MockTracker::new();
        let first = tracker.open_or_comment(&request("acme/widgets")).await.unwrap();
        let second = tracker.open_or_comment(&request("acme/widgets")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(tracker.issue_count(), 1);
    }

    #[tokio::test]
    async fn distinct_operations_get_distinct_issues() {
        let tracker = MockTracker::new();
        tracker.open_or_comment(&request("acme/widgets")).await.unwrap();
        let mut other = request("acme/widgets");
        other.path = "/pets".to_string();
        tracker.open_or_comment(&other).await.unwrap();
        assert_eq!(tracker.issue_count(), 2);
    }
}
