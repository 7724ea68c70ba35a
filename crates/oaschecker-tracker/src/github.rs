//! `octocrab`-backed `IssueTracker` for GitHub repositories.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::error::TrackerError;
use crate::tracker::IssueTracker;
use crate::types::{IssueHandle, IssueRequest};

pub struct GithubTracker {
    client: Octocrab,
    /// Within-run idempotence: `(repo, method, path)` -> issue number already opened.
    opened: Mutex<HashMap<(String, String, String), u64>>,
}

impl GithubTracker {
    pub fn new(token: String) -> Result<Self, TrackerError> {
        let client = Octocrab::builder()
            .personal_token(token)
            .build()
            .map_err(|err| TrackerError::Request { reason: err.to_string() })?;
        Ok(Self { client, opened: Mutex::new(HashMap::new()) })
    }

    fn split_repo(repo: &str) -> Result<(&str, &str), TrackerError> {
        repo.split_once('/').ok_or_else(|| TrackerError::Request {
            reason: format!("expected `owner/name`, got `{repo}`"),
        })
    }
}

#[async_trait]
impl IssueTracker for GithubTracker {
    async fn open_or_comment(&self, request: &IssueRequest) -> Result<IssueHandle, TrackerError> {
        let (owner, name) = Self::split_repo(&request.repo)?;
        let key = request.idempotence_key();

        if let Some(&number) = self.opened.lock().expect("lock poisoned").get(&key) {
            self.client
                .issues(owner, name)
                .create_comment(number, request.body())
                .await
                .map_err(|err| TrackerError::Request { reason: err.to_string() })?;
            return Ok(IssueHandle(number.to_string()));
        }

        let issue = self
            .client
            .issues(owner, name)
            .create(request.title())
            .body(request.body())
            .labels(request.labels())
            .send()
            .await
            .map_err(|err| TrackerError::Request { reason: err.to_string() })?;

        self.opened.lock().expect("lock poisoned").insert(key, issue.number);
        Ok(IssueHandle(issue.number.to_string()))
    }

    async fn close_matching(&self, repo: &str, labels: &[String], dry_run: bool) -> Result<Vec<IssueHandle>, TrackerError> {
        let (owner, name) = Self::split_repo(repo)?;
        let page = self
            .client
            .issues(owner, name)
            .list()
            .labels(labels)
            .state(octocrab::params::State::Open)
            .send()
            .await
            .map_err(|err| TrackerError::Request { reason: err.to_string() })?;

        let mut closed = Vec::new();
        for issue in page.items {
            if !dry_run {
                self.client
                    .issues(owner, name)
                    .update(issue.number)
                    .state(octocrab::models::IssueState::Closed)
                    .send()
                    .await
                    .map_err(|err| TrackerError::Request { reason: err.to_string() })?;
            }
            closed.push(IssueHandle(issue.number.to_string()));
        }
        Ok(closed)
    }
}
