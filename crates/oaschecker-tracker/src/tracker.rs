//! The `IssueTracker` collaborator (`spec.md` §6).

use async_trait::async_trait;

use crate::error::TrackerError;
use crate::types::{IssueHandle, IssueRequest};

#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn open_or_comment(&self, request: &IssueRequest) -> Result<IssueHandle, TrackerError>;

    /// Bulk-close previously opened issues matching `labels` (`cleanup` CLI subcommand).
    async fn close_matching(&self, repo: &str, labels: &[String], dry_run: bool) -> Result<Vec<IssueHandle>, TrackerError>;
}
