//! Issue Driver (C8): the `IssueTracker` collaborator and its adapters.

pub mod error;
pub mod github;
pub mod mock;
pub mod tracker;
pub mod types;

pub use error::TrackerError;
pub use github::GithubTracker;
pub use mock::MockTracker;
pub use tracker::IssueTracker;
pub use types::{IssueHandle, IssueRequest, ProviderFailureDetail};
