//! Platform services for pull request operations

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{PlatformConfig, PullRequest};
use async_trait::async_trait;

/// Platform service trait for PR operations
///
/// The workflow only talks to the forge through this trait, so tests can
/// substitute a recording implementation.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Open a ready-for-review PR from `head` into `base`
    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
