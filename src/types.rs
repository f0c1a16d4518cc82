//! Core types for release-pr

use serde::{Deserialize, Serialize};

/// Push notification delivered by the forge
///
/// Only the fields the workflow reads are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PushEvent {
    /// Git reference that was pushed (e.g. `refs/heads/main`)
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Repository the push landed in
    pub repository: Repository,
}

/// Repository section of a push event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    /// Repository name without owner
    pub name: String,
    /// `owner/name`
    pub full_name: String,
    /// Owning user or organization
    pub owner: Owner,
}

/// Repository owner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Owner {
    /// Login of the user or organization
    pub login: String,
}

impl PushEvent {
    /// Parse a push event from its JSON payload
    pub fn from_json(payload: &str) -> crate::error::Result<Self> {
        serde_json::from_str(payload).map_err(|e| crate::error::Error::Event(e.to_string()))
    }

    /// Forge coordinates of the repository this event belongs to
    pub fn platform_config(&self, host: Option<String>) -> PlatformConfig {
        PlatformConfig {
            owner: self.repository.owner.login.clone(),
            repo: self.repository.name.clone(),
            host,
        }
    }
}

/// A pull request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
    /// Whether PR is a draft
    pub is_draft: bool,
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}
