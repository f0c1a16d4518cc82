//! Authentication for GitHub
//!
//! Supports the action's `github-token` input and environment variables.

mod github;

pub use github::{GitHubAuthConfig, get_github_auth, get_github_auth_from};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from the `github-token` action input
    ActionInput,
    /// Token from environment variable
    EnvVar,
}
