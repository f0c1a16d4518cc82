//! Error types for release-pr

use thiserror::Error;

/// Errors raised while resolving configuration or raising the release PR
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid action input
    #[error("configuration error: {0}")]
    Config(String),

    /// The new version could not be read from the manifest
    #[error("{0}")]
    VersionExtraction(String),

    /// An external command exited unsuccessfully
    #[error("command `{command}` failed with {status}: {stderr}")]
    Command {
        /// Command line, with credentials redacted
        command: String,
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Missing or unusable credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// The push event payload is missing or malformed
    #[error("invalid push event: {0}")]
    Event(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result type alias for release-pr operations
pub type Result<T> = std::result::Result<T, Error>;
