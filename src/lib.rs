//! release-pr: open a pull request for a freshly bumped release
//!
//! After a push to the release branch, commits the version bump left in the
//! working tree on a new branch, pushes it and files a pull request.

pub mod auth;
pub mod config;
pub mod error;
pub mod git;
pub mod manifest;
pub mod platform;
pub mod types;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};
pub use workflow::{ReleaseOutcome, ReleaseWorkflow};
