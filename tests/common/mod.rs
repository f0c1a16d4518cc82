//! Shared test utilities
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

mod fake_runner;
mod mock_platform;

pub use fake_runner::{FakeRunner, RunCall};
pub use mock_platform::{CreatePrCall, MockPlatformService};

use release_pr::auth::{AuthSource, GitHubAuthConfig};
use release_pr::types::{Owner, PlatformConfig, PushEvent, Repository};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use url::Url;

/// Token used by test credentials
pub const TEST_TOKEN: &str = "ghs_testtoken123";

/// Ordered record of side effects shared between fakes
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Platform config for the test repository
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "guardian".to_string(),
        repo: "widgets".to_string(),
        host: None,
    }
}

/// Push event for `git_ref` in `guardian/widgets`
pub fn push_event(git_ref: &str) -> PushEvent {
    PushEvent {
        git_ref: git_ref.to_string(),
        repository: Repository {
            name: "widgets".to_string(),
            full_name: "guardian/widgets".to_string(),
            owner: Owner {
                login: "guardian".to_string(),
            },
        },
    }
}

/// Credentials for github.com
pub fn test_auth() -> GitHubAuthConfig {
    GitHubAuthConfig::new(
        TEST_TOKEN,
        AuthSource::EnvVar,
        Url::parse("https://github.com").unwrap(),
    )
}

/// Temporary working tree holding a `package.json`
pub struct TempWorkdir {
    dir: TempDir,
}

impl TempWorkdir {
    /// Working tree with `package.json` containing `version`
    pub fn with_version(version: &str) -> Self {
        Self::with_manifest(&format!(
            "{{\n  \"name\": \"widgets\",\n  \"version\": \"{version}\"\n}}\n"
        ))
    }

    /// Working tree with a raw `package.json`
    pub fn with_manifest(contents: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        std::fs::write(dir.path().join("package.json"), contents).expect("write package.json");
        Self { dir }
    }

    /// Working tree without any manifest
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
