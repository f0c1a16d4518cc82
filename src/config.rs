//! Action input resolution
//!
//! Every setting is read from a named input and falls back to a default when
//! the input is absent or blank. Inputs are looked up through
//! [`InputSource`] so that callers decide where they come from.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Files expected to change in a release, keyed by path, with the diff
/// markers a version bump produces in each of them.
pub type FileChanges = BTreeMap<String, Vec<String>>;

/// Removed/added line prefixes of a `"version"` bump in a JSON manifest
pub const VERSION_BUMP_MARKERS: [&str; 2] = ["-  \"version\": \"", "+  \"version\": \""];

/// Input names and their defaults
pub mod inputs {
    /// Package manager family selecting the default expected changes
    pub const PACKAGE_MANAGER: &str = "package-manager";
    /// JSON object merged into the expected changes
    pub const ADDITIONAL_CHANGES: &str = "additional-changes";
    /// Identity recorded as the PR author
    pub const PR_AUTHOR: &str = "pr-author";
    /// Prefix of the PR title and commit message
    pub const PR_PREFIX: &str = "pr-prefix";
    /// Branch whose pushes trigger the workflow
    pub const RELEASE_BRANCH: &str = "release-branch";
    /// Prefix of the new branch name
    pub const BRANCH_PREFIX: &str = "branch-prefix";
    /// Git author name
    pub const COMMIT_USER: &str = "commit-user";
    /// Git author email
    pub const COMMIT_EMAIL: &str = "commit-email";

    pub(super) const DEFAULT_PACKAGE_MANAGER: &str = "npm";
    pub(super) const DEFAULT_ADDITIONAL_CHANGES: &str = "{}";
    pub(super) const DEFAULT_PR_AUTHOR: &str = "guardian-ci";
    pub(super) const DEFAULT_PR_PREFIX: &str = "chore(release):";
    pub(super) const DEFAULT_RELEASE_BRANCH: &str = "main";
    pub(super) const DEFAULT_BRANCH_PREFIX: &str = "release-";
    pub(super) const DEFAULT_COMMIT_USER: &str = "guardian-ci";
    pub(super) const DEFAULT_COMMIT_EMAIL: &str = "guardian-ci@users.noreply.github.com";
}

/// Key/value lookup for action inputs
pub trait InputSource {
    /// Raw value of the named input, if set
    fn get(&self, key: &str) -> Option<String>;

    /// Trimmed value of the named input, or `default` when absent or blank
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}

/// Inputs passed by the GitHub Actions runner as `INPUT_<NAME>` variables
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvInputs;

impl EnvInputs {
    /// Environment variable name the runner uses for an input
    pub fn var_name(key: &str) -> String {
        format!("INPUT_{}", key.replace(' ', "_").to_uppercase())
    }
}

impl InputSource for EnvInputs {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(Self::var_name(key)).ok()
    }
}

/// Inputs held in memory
#[derive(Debug, Clone, Default)]
pub struct MapInputs(HashMap<String, String>);

impl MapInputs {
    /// Create an empty input map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an input, returning the map for chaining
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl InputSource for MapInputs {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Supported package manager families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    /// npm: `package.json` and `package-lock.json`
    #[default]
    Npm,
    /// yarn: `package.json` only
    Yarn,
}

impl PackageManager {
    /// All recognized families
    pub const ALL: [Self; 2] = [Self::Npm, Self::Yarn];

    /// Input value naming this family
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    /// Files a version bump touches for this family
    pub const fn manifest_files(self) -> &'static [&'static str] {
        match self {
            Self::Npm => &["package.json", "package-lock.json"],
            Self::Yarn => &["package.json"],
        }
    }

    /// Default expected changes for this family
    pub fn expected_changes(self) -> FileChanges {
        self.manifest_files()
            .iter()
            .map(|file| {
                (
                    (*file).to_string(),
                    VERSION_BUMP_MARKERS.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }

    fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|pm| pm.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.as_str() == s)
            .ok_or_else(|| {
                Error::Config(format!(
                    "Invalid package-manager value ({s}) provided. Allowed values are: {}",
                    Self::allowed_values()
                ))
            })
    }
}

/// Resolved workflow configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Branch whose pushes trigger the workflow
    pub release_branch: String,
    /// Prefix of the new branch name
    pub new_branch_prefix: String,
    /// Prefix of the PR title and commit message
    pub pull_request_prefix: String,
    /// Identity recorded as the PR author
    pub pull_request_author: String,
    /// Git author name
    pub commit_user: String,
    /// Git author email
    pub commit_email: String,
    /// Files staged for the release commit, with their diff markers
    pub expected_changes: FileChanges,
}

impl Config {
    /// Resolve configuration from the given inputs
    pub fn resolve(source: &impl InputSource) -> Result<Self> {
        let package_manager: PackageManager = source
            .get_or(inputs::PACKAGE_MANAGER, inputs::DEFAULT_PACKAGE_MANAGER)
            .parse()?;

        let mut expected_changes = package_manager.expected_changes();
        expected_changes.extend(parse_additional_changes(&source.get_or(
            inputs::ADDITIONAL_CHANGES,
            inputs::DEFAULT_ADDITIONAL_CHANGES,
        ))?);

        let config = Self {
            release_branch: source.get_or(inputs::RELEASE_BRANCH, inputs::DEFAULT_RELEASE_BRANCH),
            new_branch_prefix: source.get_or(inputs::BRANCH_PREFIX, inputs::DEFAULT_BRANCH_PREFIX),
            pull_request_prefix: source.get_or(inputs::PR_PREFIX, inputs::DEFAULT_PR_PREFIX),
            pull_request_author: source.get_or(inputs::PR_AUTHOR, inputs::DEFAULT_PR_AUTHOR),
            commit_user: source.get_or(inputs::COMMIT_USER, inputs::DEFAULT_COMMIT_USER),
            commit_email: source.get_or(inputs::COMMIT_EMAIL, inputs::DEFAULT_COMMIT_EMAIL),
            expected_changes,
        };

        debug!(
            %package_manager,
            release_branch = %config.release_branch,
            files = config.expected_changes.len(),
            "resolved configuration"
        );
        Ok(config)
    }

    /// Git reference a push must target to trigger the workflow
    pub fn release_ref(&self) -> String {
        format!("refs/heads/{}", self.release_branch)
    }

    /// Name of the branch carrying the release commit
    pub fn branch_name(&self, version: &str) -> String {
        format!("{}{version}", self.new_branch_prefix)
    }

    /// Commit message and PR title for a version
    pub fn commit_message(&self, version: &str) -> String {
        format!("{} {version}", self.pull_request_prefix)
    }

    /// Paths to stage, in a stable order
    pub fn files_to_stage(&self) -> impl Iterator<Item = &str> {
        self.expected_changes.keys().map(String::as_str)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            release_branch: inputs::DEFAULT_RELEASE_BRANCH.to_string(),
            new_branch_prefix: inputs::DEFAULT_BRANCH_PREFIX.to_string(),
            pull_request_prefix: inputs::DEFAULT_PR_PREFIX.to_string(),
            pull_request_author: inputs::DEFAULT_PR_AUTHOR.to_string(),
            commit_user: inputs::DEFAULT_COMMIT_USER.to_string(),
            commit_email: inputs::DEFAULT_COMMIT_EMAIL.to_string(),
            expected_changes: PackageManager::default().expected_changes(),
        }
    }
}

fn parse_additional_changes(raw: &str) -> Result<FileChanges> {
    serde_json::from_str(raw)
        .map_err(|e| Error::Config(format!("Invalid additional-changes value: {e}")))
}
