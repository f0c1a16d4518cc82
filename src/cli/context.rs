//! Shared command context for the CLI
//!
//! Gathers everything a run needs from the runner environment before any
//! work starts.

use release_pr::auth::{GitHubAuthConfig, get_github_auth};
use release_pr::config::{Config, EnvInputs};
use release_pr::error::{Error, Result};
use release_pr::platform::{GitHubService, PlatformService};
use release_pr::types::PushEvent;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the path of the event payload
pub const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";

/// Context for one run of the release command
///
/// This struct encapsulates the setup needed before the workflow runs:
/// - Reading the push event payload
/// - Resolving action inputs
/// - Looking up credentials
/// - Creating the platform service
pub struct CommandContext {
    /// Working directory of the repository
    pub workdir: PathBuf,
    /// Push event that triggered the run
    pub event: PushEvent,
    /// Resolved configuration
    pub config: Config,
    /// GitHub credentials
    pub auth: GitHubAuthConfig,
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(workdir: &Path, event_path: &Path) -> Result<Self> {
        let event = load_event(event_path)?;
        let config = Config::resolve(&EnvInputs)?;
        let auth = get_github_auth()?;
        debug!(source = ?auth.source, server = %auth.server_url, "using GitHub credentials");

        let platform_config = event.platform_config(auth.api_host());
        let platform = GitHubService::new(
            &auth.token,
            platform_config.owner,
            platform_config.repo,
            platform_config.host,
        )?;

        Ok(Self {
            workdir: workdir.to_path_buf(),
            event,
            config,
            auth,
            platform: Box::new(platform),
        })
    }
}

/// Read and parse the push event payload
pub fn load_event(path: &Path) -> Result<PushEvent> {
    let payload = std::fs::read_to_string(path)
        .map_err(|e| Error::Event(format!("cannot read {}: {e}", path.display())))?;
    PushEvent::from_json(&payload)
}
