//! Release pull request workflow
//!
//! Runs once per push event:
//! 1. Ignore pushes to anything but the release branch
//! 2. Stop when the working tree has no uncommitted changes
//! 3. Read the new version from the manifest
//! 4. Commit the expected files on a new branch and push it
//! 5. Open a pull request back into the release branch
//!
//! Every step is awaited before the next starts. Nothing is rolled back on
//! failure, so a run that dies after step 4 leaves the branch behind.

use crate::auth::GitHubAuthConfig;
use crate::config::Config;
use crate::error::Result;
use crate::git::{CommandRunner, Git};
use crate::manifest::{MANIFEST_FILE, read_version};
use crate::platform::PlatformService;
use crate::types::{PullRequest, PushEvent};
use std::path::PathBuf;
use tracing::{debug, info};

/// Remote the release branch is pushed to
pub const REMOTE: &str = "origin";

/// How a workflow run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The push did not target the release branch
    NotReleaseBranch {
        /// Reference that was pushed
        pushed_ref: String,
    },
    /// The working tree matches `HEAD`, so no release was prepared
    NoChanges,
    /// A release branch was pushed and a PR opened
    Opened {
        /// Version taken from the manifest
        version: String,
        /// Branch carrying the release commit
        branch: String,
        /// The created pull request
        pull_request: PullRequest,
    },
}

/// PR body for a release of `version`
pub fn pull_request_body(version: &str) -> String {
    format!(
        "Updating the version number in the repository following the release of v{version}"
    )
}

/// Everything a workflow run needs besides the event itself
pub struct ReleaseWorkflow<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    platform: &'a dyn PlatformService,
    auth: &'a GitHubAuthConfig,
    workdir: PathBuf,
}

impl<'a> ReleaseWorkflow<'a> {
    /// Create a workflow operating on the repository at `workdir`
    pub fn new(
        config: &'a Config,
        runner: &'a dyn CommandRunner,
        platform: &'a dyn PlatformService,
        auth: &'a GitHubAuthConfig,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            runner,
            platform,
            auth,
            workdir: workdir.into(),
        }
    }

    /// Raise a release PR for `event` if one is due
    pub async fn raise_pull_request(&self, event: &PushEvent) -> Result<ReleaseOutcome> {
        debug!(git_ref = %event.git_ref, repo = %event.repository.full_name, "raise_pull_request");

        info!("Checking for a release branch");
        if event.git_ref != self.config.release_ref() {
            info!("Push is not to {}, ignoring", self.config.release_branch);
            return Ok(ReleaseOutcome::NotReleaseBranch {
                pushed_ref: event.git_ref.clone(),
            });
        }

        let git = self
            .auth
            .secrets()
            .into_iter()
            .fold(Git::new(self.runner, &self.workdir), |git, secret| {
                git.with_secret(secret)
            });

        info!("Checking changes");
        if !git.has_changes().await? {
            info!("New release not created. No further action needed.");
            return Ok(ReleaseOutcome::NoChanges);
        }

        info!("Changes detected. Creating pull request");

        let version = read_version(&self.workdir.join(MANIFEST_FILE))?;
        let message = self.config.commit_message(&version);
        let branch = self.config.branch_name(&version);

        self.commit_and_push(&git, event, &message, &branch).await?;

        let platform = self.platform.config();
        info!(owner = %platform.owner, repo = %platform.repo, "Opening pull request");
        let body = pull_request_body(&version);
        let pull_request = self
            .platform
            .create_pr(&branch, &self.config.release_branch, &message, &body)
            .await?;
        info!(
            number = pull_request.number,
            url = %pull_request.html_url,
            author = %self.config.pull_request_author,
            "Opened pull request"
        );

        Ok(ReleaseOutcome::Opened {
            version,
            branch,
            pull_request,
        })
    }

    async fn commit_and_push(
        &self,
        git: &Git<'_>,
        event: &PushEvent,
        message: &str,
        branch: &str,
    ) -> Result<()> {
        info!("Committing changes");

        let remote_url = self
            .auth
            .authenticated_remote_url(&event.repository.full_name)?;

        git.config_global("user.email", &self.config.commit_email)
            .await?;
        git.config_global("user.name", &self.config.commit_user)
            .await?;
        git.set_remote_url(REMOTE, &remote_url).await?;
        git.checkout_new_branch(branch).await?;

        for file in self.config.files_to_stage() {
            git.add(file).await?;
        }

        git.commit(message).await?;
        let status = git.status().await?;
        debug!(%status, "status after commit");
        git.push_upstream(REMOTE, branch).await?;

        Ok(())
    }
}
