//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{PlatformConfig, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// A custom `host` routes API calls through the GitHub Enterprise
    /// `https://<host>/api/v3` endpoint.
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let base_uri = host.as_ref().map(|h| format!("https://{h}/api/v3"));
        Self::build(
            token,
            PlatformConfig { owner, repo, host },
            base_uri.as_deref(),
        )
    }

    /// Create a service that talks to an explicit API base URI
    pub fn with_base_uri(token: &str, config: PlatformConfig, base_uri: &str) -> Result<Self> {
        Self::build(token, config, Some(base_uri))
    }

    fn build(token: &str, config: PlatformConfig, base_uri: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self { client, config })
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        is_draft: pr.draft.unwrap_or(false),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        debug!(
            owner = %self.config.owner,
            repo = %self.config.repo,
            head,
            base,
            "creating PR"
        );
        let pulls = self.client.pulls(&self.config.owner, &self.config.repo);
        let pr = pulls.create(title, head, base).body(body).send().await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
