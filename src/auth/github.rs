//! GitHub token and server lookup

use super::AuthSource;
use crate::error::{Error, Result};
use std::fmt;
use url::Url;

const TOKEN_INPUT_VAR: &str = "INPUT_GITHUB-TOKEN";
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];
const SERVER_URL_VAR: &str = "GITHUB_SERVER_URL";
const DEFAULT_SERVER_URL: &str = "https://github.com";
const PUBLIC_HOST: &str = "github.com";

/// GitHub credentials and server location
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
    /// Web URL of the GitHub server
    pub server_url: Url,
}

impl fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"***")
            .field("source", &self.source)
            .field("server_url", &self.server_url.as_str())
            .finish()
    }
}

impl GitHubAuthConfig {
    /// Create credentials for a GitHub server
    pub fn new(token: impl Into<String>, source: AuthSource, server_url: Url) -> Self {
        Self {
            token: token.into(),
            source,
            server_url,
        }
    }

    /// Custom API host, or `None` for github.com
    pub fn api_host(&self) -> Option<String> {
        self.server_url
            .host_str()
            .filter(|host| *host != PUBLIC_HOST)
            .map(ToString::to_string)
    }

    /// Every spelling of the token that can appear in command output.
    ///
    /// The percent-encoded form embedded in
    /// [`Self::authenticated_remote_url`] comes first when it differs from
    /// the raw token, since it may contain the raw token as a substring.
    pub fn secrets(&self) -> Vec<String> {
        let mut secrets = Vec::with_capacity(2);
        let mut url = self.server_url.clone();
        if url.set_password(Some(&self.token)).is_ok()
            && let Some(encoded) = url.password()
            && encoded != self.token
        {
            secrets.push(encoded.to_string());
        }
        secrets.push(self.token.clone());
        secrets
    }

    /// HTTPS clone URL for `full_name` with the token embedded, so that
    /// pushes succeed without prompting.
    pub fn authenticated_remote_url(&self, full_name: &str) -> Result<String> {
        let mut url = self.server_url.clone();
        url.set_username("git")
            .and_then(|()| url.set_password(Some(&self.token)))
            .map_err(|()| {
                Error::Auth(format!(
                    "cannot embed credentials in server URL {}",
                    self.server_url
                ))
            })?;
        url.set_path(&format!("{full_name}.git"));
        Ok(url.to_string())
    }
}

/// Get GitHub authentication from the process environment
pub fn get_github_auth() -> Result<GitHubAuthConfig> {
    get_github_auth_from(|key| std::env::var(key).ok())
}

/// Get GitHub authentication from an arbitrary variable lookup
///
/// Checks the `github-token` action input first, then `GITHUB_TOKEN` and
/// `GH_TOKEN`.
pub fn get_github_auth_from(lookup: impl Fn(&str) -> Option<String>) -> Result<GitHubAuthConfig> {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let (token, source) = non_empty(TOKEN_INPUT_VAR)
        .map(|t| (t, AuthSource::ActionInput))
        .or_else(|| {
            TOKEN_ENV_VARS
                .into_iter()
                .find_map(|var| non_empty(var))
                .map(|t| (t, AuthSource::EnvVar))
        })
        .ok_or_else(|| {
            Error::Auth(
                "No GitHub token found. Set the github-token input or GITHUB_TOKEN".to_string(),
            )
        })?;

    let raw_server_url =
        non_empty(SERVER_URL_VAR).unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let server_url = Url::parse(raw_server_url.trim())
        .map_err(|e| Error::Auth(format!("invalid {SERVER_URL_VAR} ({raw_server_url}): {e}")))?;

    Ok(GitHubAuthConfig {
        token,
        source,
        server_url,
    })
}
