//! Mock platform service for testing

use super::Journal;
use async_trait::async_trait;
use release_pr::error::{Error, Result};
use release_pr::platform::PlatformService;
use release_pr::types::{PlatformConfig, PullRequest};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: String,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - Optional shared journal to check ordering against git commands
pub struct MockPlatformService {
    config: PlatformConfig,
    next_pr_number: AtomicU64,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    error_on_create_pr: Mutex<Option<String>>,
    journal: Option<Journal>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_pr_number: AtomicU64::new(1),
            create_pr_calls: Mutex::new(Vec::new()),
            error_on_create_pr: Mutex::new(None),
            journal: None,
        }
    }

    /// Create a mock that also appends its calls to `journal`
    pub fn with_journal(config: PlatformConfig, journal: Journal) -> Self {
        Self {
            journal: Some(journal),
            ..Self::with_config(config)
        }
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Get all `create_pr` calls
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Get count of `create_pr` calls
    pub fn create_call_count(&self) -> usize {
        self.create_pr_calls.lock().unwrap().len()
    }

    /// Assert that `create_pr` was called with specific head and base
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_pr({head}, {base}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn create_pr(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });
        if let Some(journal) = &self.journal {
            journal.record(format!("create_pr {head} -> {base}"));
        }

        // Check for injected error
        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
            is_draft: false,
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
