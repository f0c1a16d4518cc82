//! Git operations via the system `git` binary
//!
//! Commands go through [`CommandRunner`] so the exact sequence of
//! invocations can be observed and scripted in tests.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

const REDACTED: &str = "***";

/// Captured result of an external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Output of a command that exited with `code`
    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    /// Whether the command exited with status 0
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    fn status_description(&self) -> String {
        self.code.map_or_else(
            || "termination by signal".to_string(),
            |code| format!("exit code {code}"),
        )
    }
}

/// Runs external programs
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `cwd`, capturing its output.
    ///
    /// A non-zero exit is not an error at this level; only a failure to
    /// spawn the process is.
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Typed git commands run in one working directory
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    workdir: PathBuf,
    secrets: Vec<String>,
}

impl<'a> Git<'a> {
    /// Create a git handle for `workdir`
    pub fn new(runner: &'a dyn CommandRunner, workdir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workdir: workdir.into(),
            secrets: Vec::new(),
        }
    }

    /// Hide `secret` from logged command lines and error messages
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if !secret.is_empty() {
            self.secrets.push(secret);
        }
        self
    }

    /// Whether the working tree differs from `HEAD`.
    ///
    /// `git diff --quiet` exits 1 when there are differences. Any status
    /// other than 0 or 1 means git itself failed and is reported as such.
    pub async fn has_changes(&self) -> Result<bool> {
        let args = ["diff", "--quiet", "HEAD"];
        let output = self.exec(&args).await?;
        match output.code {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(self.command_error(&args, &output)),
        }
    }

    /// Set a global git configuration value
    pub async fn config_global(&self, key: &str, value: &str) -> Result<()> {
        self.run_checked(&["config", "--global", key, value])
            .await
            .map(drop)
    }

    /// Point `remote` at `url`
    pub async fn set_remote_url(&self, remote: &str, url: &str) -> Result<()> {
        self.run_checked(&["remote", "set-url", remote, url])
            .await
            .map(drop)
    }

    /// Create `branch` from `HEAD` and check it out
    pub async fn checkout_new_branch(&self, branch: &str) -> Result<()> {
        self.run_checked(&["checkout", "-b", branch]).await.map(drop)
    }

    /// Stage a single path
    pub async fn add(&self, path: &str) -> Result<()> {
        self.run_checked(&["add", path]).await.map(drop)
    }

    /// Commit the index
    pub async fn commit(&self, message: &str) -> Result<()> {
        self.run_checked(&["commit", "-m", message]).await.map(drop)
    }

    /// Working tree status
    pub async fn status(&self) -> Result<String> {
        self.run_checked(&["status"]).await.map(|o| o.stdout)
    }

    /// Push `branch` to `remote` and set it as upstream
    pub async fn push_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        self.run_checked(&["push", "-u", remote, branch])
            .await
            .map(drop)
    }

    async fn run_checked(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.exec(args).await?;
        if output.success() {
            Ok(output)
        } else {
            Err(self.command_error(args, &output))
        }
    }

    async fn exec(&self, args: &[&str]) -> Result<CommandOutput> {
        debug!(command = %self.display_command(args), "running");
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        let output = self.runner.run("git", &args, &self.workdir).await?;
        if !output.stdout.is_empty() {
            debug!(stdout = %self.redact(output.stdout.trim_end()), "git output");
        }
        Ok(output)
    }

    fn command_error(&self, args: &[&str], output: &CommandOutput) -> Error {
        Error::Command {
            command: self.display_command(args),
            status: output.status_description(),
            stderr: self.redact(output.stderr.trim()),
        }
    }

    fn display_command(&self, args: &[&str]) -> String {
        self.redact(&format!("git {}", args.join(" ")))
    }

    fn redact(&self, text: &str) -> String {
        self.secrets
            .iter()
            .fold(text.to_string(), |acc, secret| acc.replace(secret.as_str(), REDACTED))
    }
}
