//! Scripted command runner for testing

use super::Journal;
use async_trait::async_trait;
use release_pr::error::{Error, Result};
use release_pr::git::{CommandOutput, CommandRunner};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl RunCall {
    /// Command line as a single string
    pub fn line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Command runner that records every call and answers from a script
///
/// Commands succeed with empty output unless a response is registered for
/// their leading arguments. The diff check reports changes by default.
pub struct FakeRunner {
    calls: Mutex<Vec<RunCall>>,
    responses: Mutex<HashMap<String, CommandOutput>>,
    spawn_failure: Mutex<Option<String>>,
    journal: Option<Journal>,
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRunner {
    /// Runner whose diff check reports a dirty working tree
    pub fn new() -> Self {
        let runner = Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(HashMap::new()),
            spawn_failure: Mutex::new(None),
            journal: None,
        };
        runner.respond("diff --quiet HEAD", CommandOutput::with_code(1));
        runner
    }

    /// Runner that also appends its calls to `journal`
    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal: Some(journal),
            ..Self::new()
        }
    }

    /// Runner whose diff check reports a clean working tree
    pub fn clean() -> Self {
        let runner = Self::new();
        runner.respond("diff --quiet HEAD", CommandOutput::with_code(0));
        runner
    }

    /// Answer git commands starting with `args_prefix` with `output`
    pub fn respond(&self, args_prefix: &str, output: CommandOutput) {
        self.responses
            .lock()
            .unwrap()
            .insert(args_prefix.to_string(), output);
    }

    /// Fail git commands starting with `args_prefix` with `code` and `stderr`
    pub fn fail(&self, args_prefix: &str, code: i32, stderr: &str) {
        self.respond(
            args_prefix,
            CommandOutput {
                code: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
    }

    /// Make every spawn fail as if `git` were missing
    pub fn fail_spawn(&self, msg: &str) {
        *self.spawn_failure.lock().unwrap() = Some(msg.to_string());
    }

    /// All recorded calls
    pub fn calls(&self) -> Vec<RunCall> {
        self.calls.lock().unwrap().clone()
    }

    /// All recorded command lines
    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(RunCall::line).collect()
    }

    /// Paths passed to `git add`, in call order
    pub fn staged_files(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.args.first().is_some_and(|a| a == "add"))
            .filter_map(|c| c.args.get(1).cloned())
            .collect()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput> {
        let call = RunCall {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        };
        if let Some(journal) = &self.journal {
            journal.record(call.line());
        }
        self.calls.lock().unwrap().push(call);

        if let Some(msg) = self.spawn_failure.lock().unwrap().as_ref() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                msg.clone(),
            )));
        }

        let joined = args.join(" ");
        let responses = self.responses.lock().unwrap();
        let output = responses
            .iter()
            .filter(|(prefix, _)| joined.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| CommandOutput::with_code(0));
        Ok(output)
    }
}
