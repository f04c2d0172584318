//! Git runner that records invocations instead of spawning processes.

use async_trait::async_trait;
use camino::Utf8Path;
use std::sync::Mutex;
use tasksync::context::OperationContext;
use tasksync::workspace::ports::{GitCommandError, GitOutput, GitRunner};

/// Records every git invocation and answers with canned output.
///
/// `rev-parse --abbrev-ref HEAD` reports `main`; `rev-parse HEAD` reports a
/// fixed hash; everything else succeeds silently unless its subcommand was
/// registered with [`ScriptedGit::fail_on`].
#[derive(Debug, Default)]
pub struct ScriptedGit {
    calls: Mutex<Vec<Vec<String>>>,
    failing: Mutex<Vec<String>>,
}

impl ScriptedGit {
    /// Creates a runner with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later invocation of `subcommand` fail.
    pub fn fail_on(&self, subcommand: &str) {
        self.failing
            .lock()
            .expect("failing lock")
            .push(subcommand.to_owned());
    }

    /// Returns the recorded argument lists.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Counts invocations of `subcommand`.
    pub fn count(&self, subcommand: &str) -> usize {
        self.calls()
            .iter()
            .filter(|args| args.first().is_some_and(|arg| arg == subcommand))
            .count()
    }
}

#[async_trait]
impl GitRunner for ScriptedGit {
    async fn run(
        &self,
        _ctx: &OperationContext,
        _cwd: &Utf8Path,
        args: &[String],
    ) -> Result<GitOutput, GitCommandError> {
        self.calls.lock().expect("calls lock").push(args.to_vec());
        let subcommand = args.first().map(String::as_str).unwrap_or_default();
        if self
            .failing
            .lock()
            .expect("failing lock")
            .iter()
            .any(|failing| failing == subcommand)
        {
            return Err(GitCommandError::Failed {
                command: format!("git {}", args.join(" ")),
                status: "exit status: 1".to_owned(),
                detail: format!("{subcommand} rejected"),
            });
        }
        let stdout = match (subcommand, args.get(1).map(String::as_str)) {
            ("rev-parse", Some("--abbrev-ref")) => "main\n",
            ("rev-parse", _) => "0123456789abcdef0123456789abcdef01234567\n",
            _ => "",
        };
        Ok(GitOutput::stdout(stdout))
    }
}
