//! `GitRunner` backed by the git command-line client.

use crate::context::OperationContext;
use crate::workspace::ports::{GitCommandError, GitOutput, GitRunner};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

/// Environment variable overriding the git binary.
pub const ENV_GIT_BIN: &str = "TASKSYNC_GIT_BIN";

const DEFAULT_GIT_BIN: &str = "git";

/// Spawns the git binary once per call.
///
/// Children are killed when the calling future is dropped, so a cancelled
/// [`OperationContext`] never leaves a git process behind. Terminal prompts
/// are disabled; missing credentials fail instead of blocking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCliRunner {
    binary: Utf8PathBuf,
}

impl Default for GitCliRunner {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_BIN)
    }
}

impl GitCliRunner {
    /// Creates a runner for the given binary.
    #[must_use]
    pub fn new(binary: impl Into<Utf8PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Creates a runner honouring [`ENV_GIT_BIN`].
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(ENV_GIT_BIN)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(Self::default, Self::new)
    }

    /// Returns the git binary in use.
    #[must_use]
    pub fn binary(&self) -> &Utf8Path {
        &self.binary
    }

    fn render(&self, args: &[String]) -> String {
        std::iter::once(self.binary.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Joins trimmed stderr and stdout, falling back to the exit status.
fn failure_detail(stdout: &str, stderr: &str, status: &str) -> String {
    let parts: Vec<&str> = [stderr.trim(), stdout.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        format!("exit status {status}")
    } else {
        parts.join("\n")
    }
}

#[async_trait]
impl GitRunner for GitCliRunner {
    async fn run(
        &self,
        ctx: &OperationContext,
        cwd: &Utf8Path,
        args: &[String],
    ) -> Result<GitOutput, GitCommandError> {
        let command = self.render(args);
        debug!(command = %command, cwd = %cwd, "running git");

        let mut process = Command::new(self.binary.as_std_path());
        process
            .args(args)
            .current_dir(cwd.as_std_path())
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = ctx
            .run(process.output())
            .await
            .map_err(|source| GitCommandError::Interrupted {
                command: command.clone(),
                source,
            })?
            .map_err(|err| GitCommandError::Spawn {
                command: command.clone(),
                source: Arc::new(err),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if output.status.success() {
            return Ok(GitOutput { stdout, stderr });
        }

        let status = output.status.to_string();
        let detail = failure_detail(&stdout, &stderr, &status);
        debug!(command = %command, status = %status, "git failed");
        Err(GitCommandError::Failed {
            command,
            status,
            detail,
        })
    }
}
