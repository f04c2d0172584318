//! Git process execution port.

use crate::context::{ContextError, OperationContext};
use async_trait::async_trait;
use camino::Utf8Path;
use std::sync::Arc;
use thiserror::Error;

/// Captured output of a successful git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl GitOutput {
    /// Creates output carrying only stdout.
    #[must_use]
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Returns stdout with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Runs git with an explicit working directory per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Runs `git <args>` in `cwd`.
    ///
    /// # Errors
    ///
    /// Returns [`GitCommandError`] when the process cannot start, exits
    /// non-zero, or is abandoned by the context.
    async fn run(
        &self,
        ctx: &OperationContext,
        cwd: &Utf8Path,
        args: &[String],
    ) -> Result<GitOutput, GitCommandError>;
}

/// Errors returned by [`GitRunner`] implementations.
///
/// `command` is the rendered invocation (`git clone ...`) with credentials
/// never included.
#[derive(Debug, Clone, Error)]
pub enum GitCommandError {
    /// The git binary could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Rendered command.
        command: String,
        /// Operating-system error.
        source: Arc<std::io::Error>,
    },

    /// Git exited unsuccessfully.
    #[error("`{command}` failed ({status}): {detail}")]
    Failed {
        /// Rendered command.
        command: String,
        /// Exit status description.
        status: String,
        /// Combined stderr and stdout.
        detail: String,
    },

    /// The context cancelled or timed out the command.
    #[error("`{command}` interrupted: {source}")]
    Interrupted {
        /// Rendered command.
        command: String,
        /// Cancellation cause.
        source: ContextError,
    },
}

impl GitCommandError {
    /// Returns the rendered command.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. }
            | Self::Failed { command, .. }
            | Self::Interrupted { command, .. } => command,
        }
    }
}
