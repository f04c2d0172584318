//! Caller-supplied cancellation and deadline context.
//!
//! Every remote call and git process invocation runs through
//! [`OperationContext::run`], which races the operation against the caller's
//! cancellation token and an optional timeout. Dropping the raced future is
//! the cancellation mechanism: HTTP requests are aborted and git children are
//! spawned with `kill_on_drop`.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Cancellation and timeout signal for a single synchronous call chain.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    token: CancellationToken,
    timeout: Option<Duration>,
}

impl OperationContext {
    /// Creates a context with a fresh token and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context observing an existing cancellation token.
    #[must_use]
    pub const fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            timeout: None,
        }
    }

    /// Sets a per-operation timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns a context whose token is cancelled with this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            timeout: self.timeout,
        }
    }

    /// Returns the cancellation token.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Signals cancellation to every operation observing this context.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Fails immediately when the context is already cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Cancelled`] after [`Self::cancel`].
    pub fn check(&self) -> Result<(), ContextError> {
        if self.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        Ok(())
    }

    /// Runs `operation` until it completes, the token fires, or the timeout
    /// elapses.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError`] when the operation is abandoned.
    pub async fn run<F, T>(&self, operation: F) -> Result<T, ContextError>
    where
        F: Future<Output = T>,
    {
        self.check()?;
        let guarded = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, operation)
                    .await
                    .map_err(|_| ContextError::TimedOut(limit)),
                None => Ok(operation.await),
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(ContextError::Cancelled),
            result = guarded => result,
        }
    }
}

/// Reasons an operation was abandoned by its context.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ContextError {
    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,
    /// The operation exceeded its deadline.
    #[error("operation timed out after {0:?}")]
    TimedOut(Duration),
}
