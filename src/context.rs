//! Cancellable, deadline-bearing execution context
//!
//! Every operation that may wait on the network takes a [`CallContext`].
//! Cancelling the context, or letting its deadline pass, aborts the
//! in-flight operation with [`HomecastError::Cancelled`] or
//! [`HomecastError::DeadlineExceeded`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{HomecastError, Result};

/// Execution context for a single call
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// Create a context that never expires on its own
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that expires after `timeout`
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Create a context that expires at `deadline`
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Create a context driven by an existing cancellation token
    #[must_use]
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Derive a context cancelled together with this one
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Derive a child context whose deadline is at most `timeout` from now
    #[must_use]
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let local = Instant::now() + timeout;
        Self {
            token: self.token.child_token(),
            deadline: Some(self.deadline.map_or(local, |parent| parent.min(local))),
        }
    }

    /// Cancel this context and every context derived from it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check whether this context was cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Deadline of this context, if any
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The cancellation token backing this context
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Run `future` until it completes, the context is cancelled, or the
    /// deadline passes
    ///
    /// # Errors
    ///
    /// Returns the future's own error, `Cancelled`, or `DeadlineExceeded`.
    pub async fn run<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.token.is_cancelled() {
            return Err(HomecastError::Cancelled);
        }

        let guarded = async {
            tokio::select! {
                biased;
                () = self.token.cancelled() => Err(HomecastError::Cancelled),
                result = future => result,
            }
        };

        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, guarded)
                .await
                .map_err(|_| HomecastError::DeadlineExceeded)?,
            None => guarded.await,
        }
    }
}
