//! Execution context for a single orchestration call
//!
//! `FlowContext` is created by the caller (an RPC handler or the CLI) and
//! threaded unchanged through every step of an orchestrator. It carries the
//! request identity, an optional deadline and a cancellation signal.
//! Collaborators receive it too, so long-running calls can observe it.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use application::FlowContext;
//!
//! let ctx = FlowContext::new().with_timeout(Duration::from_secs(5));
//! let handle = ctx.cancellation_handle();
//!
//! assert!(!ctx.is_cancelled());
//! handle.cancel();
//! assert!(ctx.is_cancelled());
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::Instant;
use uuid::Uuid;

use crate::error::ApplicationError;

/// Context for one orchestration call, carrying identity, deadline and cancellation
#[derive(Debug, Clone)]
pub struct FlowContext {
    request_id: Uuid,
    received_at: DateTime<Utc>,
    deadline: Option<Instant>,
    cancel: Arc<watch::Sender<bool>>,
}

/// Handle that cancels every clone of the context it was taken from
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Signal cancellation
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }
}

impl Default for FlowContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowContext {
    /// Create a context with no deadline
    #[must_use]
    pub fn new() -> Self {
        Self::with_request_id(Uuid::new_v4())
    }

    /// Create a context correlated with an upstream request ID
    #[must_use]
    pub fn with_request_id(request_id: Uuid) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            request_id,
            received_at: Utc::now(),
            deadline: None,
            cancel: Arc::new(tx),
        }
    }

    /// Set a deadline relative to now
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Set an absolute deadline
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Get a handle that can cancel this context
    #[must_use]
    pub fn cancellation_handle(&self) -> CancelHandle {
        CancelHandle {
            cancel: Arc::clone(&self.cancel),
        }
    }

    /// Get the unique request identifier
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Get the timestamp when the request was received
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Get the deadline, if any
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline (zero once it has passed)
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Whether cancellation has been signalled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Whether the deadline has passed
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail fast if the context is cancelled or expired
    pub fn check(&self) -> Result<(), ApplicationError> {
        if self.is_cancelled() {
            return Err(ApplicationError::Cancelled);
        }
        if self.is_expired() {
            return Err(ApplicationError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Make a collaborator call, aborting it on cancellation or deadline
    ///
    /// `call` is not invoked at all if the context is already done.
    pub async fn run<T, F, Fut>(&self, call: F) -> Result<T, ApplicationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApplicationError>>,
    {
        self.check()?;
        let call = call();

        tokio::select! {
            biased;
            () = self.cancelled() => Err(ApplicationError::Cancelled),
            () = self.deadline_reached() => Err(ApplicationError::DeadlineExceeded),
            result = call => result,
        }
    }

    /// Resolves once cancellation is signalled
    pub async fn cancelled(&self) {
        let mut rx = self.cancel.subscribe();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            // The sender lives as long as `self`, so this only fails on teardown.
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    async fn deadline_reached(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn new_creates_unique_request_id() {
        let ctx1 = FlowContext::new();
        let ctx2 = FlowContext::new();

        assert_ne!(ctx1.request_id(), ctx2.request_id());
        assert!(!ctx1.request_id().is_nil());
    }

    #[test]
    fn with_request_id_uses_provided_id() {
        let request_id = Uuid::new_v4();
        let ctx = FlowContext::with_request_id(request_id);

        assert_eq!(ctx.request_id(), request_id);
        assert!(ctx.deadline().is_none());
        assert!(ctx.remaining().is_none());
    }

    #[test]
    fn cancellation_reaches_clones() {
        let ctx = FlowContext::new();
        let clone = ctx.clone();

        ctx.cancellation_handle().cancel();

        assert!(clone.is_cancelled());
        assert!(matches!(clone.check(), Err(ApplicationError::Cancelled)));
    }

    #[tokio::test]
    async fn run_returns_call_result() {
        let ctx = FlowContext::new().with_timeout(Duration::from_secs(5));

        let value = ctx
            .run(|| async { Ok::<_, ApplicationError>(42) })
            .await
            .unwrap();

        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn run_skips_call_when_already_cancelled() {
        let ctx = FlowContext::new();
        ctx.cancellation_handle().cancel();

        let invoked = Cell::new(false);
        let result = ctx
            .run(|| {
                invoked.set(true);
                async { Ok::<_, ApplicationError>(()) }
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::Cancelled)));
        assert!(!invoked.get());
    }

    #[tokio::test]
    async fn run_aborts_at_deadline() {
        let ctx = FlowContext::new().with_timeout(Duration::from_millis(50));

        let result = ctx
            .run(|| async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, ApplicationError>(())
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::DeadlineExceeded)));
        assert!(ctx.is_expired());
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
    }

    #[tokio::test]
    async fn run_observes_cancellation_in_flight() {
        let ctx = FlowContext::new();
        let handle = ctx.cancellation_handle();

        let call = || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, ApplicationError>(())
        };
        let canceller = async {
            tokio::task::yield_now().await;
            handle.cancel();
        };

        let (result, ()) = tokio::join!(ctx.run(call), canceller);

        assert!(matches!(result, Err(ApplicationError::Cancelled)));
    }
}
