use std::{future::Future, time::Duration};

use tokio::{sync::watch, time::Instant};

use crate::error::RoutingError;

/// Cancellation and deadline carried through one route request.
///
/// Clones observe the same cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancelled: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels every [`RequestContext`] derived from the same
/// [`RequestContext::with_cancellation`] call.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl RequestContext {
    /// Never cancelled, no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Keeps the earlier of the existing and the new deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_cancellation(mut self) -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        self.cancelled = Some(receiver);
        (self, CancelHandle { sender })
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|receiver| *receiver.borrow())
    }

    /// Resolves once cancelled. Pends forever if the handle is dropped
    /// without cancelling.
    async fn cancellation(&self) {
        let Some(receiver) = &self.cancelled else {
            return std::future::pending().await;
        };

        let mut receiver = receiver.clone();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    async fn expiry(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }

    /// Runs `operation` unless the context is cancelled or its deadline
    /// passes first.
    pub async fn guard<F: Future>(&self, operation: F) -> Result<F::Output, RoutingError> {
        if self.is_cancelled() {
            return Err(RoutingError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancellation() => Err(RoutingError::Cancelled),
            _ = self.expiry() => Err(RoutingError::DeadlineExceeded),
            output = operation => Ok(output),
        }
    }
}
