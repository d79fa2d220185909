//! Client-wide stop signal.
//!
//! A [`CancellationToken`] has two states, active and stopped. The
//! transition happens at most once and is never undone. Every operation of
//! one client holds a clone of the same token:
//!
//! - the poll loop races each attempt and each inter-attempt sleep against
//!   [`CancellationToken::cancelled`];
//! - transports receive the token in their request options and drop the
//!   in-flight request when it fires, which closes the socket instead of
//!   waiting out the request timeout.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared stop signal for one anchor service client.
///
/// Cloning is cheap and every clone observes the same state.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    stopped: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// Create an active token.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            stopped: Arc::new(tx),
        }
    }

    /// Stop the token and wake every waiter.
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// token was already stopped.
    pub fn cancel(&self) -> bool {
        self.stopped.send_if_modified(|stopped| {
            if *stopped {
                false
            } else {
                *stopped = true;
                true
            }
        })
    }

    /// Whether the token has been stopped.
    pub fn is_cancelled(&self) -> bool {
        *self.stopped.borrow()
    }

    /// Resolve once the token is stopped. Resolves immediately if it
    /// already is.
    pub async fn cancelled(&self) {
        let mut rx = self.stopped.subscribe();
        // The sender lives as long as `self`, so this only returns once stopped.
        let _ = rx.wait_for(|stopped| *stopped).await;
    }

    /// Number of tasks currently waiting on [`Self::cancelled`].
    pub fn waiter_count(&self) -> usize {
        self.stopped.receiver_count()
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn cancel_transitions_once() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.cancel());
        assert!(token.is_cancelled());
        assert!(!token.cancel(), "second cancel must be a no-op");
        assert!(token.is_cancelled());
    }

    #[test]
    fn clones_share_state() {
        let token = CancellationToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_immediately_when_stopped() {
        let token = CancellationToken::new();
        token.cancel();
        tokio::time::timeout(Duration::from_millis(50), token.cancelled())
            .await
            .expect("already-stopped token must resolve at once");
    }

    #[tokio::test]
    async fn cancel_wakes_every_waiter() {
        let token = CancellationToken::new();
        let waiters: Vec<_> = (0..8)
            .map(|_| {
                let t = token.clone();
                tokio::spawn(async move { t.cancelled().await })
            })
            .collect();

        // Let every waiter subscribe before stopping.
        while token.waiter_count() < 8 {
            tokio::task::yield_now().await;
        }
        token.cancel();

        for w in waiters {
            tokio::time::timeout(Duration::from_secs(1), w)
                .await
                .expect("waiter should wake")
                .unwrap();
        }
        assert_eq!(token.waiter_count(), 0);
    }
}
