//! # Toast Notifications
//!
//! Transient "Added to cart!" style messages. A toast is fire-and-forget:
//! it expires after a fixed delay and never touches cart state.
//!
//! ## Expiry
//! ```text
//! push("Added to cart!") ── expires_at = now + ttl (2s default)
//!         │
//!         ▼
//! event loop: select! { next input line | sleep_until(next_deadline) }
//!         │                                        │
//!         │                                        ▼
//!         │                                  prune_expired()
//!         ▼
//! header shows active() toasts until they expire
//! ```

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// A message with an expiry time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

/// Queue of live toasts. All toasts share one TTL, so the queue is ordered
/// by expiry.
#[derive(Debug)]
pub struct Notifier {
    ttl: Duration,
    toasts: VecDeque<Toast>,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Notifier {
            ttl,
            toasts: VecDeque::new(),
        }
    }

    /// Shows a toast until `now + ttl`.
    pub fn push(&mut self, message: impl Into<String>) {
        let toast = Toast {
            message: message.into(),
            expires_at: Instant::now() + self.ttl,
        };
        debug!(message = %toast.message, "Toast shown");
        self.toasts.push_back(toast);
    }

    /// When the oldest toast expires, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.toasts.front().map(|t| t.expires_at)
    }

    /// Drops every expired toast and returns how many were dropped.
    pub fn prune_expired(&mut self) -> usize {
        let now = Instant::now();
        let mut dropped = 0;
        while self.toasts.front().is_some_and(|t| t.expires_at <= now) {
            self.toasts.pop_front();
            dropped += 1;
        }
        if dropped > 0 {
            debug!(dropped, "Toasts expired");
        }
        dropped
    }

    /// Toasts that have not expired yet.
    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        let now = Instant::now();
        self.toasts.iter().filter(move |t| t.expires_at > now)
    }
}

/// Sleeps until `deadline`, or forever when there is nothing to expire.
pub async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_ttl() {
        let mut notifier = Notifier::new(Duration::from_secs(2));
        notifier.push("Added to cart!");

        assert_eq!(notifier.active().count(), 1);

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert_eq!(notifier.prune_expired(), 0);
        assert_eq!(notifier.active().count(), 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(notifier.active().count(), 0);
        assert_eq!(notifier.prune_expired(), 1);
        assert!(notifier.next_deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadlines_follow_push_order() {
        let mut notifier = Notifier::new(Duration::from_secs(2));
        notifier.push("first");
        let first_deadline = notifier.next_deadline().unwrap();

        tokio::time::advance(Duration::from_secs(1)).await;
        notifier.push("second");

        assert_eq!(notifier.next_deadline(), Some(first_deadline));

        sleep_until(notifier.next_deadline()).await;
        assert_eq!(notifier.prune_expired(), 1);

        let remaining: Vec<&str> = notifier.active().map(|t| t.message.as_str()).collect();
        assert_eq!(remaining, vec!["second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_without_deadline_never_fires() {
        let slept = tokio::time::timeout(Duration::from_secs(60), sleep_until(None)).await;
        assert!(slept.is_err());
    }
}
