//! Request context threaded through every rule evaluation.
//!
//! A `Context` carries external cancellation: an explicit cancel signal
//! (caller disconnect) and/or a deadline. Waiting on key locks and every rule
//! hook race against `Context::cancelled`.

use std::future::pending;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::time::{sleep_until, Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Own signal last; earlier entries belong to ancestors.
    cancel: Vec<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels the `Context` it was created with and every context derived from it.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Resolves once `rx` reads `true`. A sender dropped without cancelling never fires.
async fn signalled(mut rx: watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return pending::<()>().await;
        }
    }
}

impl Context {
    /// Never cancelled, no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Cancellable child context. Cancelling the parent still cancels the
    /// child; the handle only reaches the child and its descendants.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let mut cancel = self.cancel.clone();
        cancel.push(rx);
        let ctx = Self {
            cancel,
            deadline: self.deadline,
        };
        (ctx, CancelHandle { tx })
    }

    /// Context that expires after `timeout`, or earlier if the parent deadline is sooner.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let at = Instant::now() + timeout;
        Self {
            cancel: self.cancel.clone(),
            deadline: Some(self.deadline.map_or(at, |cur| cur.min(at))),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        if let Some(d) = self.deadline {
            if Instant::now() >= d {
                return true;
            }
        }
        self.cancel.iter().any(|rx| *rx.borrow())
    }

    /// Resolves once this context or any ancestor is cancelled, or the
    /// deadline passes. Pending forever for a background context.
    pub async fn cancelled(&self) {
        let deadline = async {
            match self.deadline {
                Some(at) => sleep_until(at).await,
                None => pending::<()>().await,
            }
        };
        let signal = async {
            let mut waits: FuturesUnordered<_> =
                self.cancel.iter().cloned().map(signalled).collect();
            if waits.next().await.is_none() {
                pending::<()>().await;
            }
        };
        tokio::select! {
            _ = deadline => {}
            _ = signal => {}
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tokio::time::timeout;

    #[tokio::test]
    async fn background_never_cancels() {
        let ctx = Context::background();
        assert!(!ctx.is_cancelled());
        assert!(timeout(Duration::from_millis(20), ctx.cancelled()).await.is_err());
    }

    #[tokio::test]
    async fn cancel_handle_wakes_waiters() {
        let (ctx, handle) = Context::background().with_cancel();
        let waiter = {
            let ctx = ctx.clone();
            tokio::spawn(async move { ctx.cancelled().await })
        };
        handle.cancel();
        timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn parent_cancel_reaches_nested_children() {
        let (parent, handle) = Context::background().with_cancel();
        let (child, _child_handle) = parent.with_cancel();
        let grandchild = child.with_timeout(Duration::from_secs(60));

        handle.cancel();
        timeout(Duration::from_millis(100), child.cancelled()).await.unwrap();
        timeout(Duration::from_millis(100), grandchild.cancelled()).await.unwrap();
        assert!(child.is_cancelled());
        assert!(grandchild.is_cancelled());
    }

    #[tokio::test]
    async fn child_cancel_leaves_parent_running() {
        let (parent, _handle) = Context::background().with_cancel();
        let (child, child_handle) = parent.with_cancel();

        child_handle.cancel();
        timeout(Duration::from_millis(100), child.cancelled()).await.unwrap();
        assert!(!parent.is_cancelled());
        assert!(timeout(Duration::from_millis(20), parent.cancelled()).await.is_err());
    }

    #[tokio::test]
    async fn dropped_handle_does_not_cancel() {
        let (ctx, handle) = Context::background().with_cancel();
        drop(handle);
        assert!(timeout(Duration::from_millis(20), ctx.cancelled()).await.is_err());
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test]
    async fn deadline_expires() {
        let ctx = Context::background().with_timeout(Duration::from_millis(10));
        timeout(Duration::from_secs(1), ctx.cancelled()).await.unwrap();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn nested_timeout_keeps_earlier_deadline() {
        let outer = Context::background().with_timeout(Duration::from_secs(1));
        let inner = outer.with_timeout(Duration::from_secs(60));
        assert_eq!(inner.deadline(), outer.deadline());
    }
}
