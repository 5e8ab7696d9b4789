//! Debounced search input
//!
//! Decouples keystrokes from filtering: each submitted term fully replaces
//! the pending one, and the latest term is published once input has been
//! quiet for the settle window. Because a firing replaces the whole term
//! rather than applying a delta, out-of-order keystrokes cannot corrupt
//! state - the debounce is a rate-limiting convenience, not a correctness
//! requirement.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::trace;

/// Default settle window (the dashboard uses 300-500ms)
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(400);

/// Debounced search term publisher
pub struct SearchDebouncer {
    tx: mpsc::UnboundedSender<String>,
}

impl SearchDebouncer {
    /// Create a debouncer with the default settle window
    pub fn with_default() -> (Self, watch::Receiver<String>) {
        Self::new(DEFAULT_SETTLE)
    }

    /// Create a debouncer; published terms arrive on the returned watch
    /// receiver once input has settled.
    pub fn new(settle: Duration) -> (Self, watch::Receiver<String>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let (out_tx, out_rx) = watch::channel(String::new());

        tokio::spawn(async move {
            while let Some(mut term) = rx.recv().await {
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep(settle) => {
                            trace!(term = %term, "search term settled");
                            let _ = out_tx.send(term);
                            break;
                        }
                        next = rx.recv() => match next {
                            // A newer keystroke replaces the pending term
                            // and restarts the window
                            Some(t) => term = t,
                            // Input dropped: flush the pending term
                            None => {
                                let _ = out_tx.send(term);
                                return;
                            }
                        }
                    }
                }
            }
        });

        (Self { tx }, out_rx)
    }

    /// Submit a keystroke; replaces any pending term
    pub fn set(&self, term: impl Into<String>) {
        let _ = self.tx.send(term.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_publish_final_term_only() {
        let (debouncer, mut rx) = SearchDebouncer::new(Duration::from_millis(400));
        debouncer.set("s");
        debouncer.set("so");
        debouncer.set("sour");

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "sour");

        // No further publication pending
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_terms_publish_in_order() {
        let (debouncer, mut rx) = SearchDebouncer::new(Duration::from_millis(400));

        debouncer.set("rye");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "rye");

        debouncer.set("spelt");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "spelt");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_flushes_pending_term() {
        let (debouncer, mut rx) = SearchDebouncer::new(Duration::from_secs(3600));
        debouncer.set("flour");
        drop(debouncer);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "flour");
    }
}
