//! Debounced search input.
//!
//! Each keystroke restarts the window; only the last value within it is
//! committed to the action loop. Cancellation is cooperative via
//! [`CancellationToken`], so a superseded task never fires.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::action::Action;

/// Restartable one-shot timer that commits the latest search text.
pub struct Debouncer {
    action_tx: UnboundedSender<Action>,
    window: Duration,
    pending: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new(action_tx: UnboundedSender<Action>, window: Duration) -> Self {
        Self {
            action_tx,
            window,
            pending: None,
        }
    }

    /// Schedule `text` for commit after the window elapses, cancelling
    /// any commit still pending.
    pub fn debounce(&mut self, text: String) {
        self.cancel();

        let token = CancellationToken::new();
        let task_token = token.clone();
        let tx = self.action_tx.clone();
        let window = self.window;

        tokio::spawn(async move {
            tokio::select! {
                () = task_token.cancelled() => {
                    trace!("debounced search superseded");
                }
                () = tokio::time::sleep(window) => {
                    let _ = tx.send(Action::SearchCommitted(text));
                }
            }
        });

        self.pending = Some(token);
    }

    /// Drop any pending commit without firing it.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
