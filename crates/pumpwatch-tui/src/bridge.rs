//! Bridge between `pumpwatch-core`'s renderer seam and the action loop.
//!
//! The controller is synchronous and pushes every visible change through
//! its [`Renderer`]; here each push becomes an [`Action`] on the app's
//! unbounded channel, so drawing stays in the main loop.

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use pumpwatch_core::{AlertRecord, MessageKind, Renderer, StatusCounts};

use crate::action::{Action, Notification};

/// Renderer implementation that forwards controller output as actions.
pub struct ActionRenderer {
    action_tx: UnboundedSender<Action>,
}

impl ActionRenderer {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }

    fn send(&self, action: Action) {
        // The receiver only drops during shutdown; nothing to draw then.
        if self.action_tx.send(action).is_err() {
            warn!("action channel closed, dropping controller output");
        }
    }
}

impl Renderer for ActionRenderer {
    fn render_list(&mut self, records: &[AlertRecord]) {
        self.send(Action::ListUpdated(records.to_vec()));
    }

    fn render_counts(&mut self, counts: StatusCounts) {
        self.send(Action::CountsUpdated(counts));
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        self.send(Action::Notify(Notification::new(kind.into(), text)));
    }
}
