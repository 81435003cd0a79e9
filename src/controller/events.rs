//! Player signal pump.
//!
//! One task consumes the single ordered signal stream. Filtering happens
//! here: a signal whose session is no longer live is discarded instead of
//! resurrecting state for a torn-down player.

use tokio::sync::mpsc;

use super::PlaybackController;
use crate::adapter::SessionEvent;

impl PlaybackController {
    pub(crate) fn start_event_pump(&self, mut events: mpsc::Receiver<SessionEvent>) {
        let controller = self.clone();
        tracing::debug!("Starting player signal pump");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if controller.is_shut_down().await {
                    break;
                }
                controller.dispatch_event(event).await;
            }
            tracing::debug!("Player signal pump stopped");
        });
    }

    /// Fold one tagged signal into the machine, unless its session has been
    /// torn down in the meantime.
    pub(crate) async fn dispatch_event(&self, event: SessionEvent) {
        if !self.is_live_session(event.session).await {
            tracing::trace!(
                session = event.session.0,
                "Discarding signal from torn-down session"
            );
            return;
        }
        self.apply_signal(event.session, event.signal).await;
    }
}
