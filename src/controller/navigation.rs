//! Playlist navigation
//!
//! The hosting page owns the playlist and the selection; the engine only
//! requests index changes. Boundaries never wrap, and an index the page
//! reports outside the playlist navigates nowhere.

use super::PlaybackController;

impl PlaybackController {
    /// Request the next track. No-op at (or beyond) the last index.
    pub fn next(&self) {
        let len = self.host.playlist().len();
        let Some(index) = self.host.current_index() else {
            return;
        };
        if index >= len.saturating_sub(1) {
            tracing::debug!(index, "Already at the last track");
            return;
        }
        self.host.request_index_change(index + 1);
    }

    /// Request the previous track. No-op at the first index.
    pub fn previous(&self) {
        let len = self.host.playlist().len();
        let Some(index) = self.host.current_index() else {
            return;
        };
        if index == 0 || index >= len {
            return;
        }
        self.host.request_index_change(index - 1);
    }

    /// Delegate shuffling to the page when it supports it. The engine has
    /// no opinion on the shuffle algorithm.
    pub fn shuffle(&self) {
        if self.host.supports_shuffle() {
            self.host.request_shuffle();
        }
    }
}
