//! Hosting-page interface.
//!
//! The page owns the playlist, the selection, and the browsing context. The
//! engine observes them through this trait and never mutates the playlist;
//! index changes are requested through the page, which answers by calling
//! [`PlaybackController::handle_track_change`](crate::controller::PlaybackController::handle_track_change).

use crate::model::Track;

pub trait HostPage: Send + Sync {
    /// The current ordered playlist.
    fn playlist(&self) -> Vec<Track>;

    /// The selected position, `None` when the playlist is empty.
    fn current_index(&self) -> Option<usize>;

    /// Ask the page to select a different track.
    fn request_index_change(&self, index: usize);

    /// Whether the page supplies a shuffle operation.
    fn supports_shuffle(&self) -> bool {
        false
    }

    /// Delegate shuffling entirely to the page. The engine has no opinion
    /// on the shuffle algorithm.
    fn request_shuffle(&self) {}

    /// Open a URL in a new browsing context.
    fn open_url(&self, url: &str);
}
