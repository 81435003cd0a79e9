//! Recovery affordances for unplayable tracks.
//!
//! Policy: a confirmed-broken video is never retried automatically. The
//! three affordances hand control back to the user instead: open the
//! original link externally, search for the track manually, or skip ahead
//! through the navigator.

use crate::adapter::MSG_LOAD_FAILED;
use crate::controller::PlaybackController;
use crate::model::{PlaybackStatus, Track};

/// Base URL of the manual-search affordance.
const SEARCH_BASE_URL: &str = "https://www.youtube.com/results?search_query=";

/// The recovery options offered while the current track is unplayable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackPlan {
    /// Why playback failed, as shown to the user.
    pub reason: String,
    /// The track's original link, opened in a new context. Absent when the
    /// track carries no URL at all.
    pub watch_url: Option<String>,
    /// A search for `title artist`, opened in a new context.
    pub search_url: String,
    /// Whether skip-to-next can do anything.
    pub has_next: bool,
}

/// One user-chosen recovery action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackAction {
    WatchExternally,
    SearchManually,
    SkipToNext,
}

fn search_url_for(track: &Track) -> String {
    let query = format!("{} {}", track.title, track.artist);
    format!("{SEARCH_BASE_URL}{}", urlencoding::encode(query.trim()))
}

impl PlaybackController {
    /// The recovery options for the current track. Present exactly while
    /// the track is unplayable.
    pub async fn fallback_plan(&self) -> Option<FallbackPlan> {
        let reason = {
            let state = self.state.lock().await;
            if state.status != PlaybackStatus::Unplayable {
                return None;
            }
            state
                .failure_reason
                .clone()
                .unwrap_or_else(|| MSG_LOAD_FAILED.to_string())
        };

        let index = self.host.current_index()?;
        let playlist = self.host.playlist();
        let track = playlist.get(index)?;

        Some(FallbackPlan {
            reason,
            watch_url: (!track.external_url.is_empty()).then(|| track.external_url.clone()),
            search_url: search_url_for(track),
            has_next: index + 1 < playlist.len(),
        })
    }

    /// Execute one recovery action. No-op when no plan is active.
    pub async fn apply_fallback(&self, action: FallbackAction) {
        let Some(plan) = self.fallback_plan().await else {
            return;
        };
        match action {
            FallbackAction::WatchExternally => {
                if let Some(url) = plan.watch_url {
                    self.host.open_url(&url);
                }
            }
            FallbackAction::SearchManually => self.host.open_url(&plan.search_url),
            FallbackAction::SkipToNext => self.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The search URL percent-encodes the `title artist` query.
    #[test]
    fn search_url_is_percent_encoded() {
        let track = Track {
            title: "Amazing Grace".to_string(),
            artist: "Choir & Friends".to_string(),
            external_url: String::new(),
            collection_label: String::new(),
        };
        assert_eq!(
            search_url_for(&track),
            "https://www.youtube.com/results?search_query=Amazing%20Grace%20Choir%20%26%20Friends"
        );
    }

    /// Blank metadata still yields a usable (if empty) query.
    #[test]
    fn search_url_trims_blank_metadata() {
        let track = Track {
            title: String::new(),
            artist: "Solo".to_string(),
            external_url: String::new(),
            collection_label: String::new(),
        };
        assert_eq!(
            search_url_for(&track),
            "https://www.youtube.com/results?search_query=Solo"
        );
    }
}
