//! Core type definitions for the playback engine

/// Lifecycle of the selected track's player session.
///
/// Exactly one value at a time; every change goes through the controller's
/// transition function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// No track selected, or nothing resolved yet.
    #[default]
    Idle,
    /// A video id was extracted and a player instance is being created.
    Resolving,
    /// The player is ready and playback has been requested.
    Buffering,
    Playing,
    Paused,
    /// The track ran to its natural end.
    Ended,
    /// The track cannot be played; the fallback panel takes over.
    Unplayable,
}

impl PlaybackStatus {
    /// Short label for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Idle => "idle",
            PlaybackStatus::Resolving => "resolving",
            PlaybackStatus::Buffering => "buffering",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Ended => "ended",
            PlaybackStatus::Unplayable => "unplayable",
        }
    }
}

/// Identity of one live player binding.
///
/// Ids come from a monotonic counter. Player signals carry the id of the
/// session that produced them, so a signal arriving after its session was
/// torn down is discarded instead of resurrecting state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);
