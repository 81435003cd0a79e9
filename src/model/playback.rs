//! Playback-related state observed by the presentation layer.

use crate::adapter::PlayerAdapter;
use crate::model::preferences::DEFAULT_VOLUME;
use crate::model::types::{PlaybackStatus, SessionId};

/// The live binding between one track and one external player instance.
///
/// At most one session exists at a time; the controller destroys the old
/// session before creating a successor and on engine shutdown.
pub struct PlayerSession {
    pub id: SessionId,
    pub video_id: String,
    /// Exclusively owned by the controller.
    pub handle: PlayerAdapter,
    /// Set once the player reported ready.
    pub is_ready: bool,
}

/// Complete playback information for rendering the playback surface.
///
/// Failure is part of this value rather than a control-flow event: when
/// `status` is [`PlaybackStatus::Unplayable`], `failure_reason` carries the
/// user-facing message and the fallback panel replaces the player.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub current_time_seconds: f64,
    pub duration_seconds: f64,
    /// Volume in `[0, 100]`.
    pub volume: u8,
    pub is_muted: bool,
    pub failure_reason: Option<String>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Idle,
            current_time_seconds: 0.0,
            duration_seconds: 0.0,
            volume: DEFAULT_VOLUME,
            is_muted: false,
            failure_reason: None,
        }
    }
}
