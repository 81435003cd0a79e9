//! Playback control operations

use super::PlaybackController;
use crate::model::{MAX_VOLUME, PlaybackStatus};

impl PlaybackController {
    /// Toggle between playing and paused. No-op without a live session; the
    /// status change itself arrives later as a player signal.
    pub async fn toggle_play_pause(&self) {
        let session = self.session.lock().await;
        let Some(session) = session.as_ref() else {
            return;
        };
        let status = self.state.lock().await.status;
        let result = match status {
            PlaybackStatus::Playing => session.handle.pause().await,
            _ => session.handle.play().await,
        };
        if let Err(e) = result {
            tracing::error!(error = %e, status = status.as_str(), "Play/pause command failed");
        }
    }

    /// Seek to `seconds`, clamped to `[0, duration]`. The local position
    /// updates immediately instead of waiting for the next poll tick.
    pub async fn seek(&self, seconds: f64) {
        {
            let session = self.session.lock().await;
            let Some(session) = session.as_ref() else {
                return;
            };
            let target = {
                let mut state = self.state.lock().await;
                let upper = state.duration_seconds.max(0.0);
                let target = if seconds.is_finite() {
                    seconds.clamp(0.0, upper)
                } else {
                    0.0
                };
                state.current_time_seconds = target;
                target
            };
            if let Err(e) = session.handle.seek_to(target).await {
                tracing::error!(error = %e, "Seek command failed");
            }
        }
        self.persist_preferences().await;
    }

    /// Set the volume, clamped to `[0, 100]`. Zero implies muted, a
    /// positive level unmutes. Persisted on every change.
    pub async fn set_volume(&self, level: u8) {
        let level = level.min(MAX_VOLUME);
        let muted = level == 0;
        {
            let mut state = self.state.lock().await;
            state.volume = level;
            state.is_muted = muted;
        }
        if !muted {
            *self.last_audible_volume.lock().await = level;
        }
        {
            let session = self.session.lock().await;
            if let Some(session) = session.as_ref() {
                if let Err(e) = session.handle.set_volume(level).await {
                    tracing::error!(error = %e, "Volume command failed");
                }
                if let Err(e) = session.handle.set_muted(muted).await {
                    tracing::error!(error = %e, "Mute command failed");
                }
            }
        }
        self.persist_preferences().await;
    }

    /// Toggle mute. Unmuting restores the last audible volume.
    pub async fn toggle_mute(&self) {
        let restore = *self.last_audible_volume.lock().await;
        let (muted, volume) = {
            let mut state = self.state.lock().await;
            let muted = !state.is_muted;
            state.is_muted = muted;
            if !muted && state.volume == 0 {
                state.volume = restore;
            }
            (muted, state.volume)
        };
        {
            let session = self.session.lock().await;
            if let Some(session) = session.as_ref() {
                if let Err(e) = session.handle.set_muted(muted).await {
                    tracing::error!(error = %e, "Mute command failed");
                }
                if !muted {
                    if let Err(e) = session.handle.set_volume(volume).await {
                        tracing::error!(error = %e, "Volume command failed");
                    }
                }
            }
        }
        self.persist_preferences().await;
    }
}
