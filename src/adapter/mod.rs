//! External player adapter
//!
//! Owns the lifecycle of exactly one third-party player instance bound to
//! one video id: script bootstrap, readiness polling, instantiation, and
//! teardown. It is organized into submodules by responsibility:
//!
//! - `host`: the injectable seams (`EmbedHost`, `EmbedPlayer`) and the
//!   closed signal set
//! - `bootstrap`: process-wide single-flight script loading
//! - `errors`: the failure taxonomy and the fixed error messages

mod bootstrap;
mod errors;
mod host;

pub use bootstrap::ScriptLoader;
pub use errors::{
    AdapterError, MSG_INVALID_URL, MSG_LOAD_FAILED, MSG_PLAYER_UNAVAILABLE, message_for_code,
};
pub use host::{EmbedHost, EmbedPlayer, PlayerSignal, SessionEvent};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use tokio::sync::mpsc;

use crate::config::EngineConfig;
use crate::model::SessionId;

/// Handle to one third-party player instance.
///
/// Commands on a destroyed handle are silent no-ops: the controller may
/// still hold the handle briefly while a teardown races a user operation.
pub struct PlayerAdapter {
    session: SessionId,
    player: Box<dyn EmbedPlayer>,
    initial_volume: u8,
    destroyed: AtomicBool,
}

impl PlayerAdapter {
    /// Create a player bound to `video_id`.
    ///
    /// Ensures the control script is injected exactly once process-wide,
    /// then polls (bounded attempts, fixed delay) until script and mount
    /// element are both ready, and instantiates the player muted so the
    /// browser's autoplay policy lets playback start. The requested volume
    /// is applied later, when the ready signal arrives.
    pub async fn create(
        embed: &Arc<dyn EmbedHost>,
        loader: &ScriptLoader,
        config: &EngineConfig,
        session: SessionId,
        video_id: &str,
        initial_volume: u8,
        events: mpsc::Sender<SessionEvent>,
    ) -> Result<Self, AdapterError> {
        loader
            .ensure_loaded(embed.as_ref())
            .await
            .map_err(AdapterError::ScriptInjection)?;

        let mut ready = false;
        for attempt in 0..config.bootstrap_poll_attempts {
            if embed.script_ready() && embed.mount_ready(&config.mount_point_id) {
                ready = true;
                break;
            }
            tracing::trace!(attempt, "Waiting for control script and mount point");
            tokio::time::sleep(config.bootstrap_poll_interval).await;
        }
        if !ready {
            return Err(AdapterError::BootstrapTimeout {
                attempts: config.bootstrap_poll_attempts,
            });
        }

        let player = embed
            .instantiate(&config.mount_point_id, video_id, session, events)
            .await
            .map_err(AdapterError::Instantiate)?;

        tracing::debug!(session = session.0, video_id, "Player instance created");
        Ok(Self {
            session,
            player,
            initial_volume,
            destroyed: AtomicBool::new(false),
        })
    }

    fn live(&self) -> Option<&dyn EmbedPlayer> {
        (!self.destroyed.load(Ordering::SeqCst)).then(|| self.player.as_ref())
    }

    /// Apply the volume requested at creation and lift the instantiation
    /// mute, unless the stored preference keeps the player muted. Called
    /// once the ready signal arrives.
    pub async fn apply_ready_volume(&self, keep_muted: bool) -> Result<()> {
        let Some(player) = self.live() else {
            return Ok(());
        };
        player.set_volume(self.initial_volume).await?;
        if !keep_muted {
            player.set_muted(false).await?;
        }
        Ok(())
    }

    pub async fn play(&self) -> Result<()> {
        match self.live() {
            Some(player) => player.play().await,
            None => Ok(()),
        }
    }

    pub async fn pause(&self) -> Result<()> {
        match self.live() {
            Some(player) => player.pause().await,
            None => Ok(()),
        }
    }

    pub async fn seek_to(&self, seconds: f64) -> Result<()> {
        match self.live() {
            Some(player) => player.seek_to(seconds).await,
            None => Ok(()),
        }
    }

    pub async fn set_volume(&self, level: u8) -> Result<()> {
        match self.live() {
            Some(player) => player.set_volume(level).await,
            None => Ok(()),
        }
    }

    pub async fn set_muted(&self, muted: bool) -> Result<()> {
        match self.live() {
            Some(player) => player.set_muted(muted).await,
            None => Ok(()),
        }
    }

    pub async fn is_muted(&self) -> bool {
        match self.live() {
            Some(player) => player.is_muted().await.unwrap_or(false),
            None => false,
        }
    }

    pub async fn current_time(&self) -> Result<f64> {
        match self.live() {
            Some(player) => player.current_time().await,
            None => Ok(0.0),
        }
    }

    /// Tear down the underlying instance.
    ///
    /// Safe to call repeatedly and on a handle that never finished
    /// initializing; teardown errors are logged and swallowed. The
    /// controller drops the session id before calling this, so signals that
    /// raced the teardown are discarded upstream.
    pub async fn destroy(&self) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.player.destroy().await {
            tracing::debug!(session = self.session.0, error = %e, "Player teardown reported an error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    /// Embed host whose script never becomes ready.
    #[derive(Default)]
    struct StuckHost {
        checks: AtomicU32,
    }

    #[async_trait]
    impl EmbedHost for StuckHost {
        async fn inject_script(&self) -> Result<()> {
            Ok(())
        }

        fn script_ready(&self) -> bool {
            self.checks.fetch_add(1, Ordering::SeqCst);
            false
        }

        fn mount_ready(&self, _mount_id: &str) -> bool {
            true
        }

        async fn instantiate(
            &self,
            _mount_id: &str,
            _video_id: &str,
            _session: SessionId,
            _events: mpsc::Sender<SessionEvent>,
        ) -> Result<Box<dyn EmbedPlayer>> {
            anyhow::bail!("unreachable when the script never loads")
        }
    }

    fn quick_config() -> EngineConfig {
        EngineConfig {
            bootstrap_poll_interval: Duration::from_millis(1),
            bootstrap_poll_attempts: 3,
            ..EngineConfig::default()
        }
    }

    /// Bootstrap gives up after the configured attempt cap instead of
    /// polling forever.
    #[tokio::test]
    async fn bootstrap_times_out_after_attempt_cap() {
        let embed: Arc<dyn EmbedHost> = Arc::new(StuckHost::default());
        let (tx, _rx) = mpsc::channel(8);

        let result = PlayerAdapter::create(
            &embed,
            &ScriptLoader::new(),
            &quick_config(),
            SessionId(1),
            "dQw4w9WgXcQ",
            80,
            tx,
        )
        .await;

        match result {
            Err(AdapterError::BootstrapTimeout { attempts }) => assert_eq!(attempts, 3),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected bootstrap timeout"),
        }
    }
}
