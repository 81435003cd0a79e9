//! Injectable seams to the third-party embedded player.
//!
//! The engine never talks to the browser directly; everything it needs from
//! the page's player environment goes through these traits, so the whole
//! engine runs (and tests) without a browser.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::model::SessionId;

/// Closed set of signals a player instance reports over its lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerSignal {
    /// The instance finished initializing and knows its duration.
    Ready { duration_seconds: f64 },
    /// Playback is running.
    Playing { duration_seconds: f64 },
    Paused,
    /// The video ran to its natural end.
    Ended,
    /// The player reported a numeric error code.
    Error { code: u32 },
}

/// One player signal tagged with the session that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionEvent {
    pub session: SessionId,
    pub signal: PlayerSignal,
}

/// Control surface of one live third-party player instance.
#[async_trait]
pub trait EmbedPlayer: Send + Sync {
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn seek_to(&self, seconds: f64) -> Result<()>;
    /// Set the volume, `0..=100`.
    async fn set_volume(&self, level: u8) -> Result<()>;
    async fn set_muted(&self, muted: bool) -> Result<()>;
    async fn is_muted(&self) -> Result<bool>;
    /// Current playback position in seconds.
    async fn current_time(&self) -> Result<f64>;
    /// Release the underlying instance. Must emit no further signals once
    /// this returns.
    async fn destroy(&self) -> Result<()>;
}

/// Page-level surface for bootstrapping players: script injection, mount
/// readiness, and instantiation.
#[async_trait]
pub trait EmbedHost: Send + Sync {
    /// Inject the third-party control script into the page. Called at most
    /// once per process; [`ScriptLoader`](super::ScriptLoader) guards
    /// re-entry.
    async fn inject_script(&self) -> Result<()>;

    /// True once the injected script has finished loading.
    fn script_ready(&self) -> bool;

    /// True once the DOM element the player binds to exists.
    fn mount_ready(&self, mount_id: &str) -> bool;

    /// Create a player bound to `mount_id` playing `video_id`. The instance
    /// must start muted (autoplay policy) and report its lifecycle through
    /// `events`, tagging every signal with `session`.
    async fn instantiate(
        &self,
        mount_id: &str,
        video_id: &str,
        session: SessionId,
        events: mpsc::Sender<SessionEvent>,
    ) -> Result<Box<dyn EmbedPlayer>>;
}
