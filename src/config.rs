//! Engine configuration.

use std::time::Duration;

/// Tunables for player creation and progress sampling.
///
/// The defaults match the shipped product; embedders normally only override
/// `mount_point_id`.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Id of the DOM element the player binds to. The element is owned by
    /// the live session and replaced, not reused, on every track change.
    pub mount_point_id: String,
    /// Delay between bootstrap readiness checks.
    pub bootstrap_poll_interval: Duration,
    /// Number of readiness checks before creation fails.
    pub bootstrap_poll_attempts: u32,
    /// Progress timer period while playing.
    pub progress_poll_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mount_point_id: "embedded-player".to_string(),
            bootstrap_poll_interval: Duration::from_millis(100),
            bootstrap_poll_attempts: 50,
            progress_poll_interval: Duration::from_millis(500),
        }
    }
}
