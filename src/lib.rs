//! embedplay - an embedded video playback engine
//!
//! Drives a playlist of externally hosted videos through a third-party
//! embedded player. The hosting page owns the playlist and the DOM; the
//! engine owns the player lifecycle, the playback state machine, progress
//! polling, preference persistence, and fallback handling for videos that
//! cannot be played.
//!
//! The third-party player and the hosting page are reached only through the
//! [`EmbedHost`]/[`EmbedPlayer`] and [`HostPage`] traits, so the engine
//! runs (and tests) without a browser.
//!
//! ```no_run
//! use std::sync::Arc;
//! use embedplay::{EngineConfig, PlaybackController, PreferenceStore, ScriptLoader};
//! use embedplay::JsonFileStorage;
//!
//! # async fn wire(host: Arc<dyn embedplay::HostPage>, embed: Arc<dyn embedplay::EmbedHost>) {
//! let controller = PlaybackController::new(
//!     host,
//!     embed,
//!     ScriptLoader::shared(),
//!     PreferenceStore::new(Arc::new(JsonFileStorage::default())),
//!     EngineConfig::default(),
//! );
//! controller.start().await;
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod controller;
pub mod fallback;
pub mod host;
pub mod logging;
pub mod model;

pub use adapter::{
    AdapterError, EmbedHost, EmbedPlayer, PlayerAdapter, PlayerSignal, ScriptLoader, SessionEvent,
};
pub use config::EngineConfig;
pub use controller::PlaybackController;
pub use fallback::{FallbackAction, FallbackPlan};
pub use host::HostPage;
pub use model::{
    JsonFileStorage, PlaybackPreferences, PlaybackState, PlaybackStatus, PlayerSession,
    PreferenceStorage, PreferenceStore, SessionId, Track, extract_video_id,
};
