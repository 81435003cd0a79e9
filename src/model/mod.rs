//! Model module - playback state and data types
//!
//! This module contains the data structures the engine operates on. It is
//! organized into submodules by responsibility:
//!
//! - `types`: core type definitions (status enum, session identity)
//! - `track`: track metadata and video-id extraction
//! - `playback`: the live session and the observable playback state
//! - `preferences`: the persisted preferences record and its storage slot

mod playback;
mod preferences;
mod track;
mod types;

// Re-export all public types for convenient access
pub use types::{PlaybackStatus, SessionId};

pub use track::{Track, extract_video_id};

pub use playback::{PlaybackState, PlayerSession};

pub use preferences::{
    DEFAULT_VOLUME, JsonFileStorage, MAX_VOLUME, PlaybackPreferences, PreferenceStorage,
    PreferenceStore,
};
