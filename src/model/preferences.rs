//! Persisted playback preferences and their durable storage slot.
//!
//! The record survives page reloads and is best-effort in both directions:
//! unreadable data falls back to documented defaults, failed writes are
//! swallowed. The playback experience is identical whether or not
//! persistence works.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Volume applied when no stored preferences exist.
pub const DEFAULT_VOLUME: u8 = 100;
/// Upper bound of the volume scale.
pub const MAX_VOLUME: u8 = 100;

/// The small persisted record of volume/mute/position state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackPreferences {
    pub volume: u8,
    pub is_muted: bool,
    pub last_index: usize,
    pub last_position_seconds: f64,
}

impl Default for PlaybackPreferences {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            is_muted: false,
            last_index: 0,
            last_position_seconds: 0.0,
        }
    }
}

impl PlaybackPreferences {
    /// Clamp values that drifted out of range in storage.
    fn sanitized(mut self) -> Self {
        self.volume = self.volume.min(MAX_VOLUME);
        if !self.last_position_seconds.is_finite() || self.last_position_seconds < 0.0 {
            self.last_position_seconds = 0.0;
        }
        self
    }
}

/// One durable client-local key/value slot holding the JSON payload.
pub trait PreferenceStorage: Send + Sync {
    fn read(&self) -> Result<String>;
    fn write(&self, payload: &str) -> Result<()>;
}

const PREFERENCES_FILE: &str = ".cache/playback_preferences.json";

/// File-backed slot: one JSON document under a dot-directory.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new(PREFERENCES_FILE)
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn read(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    fn write(&self, payload: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// Loads and saves the preferences record without ever failing the caller.
#[derive(Clone)]
pub struct PreferenceStore {
    storage: Arc<dyn PreferenceStorage>,
}

impl PreferenceStore {
    pub fn new(storage: Arc<dyn PreferenceStorage>) -> Self {
        Self { storage }
    }

    /// Read the stored record. A missing slot, unparsable JSON, or any read
    /// error yields the documented defaults.
    pub fn load(&self) -> PlaybackPreferences {
        let payload = match self.storage.read() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "No stored playback preferences, using defaults");
                return PlaybackPreferences::default();
            }
        };
        match serde_json::from_str::<PlaybackPreferences>(&payload) {
            Ok(prefs) => prefs.sanitized(),
            Err(e) => {
                tracing::debug!(error = %e, "Stored playback preferences unparsable, using defaults");
                PlaybackPreferences::default()
            }
        }
    }

    /// Write the record. Failures (quota, storage disabled) are logged and
    /// swallowed.
    pub fn save(&self, prefs: &PlaybackPreferences) {
        let payload = match serde_json::to_string(prefs) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "Could not serialize playback preferences");
                return;
            }
        };
        if let Err(e) = self.storage.write(&payload) {
            tracing::debug!(error = %e, "Could not persist playback preferences");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory slot standing in for browser-local storage.
    #[derive(Default)]
    struct MemoryStorage {
        slot: Mutex<Option<String>>,
    }

    impl PreferenceStorage for MemoryStorage {
        fn read(&self) -> Result<String> {
            self.slot
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("empty slot"))
        }

        fn write(&self, payload: &str) -> Result<()> {
            *self.slot.lock().unwrap() = Some(payload.to_string());
            Ok(())
        }
    }

    /// Slot whose reads and writes always fail, as when storage is disabled.
    struct BrokenStorage;

    impl PreferenceStorage for BrokenStorage {
        fn read(&self) -> Result<String> {
            Err(anyhow::anyhow!("storage disabled"))
        }

        fn write(&self, _payload: &str) -> Result<()> {
            Err(anyhow::anyhow!("quota exceeded"))
        }
    }

    fn store(storage: impl PreferenceStorage + 'static) -> PreferenceStore {
        PreferenceStore::new(Arc::new(storage))
    }

    /// Save-then-load round-trips on healthy storage.
    #[test]
    fn round_trip_on_healthy_storage() {
        let store = store(MemoryStorage::default());
        let prefs = PlaybackPreferences {
            volume: 37,
            is_muted: true,
            last_index: 4,
            last_position_seconds: 92.5,
        };
        store.save(&prefs);
        assert_eq!(store.load(), prefs);
    }

    /// A missing slot yields the documented defaults.
    #[test]
    fn missing_slot_yields_defaults() {
        let store = store(MemoryStorage::default());
        assert_eq!(store.load(), PlaybackPreferences::default());
    }

    /// Corrupt JSON yields the documented defaults, not an error.
    #[test]
    fn corrupt_payload_yields_defaults() {
        let storage = MemoryStorage::default();
        *storage.slot.lock().unwrap() = Some("{not json".to_string());
        let store = store(storage);
        assert_eq!(store.load(), PlaybackPreferences::default());
    }

    /// Reads that error out yield the documented defaults.
    #[test]
    fn failing_reads_yield_defaults() {
        let store = store(BrokenStorage);
        assert_eq!(store.load(), PlaybackPreferences::default());
    }

    /// Write failures are swallowed; saving never panics or errors.
    #[test]
    fn failing_writes_are_silent() {
        let store = store(BrokenStorage);
        store.save(&PlaybackPreferences::default());
    }

    /// Out-of-range stored values are clamped on load.
    #[test]
    fn out_of_range_values_are_clamped() {
        let storage = MemoryStorage::default();
        *storage.slot.lock().unwrap() = Some(
            r#"{"volume":220,"is_muted":false,"last_index":1,"last_position_seconds":-3.0}"#
                .to_string(),
        );
        let store = store(storage);
        let prefs = store.load();
        assert_eq!(prefs.volume, MAX_VOLUME);
        assert_eq!(prefs.last_position_seconds, 0.0);
    }
}
