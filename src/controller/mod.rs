//! Controller module - the playback state machine
//!
//! The controller interprets player signals, exposes the playback
//! operations, owns the progress-polling timer, and decides success vs.
//! failure per track. It is organized into submodules by responsibility:
//!
//! - `transitions`: the pure transition function and its effect set
//! - `events`: the player signal pump
//! - `playback`: play/pause, seek, volume, and mute operations
//! - `navigation`: next/previous/shuffle against the hosting page

mod events;
mod navigation;
mod playback;
mod transitions;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

use crate::adapter::{
    EmbedHost, MSG_INVALID_URL, MSG_PLAYER_UNAVAILABLE, PlayerAdapter, PlayerSignal, ScriptLoader,
    SessionEvent, message_for_code,
};
use crate::config::EngineConfig;
use crate::host::HostPage;
use crate::model::{
    DEFAULT_VOLUME, PlaybackPreferences, PlaybackState, PlaybackStatus, PlayerSession,
    PreferenceStore, SessionId, extract_video_id,
};
use transitions::{Effect, step};

/// Capacity of the player signal channel.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// The playback engine's controller.
///
/// Cheap to clone; clones share all state. The hosting page drives it with
/// [`start`](Self::start), [`handle_track_change`](Self::handle_track_change)
/// and the playback operations, and renders from
/// [`snapshot`](Self::snapshot).
#[derive(Clone)]
pub struct PlaybackController {
    pub(crate) host: Arc<dyn HostPage>,
    pub(crate) embed: Arc<dyn EmbedHost>,
    pub(crate) loader: ScriptLoader,
    pub(crate) prefs: PreferenceStore,
    pub(crate) config: EngineConfig,
    pub(crate) state: Arc<Mutex<PlaybackState>>,
    pub(crate) session: Arc<Mutex<Option<PlayerSession>>>,
    /// Last volume the user chose above zero; restored on unmute.
    pub(crate) last_audible_volume: Arc<Mutex<u8>>,
    progress_task: Arc<Mutex<Option<JoinHandle<()>>>>,
    next_session_id: Arc<AtomicU64>,
    /// Serializes track loads so rapid track changes cannot interleave
    /// teardown and creation of two sessions.
    load_gate: Arc<Mutex<()>>,
    events_tx: mpsc::Sender<SessionEvent>,
    events_rx: Arc<Mutex<Option<mpsc::Receiver<SessionEvent>>>>,
    shut_down: Arc<Mutex<bool>>,
}

impl PlaybackController {
    pub fn new(
        host: Arc<dyn HostPage>,
        embed: Arc<dyn EmbedHost>,
        loader: ScriptLoader,
        prefs: PreferenceStore,
        config: EngineConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            host,
            embed,
            loader,
            prefs,
            config,
            state: Arc::new(Mutex::new(PlaybackState::default())),
            session: Arc::new(Mutex::new(None)),
            last_audible_volume: Arc::new(Mutex::new(DEFAULT_VOLUME)),
            progress_task: Arc::new(Mutex::new(None)),
            next_session_id: Arc::new(AtomicU64::new(1)),
            load_gate: Arc::new(Mutex::new(())),
            events_tx,
            events_rx: Arc::new(Mutex::new(Some(events_rx))),
            shut_down: Arc::new(Mutex::new(false)),
        }
    }

    /// Seed stored preferences, start the signal pump, and resolve the
    /// currently selected track.
    pub async fn start(&self) {
        let seeded = self.prefs.load();
        {
            let mut state = self.state.lock().await;
            state.volume = seeded.volume;
            state.is_muted = seeded.is_muted || seeded.volume == 0;
        }
        if seeded.volume > 0 {
            *self.last_audible_volume.lock().await = seeded.volume;
        }
        tracing::debug!(
            volume = seeded.volume,
            is_muted = seeded.is_muted,
            "Seeded stored preferences"
        );

        if let Some(events) = self.events_rx.lock().await.take() {
            self.start_event_pump(events);
        }
        self.load_current_track().await;
    }

    /// The hosting page selected a different track (or the playlist
    /// changed). Tears down the old session and resolves the new track.
    pub async fn handle_track_change(&self) {
        self.load_current_track().await;
    }

    /// Current observable playback state for the presentation layer.
    pub async fn snapshot(&self) -> PlaybackState {
        self.state.lock().await.clone()
    }

    /// Tear down the live session, stop the progress timer, and persist the
    /// final position. Safe to call more than once.
    pub async fn shutdown(&self) {
        *self.shut_down.lock().await = true;
        self.persist_preferences().await;
        self.teardown_session().await;
        tracing::info!("Playback engine shut down");
    }

    pub(crate) async fn is_shut_down(&self) -> bool {
        *self.shut_down.lock().await
    }

    pub(crate) async fn is_live_session(&self, id: SessionId) -> bool {
        self.session.lock().await.as_ref().is_some_and(|s| s.id == id)
    }

    /// Resolve the selected track into a fresh session, tearing down any
    /// previous one first.
    pub(crate) async fn load_current_track(&self) {
        let _gate = self.load_gate.lock().await;

        self.teardown_session().await;

        let Some(index) = self.host.current_index() else {
            self.reset_state(PlaybackStatus::Idle, None).await;
            return;
        };
        let playlist = self.host.playlist();
        let Some(track) = playlist.get(index) else {
            tracing::warn!(index, len = playlist.len(), "Selected index is out of bounds");
            self.reset_state(PlaybackStatus::Idle, None).await;
            return;
        };

        let Some(video_id) = extract_video_id(&track.external_url) else {
            tracing::warn!(url = %track.external_url, "Track URL yields no video id");
            self.reset_state(PlaybackStatus::Unplayable, Some(MSG_INVALID_URL))
                .await;
            self.persist_preferences().await;
            return;
        };

        self.reset_state(PlaybackStatus::Resolving, None).await;
        self.persist_preferences().await;

        let session_id = SessionId(self.next_session_id.fetch_add(1, Ordering::SeqCst));
        let volume = self.state.lock().await.volume;

        tracing::info!(
            session = session_id.0,
            video_id = %video_id,
            title = %track.title,
            "Resolving track"
        );

        match PlayerAdapter::create(
            &self.embed,
            &self.loader,
            &self.config,
            session_id,
            &video_id,
            volume,
            self.events_tx.clone(),
        )
        .await
        {
            Ok(handle) => {
                if self.is_shut_down().await {
                    handle.destroy().await;
                    return;
                }
                let mut session = self.session.lock().await;
                *session = Some(PlayerSession {
                    id: session_id,
                    video_id,
                    handle,
                    is_ready: false,
                });
            }
            Err(e) => {
                tracing::error!(session = session_id.0, error = %e, "Player creation failed");
                self.reset_state(PlaybackStatus::Unplayable, Some(MSG_PLAYER_UNAVAILABLE))
                    .await;
            }
        }
    }

    async fn reset_state(&self, status: PlaybackStatus, reason: Option<&str>) {
        let mut state = self.state.lock().await;
        state.status = status;
        state.current_time_seconds = 0.0;
        state.duration_seconds = 0.0;
        state.failure_reason = reason.map(str::to_string);
    }

    /// Destroy the live session and stop the timer. The session slot is
    /// cleared before the handle is destroyed, so signals racing the
    /// teardown no longer match a live session.
    pub(crate) async fn teardown_session(&self) {
        self.stop_progress_timer().await;
        let taken = self.session.lock().await.take();
        if let Some(session) = taken {
            session.handle.destroy().await;
            tracing::debug!(session = session.id.0, "Session torn down");
        }
    }

    /// Fold one player signal into the machine and run its effects.
    pub(crate) async fn apply_signal(&self, session_id: SessionId, signal: PlayerSignal) {
        if let PlayerSignal::Ready { .. } = signal {
            if let Some(session) = self.session.lock().await.as_mut() {
                session.is_ready = true;
            }
        }

        let transition = {
            let mut state = self.state.lock().await;
            let transition = step(state.status, signal);
            state.status = transition.next;
            if let Some(duration) = transition.duration_seconds {
                if duration.is_finite() && duration >= 0.0 {
                    state.duration_seconds = duration;
                }
            }
            transition
        };

        tracing::debug!(
            session = session_id.0,
            signal = ?signal,
            status = transition.next.as_str(),
            "Player signal applied"
        );

        for effect in transition.effects.iter().copied() {
            self.run_effect(effect).await;
        }
    }

    async fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::ApplyReadyVolume => {
                let keep_muted = self.state.lock().await.is_muted;
                let session = self.session.lock().await;
                if let Some(session) = session.as_ref() {
                    if let Err(e) = session.handle.apply_ready_volume(keep_muted).await {
                        tracing::error!(error = %e, "Applying ready volume failed");
                    }
                }
            }
            Effect::RequestPlay => {
                let session = self.session.lock().await;
                if let Some(session) = session.as_ref() {
                    if let Err(e) = session.handle.play().await {
                        tracing::error!(error = %e, "Playback request failed");
                    }
                }
            }
            Effect::StartProgressTimer => self.start_progress_timer().await,
            Effect::StopProgressTimer => self.stop_progress_timer().await,
            Effect::EnsureAudible => self.ensure_audible().await,
            Effect::DestroySession => self.teardown_session().await,
            Effect::RecordFailure { code } => {
                let message = message_for_code(code);
                self.state.lock().await.failure_reason = Some(message.to_string());
                tracing::warn!(code, message, "Track is unplayable");
            }
            Effect::PersistPosition => self.persist_preferences().await,
            Effect::AdvanceToNext => {
                self.persist_preferences().await;
                self.next();
            }
        }
    }

    /// Resume must never leave the player muted against the user's intent:
    /// if the player reports muted here, unmute is forced.
    async fn ensure_audible(&self) {
        {
            let session = self.session.lock().await;
            let Some(session) = session.as_ref() else {
                return;
            };
            if !session.handle.is_muted().await {
                return;
            }
            if let Err(e) = session.handle.set_muted(false).await {
                tracing::error!(error = %e, "Forced unmute on resume failed");
                return;
            }
        }

        let restore = *self.last_audible_volume.lock().await;
        let restored_volume = {
            let mut state = self.state.lock().await;
            state.is_muted = false;
            if state.volume == 0 {
                state.volume = restore;
                Some(restore)
            } else {
                None
            }
        };
        if let Some(volume) = restored_volume {
            let session = self.session.lock().await;
            if let Some(session) = session.as_ref() {
                if let Err(e) = session.handle.set_volume(volume).await {
                    tracing::error!(error = %e, "Volume restore on resume failed");
                }
            }
        }
        self.persist_preferences().await;
    }

    /// Start the progress timer, clearing any previous one. Exactly one
    /// timer exists at a time.
    pub(crate) async fn start_progress_timer(&self) {
        self.stop_progress_timer().await;
        let controller = self.clone();
        let period = self.config.progress_poll_interval;
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                controller.sample_progress().await;
            }
        });
        *self.progress_task.lock().await = Some(task);
    }

    pub(crate) async fn stop_progress_timer(&self) {
        if let Some(task) = self.progress_task.lock().await.take() {
            task.abort();
        }
    }

    #[cfg(test)]
    pub(crate) async fn progress_timer_active(&self) -> bool {
        self.progress_task.lock().await.is_some()
    }

    /// One progress tick: sample the player's position into the state.
    async fn sample_progress(&self) {
        let sampled = {
            let session = self.session.lock().await;
            let Some(session) = session.as_ref() else {
                return;
            };
            session.handle.current_time().await
        };
        let time = match sampled {
            Ok(time) => time,
            Err(e) => {
                tracing::trace!(error = %e, "Progress sample failed");
                return;
            }
        };
        let mut state = self.state.lock().await;
        if state.status == PlaybackStatus::Playing {
            state.current_time_seconds = time;
        }
    }

    /// Capture the full preferences record and write it out. Best-effort:
    /// the store swallows failures.
    pub(crate) async fn persist_preferences(&self) {
        let (volume, is_muted, position) = {
            let state = self.state.lock().await;
            (state.volume, state.is_muted, state.current_time_seconds)
        };
        let prefs = PlaybackPreferences {
            volume,
            is_muted,
            last_index: self.host.current_index().unwrap_or(0),
            last_position_seconds: position,
        };
        self.prefs.save(&prefs);
    }
}
