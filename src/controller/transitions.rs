//! Pure transition function for the playback state machine.
//!
//! Folding a player signal into a status has no side effects; the
//! controller executes the returned effects against the adapter, the
//! progress timer, the storage slot, and the hosting page. Every reachable
//! transition is testable here without a player.

use crate::adapter::PlayerSignal;
use crate::model::PlaybackStatus;

/// Side effects the controller runs after a transition, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
    /// Apply the requested volume and lift the instantiation mute.
    ApplyReadyVolume,
    /// Ask the player to start playback.
    RequestPlay,
    /// Start the progress-polling timer, clearing any previous one.
    StartProgressTimer,
    /// Stop the progress-polling timer.
    StopProgressTimer,
    /// Resume must not stay muted; unmute if the player reports muted.
    EnsureAudible,
    /// Tear down the live session.
    DestroySession,
    /// Record the mapped failure message for a player error code.
    RecordFailure { code: u32 },
    /// Write the preferences record, including the current position.
    PersistPosition,
    /// Move on to the next track after a natural end.
    AdvanceToNext,
}

/// Result of folding one signal into the current status.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Transition {
    pub next: PlaybackStatus,
    pub effects: Vec<Effect>,
    /// Fresh duration reported with the signal, if any.
    pub duration_seconds: Option<f64>,
}

impl Transition {
    fn stay(status: PlaybackStatus) -> Self {
        Self {
            next: status,
            effects: Vec::new(),
            duration_seconds: None,
        }
    }
}

/// Fold `signal` into `status`.
///
/// Signals that make no sense in the current status are ignored rather than
/// trusted: the stream is ordered per session, but a signal can still race
/// a user-driven status change.
pub(crate) fn step(status: PlaybackStatus, signal: PlayerSignal) -> Transition {
    use PlaybackStatus::*;

    match (status, signal) {
        (Resolving, PlayerSignal::Ready { duration_seconds }) => Transition {
            next: Buffering,
            effects: vec![Effect::ApplyReadyVolume, Effect::RequestPlay],
            duration_seconds: Some(duration_seconds),
        },
        (Buffering, PlayerSignal::Playing { duration_seconds }) => Transition {
            next: Playing,
            effects: vec![Effect::StartProgressTimer],
            duration_seconds: Some(duration_seconds),
        },
        (Paused, PlayerSignal::Playing { duration_seconds }) => Transition {
            next: Playing,
            effects: vec![Effect::StartProgressTimer, Effect::EnsureAudible],
            duration_seconds: Some(duration_seconds),
        },
        // Replaying after a natural end.
        (Ended, PlayerSignal::Playing { duration_seconds }) => Transition {
            next: Playing,
            effects: vec![Effect::StartProgressTimer],
            duration_seconds: Some(duration_seconds),
        },
        (Playing, PlayerSignal::Paused) => Transition {
            next: Paused,
            effects: vec![Effect::StopProgressTimer, Effect::PersistPosition],
            duration_seconds: None,
        },
        (Playing, PlayerSignal::Ended) => Transition {
            next: Ended,
            effects: vec![
                Effect::StopProgressTimer,
                Effect::PersistPosition,
                Effect::AdvanceToNext,
            ],
            duration_seconds: None,
        },
        (_, PlayerSignal::Error { code }) => Transition {
            next: Unplayable,
            effects: vec![
                Effect::StopProgressTimer,
                Effect::DestroySession,
                Effect::RecordFailure { code },
            ],
            duration_seconds: None,
        },
        (current, _) => Transition::stay(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PlaybackStatus::*;

    const SIGNALS: [PlayerSignal; 5] = [
        PlayerSignal::Ready {
            duration_seconds: 10.0,
        },
        PlayerSignal::Playing {
            duration_seconds: 10.0,
        },
        PlayerSignal::Paused,
        PlayerSignal::Ended,
        PlayerSignal::Error { code: 2 },
    ];

    /// Ready moves a resolving session into buffering and requests
    /// playback with the user's volume applied.
    #[test]
    fn ready_starts_buffering_and_requests_play() {
        let t = step(
            Resolving,
            PlayerSignal::Ready {
                duration_seconds: 180.0,
            },
        );
        assert_eq!(t.next, Buffering);
        assert_eq!(t.effects, vec![Effect::ApplyReadyVolume, Effect::RequestPlay]);
        assert_eq!(t.duration_seconds, Some(180.0));
    }

    /// The first Playing signal confirms playback and starts the timer.
    #[test]
    fn playing_from_buffering_starts_timer() {
        let t = step(
            Buffering,
            PlayerSignal::Playing {
                duration_seconds: 180.0,
            },
        );
        assert_eq!(t.next, Playing);
        assert_eq!(t.effects, vec![Effect::StartProgressTimer]);
    }

    /// Resuming from pause restarts the timer and forces audibility.
    #[test]
    fn resume_restarts_timer_and_forces_audible() {
        let t = step(
            Paused,
            PlayerSignal::Playing {
                duration_seconds: 180.0,
            },
        );
        assert_eq!(t.next, Playing);
        assert_eq!(
            t.effects,
            vec![Effect::StartProgressTimer, Effect::EnsureAudible]
        );
    }

    /// Pausing stops the timer and captures the position.
    #[test]
    fn pause_stops_timer() {
        let t = step(Playing, PlayerSignal::Paused);
        assert_eq!(t.next, Paused);
        assert_eq!(
            t.effects,
            vec![Effect::StopProgressTimer, Effect::PersistPosition]
        );
    }

    /// A natural end stops the timer and advances the playlist.
    #[test]
    fn ended_advances_to_next() {
        let t = step(Playing, PlayerSignal::Ended);
        assert_eq!(t.next, Ended);
        assert_eq!(
            t.effects,
            vec![
                Effect::StopProgressTimer,
                Effect::PersistPosition,
                Effect::AdvanceToNext,
            ]
        );
    }

    /// An error in any state converges on Unplayable with teardown.
    #[test]
    fn error_is_unplayable_from_every_state() {
        for status in [Idle, Resolving, Buffering, Playing, Paused, Ended, Unplayable] {
            let t = step(status, PlayerSignal::Error { code: 150 });
            assert_eq!(t.next, Unplayable, "from {status:?}");
            assert_eq!(
                t.effects,
                vec![
                    Effect::StopProgressTimer,
                    Effect::DestroySession,
                    Effect::RecordFailure { code: 150 },
                ]
            );
        }
    }

    /// Out-of-place signals are ignored; in particular an Ended signal
    /// outside Playing must not advance the playlist again.
    #[test]
    fn out_of_place_signals_are_ignored() {
        for (status, signal) in [
            (Idle, PlayerSignal::Playing { duration_seconds: 1.0 }),
            (Ended, PlayerSignal::Ended),
            (Paused, PlayerSignal::Ended),
            (Buffering, PlayerSignal::Paused),
            (Resolving, PlayerSignal::Playing { duration_seconds: 1.0 }),
        ] {
            let t = step(status, signal);
            assert_eq!(t.next, status, "{status:?} on {signal:?}");
            assert!(t.effects.is_empty(), "{status:?} on {signal:?}");
        }
    }

    /// The progress timer runs exactly while status is Playing, over every
    /// signal sequence reachable within a few steps.
    #[test]
    fn timer_runs_exactly_while_playing() {
        let mut pending = vec![(Idle, false, 0u8), (Resolving, false, 0u8)];
        while let Some((status, timer_active, depth)) = pending.pop() {
            if depth == 4 {
                continue;
            }
            for signal in SIGNALS {
                let t = step(status, signal);
                let mut timer_active = timer_active;
                for effect in &t.effects {
                    match effect {
                        Effect::StartProgressTimer => timer_active = true,
                        Effect::StopProgressTimer => timer_active = false,
                        _ => {}
                    }
                }
                assert_eq!(
                    timer_active,
                    t.next == Playing,
                    "after {status:?} + {signal:?}"
                );
                pending.push((t.next, timer_active, depth + 1));
            }
        }
    }
}
