//! Adapter failure taxonomy and the user-facing playback error messages.

use thiserror::Error;

/// Errors surfaced while creating a player instance.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The control script could not be injected.
    #[error("control script injection failed: {0}")]
    ScriptInjection(#[source] anyhow::Error),

    /// Script or mount point never became ready within the bounded wait.
    #[error("player bootstrap timed out after {attempts} checks")]
    BootstrapTimeout { attempts: u32 },

    /// The third-party player could not be instantiated.
    #[error("player instantiation failed: {0}")]
    Instantiate(#[source] anyhow::Error),
}

/// Shown when the track's URL yields no video id.
pub const MSG_INVALID_URL: &str = "This link is not a playable video URL.";
/// Shown when the player itself never came up.
pub const MSG_PLAYER_UNAVAILABLE: &str = "The video player failed to load.";
/// Shown for any player error code without a more specific message.
pub const MSG_LOAD_FAILED: &str = "This video failed to load.";

const MSG_NOT_FOUND: &str = "This video was not found or has been removed.";
const MSG_EMBED_DISABLED: &str =
    "This video cannot be embedded. Its owner only allows playback on the video site.";

/// Player error code → user-facing message.
///
/// The wording is the product's user-facing contract; keeping the mapping
/// as data means it cannot drift across call sites.
const ERROR_MESSAGES: &[(u32, &str)] = &[
    (100, MSG_NOT_FOUND),      // removed or private
    (101, MSG_EMBED_DISABLED), // embedding disabled by owner
    (150, MSG_EMBED_DISABLED), // same restriction, alternate code
];

/// Resolve a raw player error code to its user-facing message.
pub fn message_for_code(code: u32) -> &'static str {
    ERROR_MESSAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, message)| *message)
        .unwrap_or(MSG_LOAD_FAILED)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each known code maps to its fixed message; unknown codes fall back
    /// to the generic one.
    #[test]
    fn codes_map_to_fixed_messages() {
        assert_eq!(message_for_code(100), MSG_NOT_FOUND);
        assert_eq!(message_for_code(101), MSG_EMBED_DISABLED);
        assert_eq!(message_for_code(150), MSG_EMBED_DISABLED);
        assert_eq!(message_for_code(2), MSG_LOAD_FAILED);
        assert_eq!(message_for_code(0), MSG_LOAD_FAILED);
    }
}
