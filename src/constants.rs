//! A set of constants used by the library.

use std::time::Duration;

/// The base URI for the API.
pub const API_BASE: &str = "https://discord.com/api/v10";

/// The User-Agent sent along with every request.
pub const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/interactions-rs/interactions, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// The header carrying the hex-encoded Ed25519 signature of an inbound interaction.
pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";

/// The header carrying the timestamp that was signed together with the request body.
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// How long Discord waits for the initial response to an interaction before showing the user an
/// error.
pub const ACKNOWLEDGEMENT_DEADLINE: Duration = Duration::from_secs(3);

/// How long an interaction token can be used for edits and follow-up messages.
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(15 * 60);

/// The maximum unicode code points allowed within a message.
pub const MESSAGE_CODE_LIMIT: usize = 2000;

/// The maximum number of embeds in a single message.
pub const EMBED_MAX_COUNT: usize = 10;

/// The maximum number of action rows in a message or modal.
pub const ACTION_ROW_MAX_COUNT: usize = 5;

/// The maximum number of components in a single action row.
pub const ACTION_ROW_COMPONENT_MAX_COUNT: usize = 5;
