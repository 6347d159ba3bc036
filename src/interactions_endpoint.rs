//! Contains tools related to Discord's Interactions Endpoint URL feature.
//!
//! "You can optionally configure an interactions endpoint to receive interactions via HTTP POSTs
//! rather than over Gateway with a bot user."
//!
//! <https://discord.com/developers/docs/tutorials/upgrading-to-application-commands#adding-an-interactions-endpoint-url>
//!
//! [`Endpoint`] takes the raw request from whatever web server is in use and produces the
//! response to write back. [`Verifier`] can be used on its own to only check signatures.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio::time::timeout;
#[cfg(feature = "tracing_instrument")]
use tracing::instrument;
use tracing::{debug, warn};

use crate::builder::{CreateAttachment, CreateInteractionResponse};
use crate::constants;
use crate::http::Transport;
use crate::internal::prelude::*;
use crate::model::application::{Interaction, InteractionType};

/// Parses a hex string into an array of `[u8]`
fn parse_hex<const N: usize>(s: &str) -> Option<[u8; N]> {
    if s.len() != N * 2 {
        return None;
    }

    let mut res = [0; N];
    for (i, byte) in res.iter_mut().enumerate() {
        *byte = u8::from_str_radix(s.get(2 * i..2 * (i + 1))?, 16).ok()?;
    }
    Some(res)
}

/// The application public key couldn't be parsed into a valid cryptographic public key.
#[derive(Debug)]
#[non_exhaustive]
pub enum InvalidKey {
    /// The key is not a 64 digit hex string.
    Hex,
    /// The bytes are not a valid Ed25519 public key.
    Key(ed25519_dalek::SignatureError),
}

impl fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => f.write_str("invalid public key: expected a 64 digit hex string"),
            Self::Key(inner) => write!(f, "invalid public key: {inner}"),
        }
    }
}

impl std::error::Error for InvalidKey {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Hex => None,
            Self::Key(inner) => Some(inner),
        }
    }
}

/// Used to cryptographically verify incoming interactions HTTP request for authenticity.
///
/// If incoming requests are not verified, Discord will reject the URL for security reasons.
///
/// ```rust
/// use interactions::interactions_endpoint::Verifier;
///
/// let verifier =
///     Verifier::from_hex("67c6bd767ca099e79efac9fcce4d2022a63bf7dea780e7f3d813f694c1597089")
///         .unwrap();
///
/// // When receiving an HTTP request:
/// # let http_headers = std::collections::HashMap::from([("X-Signature-Ed25519", ""), ("X-Signature-Timestamp", "")]);
/// # let request_body = &[];
/// let signature = http_headers["X-Signature-Ed25519"];
/// let timestamp = http_headers["X-Signature-Timestamp"];
/// if !verifier.verify(signature, timestamp, request_body) {
///     // Send HTTP 401 Unauthorized response
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Verifier {
    public_key: ed25519_dalek::VerifyingKey,
}

impl Verifier {
    /// Creates a new [`Verifier`] from the given public key hex string, as shown in the
    /// application's settings.
    ///
    /// # Errors
    ///
    /// [`InvalidKey`] if the string isn't 64 hex digits, or the key isn't cryptographically
    /// valid.
    pub fn from_hex(public_key: &str) -> StdResult<Self, InvalidKey> {
        Self::try_new(parse_hex(public_key).ok_or(InvalidKey::Hex)?)
    }

    /// Creates a new [`Verifier`] from the public key bytes.
    ///
    /// # Errors
    ///
    /// [`InvalidKey`] if the key isn't cryptographically valid.
    pub fn try_new(public_key: [u8; 32]) -> StdResult<Self, InvalidKey> {
        Ok(Self {
            public_key: ed25519_dalek::VerifyingKey::from_bytes(&public_key)
                .map_err(InvalidKey::Key)?,
        })
    }

    /// Verifies a Discord request for authenticity, given the `X-Signature-Ed25519` HTTP header,
    /// `X-Signature-Timestamp` HTTP headers and request body.
    ///
    /// Returns `false` for a malformed signature as well as for a mismatch.
    #[must_use]
    pub fn verify(&self, signature: &str, timestamp: &str, body: &[u8]) -> bool {
        use ed25519_dalek::Verifier as _;

        // Extract and parse signature
        let Some(signature_bytes) = parse_hex(signature) else {
            return false;
        };
        let signature = ed25519_dalek::Signature::from_bytes(&signature_bytes);

        // Verify
        let message_to_verify = [timestamp.as_bytes(), body].concat();
        self.public_key.verify(&message_to_verify, &signature).is_ok()
    }
}

/// Timing settings of the response protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct Settings {
    /// How long the endpoint waits for the initial response. Discord gives up after 3 seconds.
    pub acknowledgement_deadline: Duration,
    /// How long edits and follow-ups are accepted. Interaction tokens expire after 15 minutes.
    pub token_lifetime: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            acknowledgement_deadline: constants::ACKNOWLEDGEMENT_DEADLINE,
            token_lifetime: constants::TOKEN_LIFETIME,
        }
    }
}

impl Settings {
    /// Equivalent to [`Self::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the acknowledgement deadline.
    #[must_use]
    pub fn acknowledgement_deadline(mut self, deadline: Duration) -> Self {
        self.acknowledgement_deadline = deadline;
        self
    }

    /// Sets the token lifetime.
    #[must_use]
    pub fn token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }
}

/// The application logic behind an [`Endpoint`].
///
/// Called once for every verified interaction other than a ping, on its own task. The handler
/// must issue the initial response within the acknowledgement deadline, and may keep running
/// afterwards to send follow-ups.
#[async_trait]
pub trait InteractionHandler: Send + Sync + 'static {
    async fn interaction(&self, interaction: Interaction);
}

/// The parts of an inbound HTTP request the endpoint needs.
#[derive(Clone, Copy, Debug)]
pub struct EndpointRequest<'a> {
    /// The `X-Signature-Ed25519` header.
    pub signature: Option<&'a str>,
    /// The `X-Signature-Timestamp` header.
    pub timestamp: Option<&'a str>,
    /// The raw, unparsed request body.
    pub body: &'a [u8],
}

impl<'a> EndpointRequest<'a> {
    #[must_use]
    pub fn new(signature: Option<&'a str>, timestamp: Option<&'a str>, body: &'a [u8]) -> Self {
        Self {
            signature,
            timestamp,
            body,
        }
    }

    /// Builds the request from a header lookup, such as `|name| headers.get(name)?.to_str().ok()`.
    /// The lookup is called with [`constants::SIGNATURE_HEADER`] and
    /// [`constants::TIMESTAMP_HEADER`].
    #[must_use]
    pub fn from_headers(header: impl Fn(&str) -> Option<&'a str>, body: &'a [u8]) -> Self {
        Self::new(header(constants::SIGNATURE_HEADER), header(constants::TIMESTAMP_HEADER), body)
    }
}

/// The HTTP response to write back for an inbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct EndpointResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The response body: JSON for a 200, a short plain text reason otherwise.
    pub body: Vec<u8>,
    /// Files of the initial response. When present, the body has to be sent as the
    /// `payload_json` part of a `multipart/form-data` response, with each file in a
    /// `files[n]` part.
    pub files: Vec<CreateAttachment>,
}

impl EndpointResponse {
    fn json(response: &CreateInteractionResponse, files: Vec<CreateAttachment>) -> Self {
        match serde_json::to_vec(response) {
            Ok(body) => Self {
                status: 200,
                body,
                files,
            },
            Err(why) => {
                warn!("Failed to serialize the initial response: {why}");
                Self::text(500, "failed to serialize the response")
            },
        }
    }

    fn text(status: u16, reason: &str) -> Self {
        Self {
            status,
            body: reason.as_bytes().to_vec(),
            files: Vec::new(),
        }
    }

    /// The `Content-Type` of [`Self::body`], unless files turn the response into a multipart
    /// one.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        if self.status == 200 {
            "application/json"
        } else {
            "text/plain; charset=utf-8"
        }
    }
}

/// Receives interactions from an interactions endpoint, independent of the web server in use.
///
/// For each request, [`Self::handle`] checks the signature, answers pings, and hands every other
/// interaction to the [`InteractionHandler`]. It then waits for the handler's initial response,
/// which becomes the body of the HTTP response.
pub struct Endpoint {
    verifier: Verifier,
    http: Arc<dyn Transport>,
    handler: Arc<dyn InteractionHandler>,
    settings: Settings,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("verifier", &self.verifier)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Endpoint {
    /// Creates an endpoint for the application with the given public key. `http` is used by the
    /// interactions for edits and follow-ups.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the public key is invalid.
    pub fn new(
        public_key: &str,
        http: Arc<dyn Transport>,
        handler: impl InteractionHandler,
    ) -> Result<Self> {
        Ok(Self {
            verifier: Verifier::from_hex(public_key)?,
            http,
            handler: Arc::new(handler),
            settings: Settings::default(),
        })
    }

    /// Replaces the default [`Settings`].
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Handles a single request to the interactions endpoint.
    ///
    /// - a missing or invalid signature gives a 401 and nothing else happens;
    /// - a body that is not an interaction, or of an unknown type, gives a 400;
    /// - a ping is answered with a pong, without calling the handler;
    /// - anything else is passed to the handler on a new task. The initial response gives a 200
    ///   if it arrives before the acknowledgement deadline, and a 500 otherwise.
    #[cfg_attr(feature = "tracing_instrument", instrument(skip(self, request)))]
    pub async fn handle(&self, request: EndpointRequest<'_>) -> EndpointResponse {
        let authentic = match (request.signature, request.timestamp) {
            (Some(signature), Some(timestamp)) => {
                self.verifier.verify(signature, timestamp, request.body)
            },
            _ => false,
        };
        if !authentic {
            warn!("Rejected an interaction request with a missing or invalid signature");
            return EndpointResponse::text(401, "invalid request signature");
        }

        let payload: Value = match serde_json::from_slice(request.body) {
            Ok(payload) => payload,
            Err(why) => {
                debug!("Interaction body is not valid JSON: {why}");
                return EndpointResponse::text(400, "invalid interaction payload");
            },
        };

        let (sender, receiver) = oneshot::channel();
        let interaction =
            match Interaction::with_sender(payload, Arc::clone(&self.http), &self.settings, sender)
            {
                Ok(interaction) => interaction,
                Err(why) => {
                    debug!("Interaction payload is missing required fields: {why}");
                    return EndpointResponse::text(400, "invalid interaction payload");
                },
            };

        let id = interaction.id;
        match interaction.kind {
            InteractionType::Ping => {
                debug!("Answering ping {id}");
                return EndpointResponse::json(&CreateInteractionResponse::Pong, Vec::new());
            },
            InteractionType::Unknown(kind) => {
                debug!("Unsupported type {kind} of interaction {id}");
                return EndpointResponse::text(400, "unsupported interaction type");
            },
            _ => {},
        }

        let handler = Arc::clone(&self.handler);
        tokio::spawn(async move { handler.interaction(interaction).await });

        let deadline = self.settings.acknowledgement_deadline;
        match timeout(deadline, receiver).await {
            Ok(Ok(mut response)) => {
                let files = response.take_files();
                EndpointResponse::json(&response, files)
            },
            Ok(Err(_)) => {
                warn!("Handler finished without acknowledging interaction {id}");
                EndpointResponse::text(500, "interaction was not acknowledged")
            },
            Err(_) => {
                warn!("Interaction {id} was not acknowledged within {deadline:?}");
                EndpointResponse::text(500, "interaction was not acknowledged in time")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer as _, SigningKey};

    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex::<4>("bf7dea78"), Some([0xBF, 0x7D, 0xEA, 0x78]));
        assert_eq!(parse_hex::<4>("bf7dea7"), None);
        assert_eq!(parse_hex::<4>("bf7dea789"), None);
        assert_eq!(parse_hex::<4>("bf7dea7x"), None);
        assert_eq!(parse_hex(""), Some([]));
        assert_eq!(
            parse_hex("67c6bd767ca099e79efac9fcce4d2022a63bf7dea780e7f3d813f694c1597089"),
            Some([
                0x67, 0xC6, 0xBD, 0x76, 0x7C, 0xA0, 0x99, 0xE7, 0x9E, 0xFA, 0xC9, 0xFC, 0xCE, 0x4D,
                0x20, 0x22, 0xA6, 0x3B, 0xF7, 0xDE, 0xA7, 0x80, 0xE7, 0xF3, 0xD8, 0x13, 0xF6, 0x94,
                0xC1, 0x59, 0x70, 0x89
            ])
        );
    }

    #[test]
    fn verify() {
        let key = SigningKey::from_bytes(&[7; 32]);
        let verifier = Verifier::from_hex(&hex(key.verifying_key().as_bytes())).unwrap();

        let body = br#"{"type":1}"#;
        let signature = hex(&key.sign(&[b"1700000000".as_slice(), body].concat()).to_bytes());

        assert!(verifier.verify(&signature, "1700000000", body));
        assert!(!verifier.verify(&signature, "1700000001", body));
        assert!(!verifier.verify(&signature, "1700000000", br#"{"type":2}"#));
        assert!(!verifier.verify(&signature[..126], "1700000000", body));
        assert!(!verifier.verify(&"zz".repeat(64), "1700000000", body));
        assert!(!verifier.verify("", "1700000000", body));

        let mut tampered = signature.into_bytes();
        tampered[0] = if tampered[0] == b'0' { b'1' } else { b'0' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(!verifier.verify(&tampered, "1700000000", body));
    }

    #[test]
    fn invalid_keys() {
        assert!(matches!(Verifier::from_hex("abcd"), Err(InvalidKey::Hex)));
        assert!(matches!(Verifier::from_hex(&"g".repeat(64)), Err(InvalidKey::Hex)));
    }

    #[test]
    fn settings() {
        let settings = Settings::new().acknowledgement_deadline(Duration::from_millis(500));
        assert_eq!(settings.acknowledgement_deadline, Duration::from_millis(500));
        assert_eq!(settings.token_lifetime, Duration::from_secs(900));
    }
}
