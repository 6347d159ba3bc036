use std::error::Error as StdError;
use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::InteractionType;
use crate::internal::prelude::StdResult;

enum_number! {
    /// The type of an initial interaction response.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-interaction-callback-type).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum InteractionResponseType {
        /// Acknowledges a ping.
        Pong = 1,
        /// Responds with a message.
        ChannelMessageWithSource = 4,
        /// Acknowledges the interaction, showing a loading state to the user.
        DeferredChannelMessageWithSource = 5,
        /// Acknowledges a component interaction without a loading state.
        DeferredUpdateMessage = 6,
        /// Edits the message the component was attached to.
        UpdateMessage = 7,
        /// Responds to an autocomplete interaction with suggested choices.
        Autocomplete = 8,
        /// Responds with a popup modal.
        Modal = 9,
        _ => Unknown(u8),
    }
}

bitflags::bitflags! {
    /// The flags for an interaction response message.
    #[derive(Copy, Clone, Default, Debug, Eq, Hash, PartialEq)]
    pub struct InteractionResponseFlags: u64 {
        /// Do not include any embeds when serializing this message.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Interaction message will only be visible to sender and will
        /// be quickly deleted.
        const EPHEMERAL = 1 << 6;
        /// Does not trigger push notifications or desktop notifications.
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

impl<'de> Deserialize<'de> for InteractionResponseFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        Ok(Self::from_bits_retain(u64::deserialize(deserializer)?))
    }
}

impl Serialize for InteractionResponseFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

/// Whether an interaction has received its initial response yet.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ResponseState {
    /// No initial response has been sent.
    #[default]
    Unsent,
    /// An initial response (a reply, a deferral, a modal or autocomplete choices) has been sent.
    Acknowledged,
}

/// An initial response method of an [`Interaction`].
///
/// [`Interaction`]: super::Interaction
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Transition {
    Reply,
    DeferReply,
    DeferUpdate,
    Update,
    ShowModal,
    AutocompleteResult,
}

impl Transition {
    /// The interaction types this response is allowed for.
    #[must_use]
    pub fn allowed_for(self, kind: InteractionType) -> bool {
        use InteractionType as T;

        match self {
            Self::Reply | Self::DeferReply => {
                matches!(kind, T::Command | T::Component | T::Modal)
            },
            Self::DeferUpdate | Self::Update => kind == T::Component,
            Self::ShowModal => matches!(kind, T::Command | T::Component),
            Self::AutocompleteResult => kind == T::Autocomplete,
        }
    }

    #[must_use]
    pub(crate) fn response_type(self) -> InteractionResponseType {
        match self {
            Self::Reply => InteractionResponseType::ChannelMessageWithSource,
            Self::DeferReply => InteractionResponseType::DeferredChannelMessageWithSource,
            Self::DeferUpdate => InteractionResponseType::DeferredUpdateMessage,
            Self::Update => InteractionResponseType::UpdateMessage,
            Self::ShowModal => InteractionResponseType::Modal,
            Self::AutocompleteResult => InteractionResponseType::Autocomplete,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reply => "reply",
            Self::DeferReply => "defer_reply",
            Self::DeferUpdate => "defer_update",
            Self::Update => "update",
            Self::ShowModal => "show_modal",
            Self::AutocompleteResult => "send_autocomplete",
        })
    }
}

/// An initial response that the protocol does not allow at this point.
///
/// Nothing is sent when this error is returned.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum IllegalTransition {
    /// The interaction already received its initial response.
    AlreadyAcknowledged { attempted: Transition },
    /// The response is not valid for this type of interaction, such as showing a modal in reply to
    /// a modal submission.
    WrongInteractionType { attempted: Transition, kind: InteractionType },
}

impl fmt::Display for IllegalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAcknowledged {
                attempted,
            } => write!(f, "cannot {attempted}: the interaction was already acknowledged"),
            Self::WrongInteractionType {
                attempted,
                kind,
            } => write!(f, "cannot {attempted} to an interaction of type {kind:?}"),
        }
    }
}

impl StdError for IllegalTransition {}

/// A validity window of an interaction that has elapsed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TimeWindow {
    /// The initial response must arrive within a few seconds of the interaction being received.
    Acknowledgement,
    /// The interaction token, used for edits and follow-ups, expires after 15 minutes.
    Token,
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Acknowledgement => "the acknowledgement deadline has passed",
            Self::Token => "the interaction token has expired",
        })
    }
}
