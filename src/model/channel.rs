//! Models relating to channels and the messages sent in them.

use dep_time::OffsetDateTime;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::id::{ChannelId, MessageId};
use super::user::User;
use crate::internal::prelude::*;

enum_number! {
    /// A representation of a type of channel.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#channel-object-channel-types).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum ChannelType {
        /// An indicator that the channel is a text guild channel.
        Text = 0,
        /// An indicator that the channel is a private channel.
        Private = 1,
        /// An indicator that the channel is a voice guild channel.
        Voice = 2,
        /// An indicator that the channel is a group DM.
        GroupDm = 3,
        /// An indicator that the channel is a channel category.
        Category = 4,
        /// An indicator that the channel is a `NewsChannel`.
        News = 5,
        /// An indicator that the channel is a news thread.
        NewsThread = 10,
        /// An indicator that the channel is a public thread.
        PublicThread = 11,
        /// An indicator that the channel is a private thread.
        PrivateThread = 12,
        /// An indicator that the channel is a stage channel.
        Stage = 13,
        /// An indicator that the channel is a directory.
        Directory = 14,
        /// An indicator that the channel is a forum channel.
        Forum = 15,
        /// An indicator that the channel is a media channel.
        Media = 16,
        _ => Unknown(u8),
    }
}

bitflags::bitflags! {
    /// Describes extra features of the message.
    ///
    /// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object-message-flags).
    #[derive(Copy, Clone, Default, Debug, Eq, Hash, PartialEq)]
    pub struct MessageFlags: u64 {
        /// This message has been published to subscribed channels (via Channel Following).
        const CROSSPOSTED = 1 << 0;
        /// This message originated from a message in another channel (via Channel Following).
        const IS_CROSSPOST = 1 << 1;
        /// Do not include any embeds when serializing this message.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// This message is only visible to the user who invoked the Interaction.
        const EPHEMERAL = 1 << 6;
        /// This message is an Interaction Response and the bot is "thinking".
        const LOADING = 1 << 7;
        /// This message will not trigger push and desktop notifications.
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        Ok(Self::from_bits_retain(u64::deserialize(deserializer)?))
    }
}

impl Serialize for MessageFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

/// A message sent in a channel, as returned by the interaction webhook endpoints or attached to a
/// component interaction.
///
/// Only the fields that interaction handlers commonly need are typed; components and embeds are
/// kept as raw JSON.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#message-object).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[non_exhaustive]
pub struct Message {
    /// The unique Id of the message. Can be used to calculate the creation date of the message.
    #[serde(default)]
    pub id: Option<MessageId>,
    /// The Id of the [`Channel`] that the message was sent to.
    ///
    /// [`Channel`]: https://discord.com/developers/docs/resources/channel
    #[serde(default)]
    pub channel_id: Option<ChannelId>,
    /// The user that sent the message.
    #[serde(default)]
    pub author: Option<User>,
    /// The content of the message.
    #[serde(default)]
    pub content: String,
    /// Initial message creation timestamp, calculated from its Id.
    #[serde(default, with = "dep_time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    /// The timestamp of the last time the message was updated, if it was.
    #[serde(default, with = "dep_time::serde::rfc3339::option")]
    pub edited_timestamp: Option<OffsetDateTime>,
    /// Indicator of whether the command is to be played back via text-to-speech.
    #[serde(default)]
    pub tts: bool,
    /// Indicator of whether the message is pinned.
    #[serde(default)]
    pub pinned: bool,
    /// Indicator of whether the message mentions everyone.
    #[serde(default)]
    pub mention_everyone: bool,
    /// Array of users mentioned in the message.
    #[serde(default)]
    pub mentions: Vec<User>,
    /// Array of embeds sent with the message.
    #[serde(default)]
    pub embeds: Vec<Value>,
    /// Array of attachments sent with the message.
    #[serde(default)]
    pub attachments: Vec<Value>,
    /// The components of this message
    #[serde(default)]
    pub components: Vec<Value>,
    /// Bit flags describing extra features of the message.
    #[serde(default)]
    pub flags: Option<MessageFlags>,
}

impl Message {
    /// Whether the message is only visible to the user who invoked the interaction.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.flags.is_some_and(|flags| flags.contains(MessageFlags::EPHEMERAL))
    }
}
