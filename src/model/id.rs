//! A collection of newtypes defining type-strong IDs.

use std::fmt;

use dep_time::OffsetDateTime;

/// Milliseconds between the Unix epoch and the first second of 2015, Discord's epoch.
const DISCORD_EPOCH: i128 = 1_420_070_400_000;

macro_rules! id_u64 {
    ($($(#[$attr:meta])* $name:ident;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
            pub struct $name(#[serde(with = "snowflake")] u64);

            impl $name {
                /// Creates a new Id from a u64.
                #[inline]
                #[must_use]
                pub const fn new(id: u64) -> Self {
                    Self(id)
                }

                /// Retrieves the inner ID as u64.
                #[inline]
                #[must_use]
                pub const fn get(self) -> u64 {
                    self.0
                }

                /// Retrieves the time that the Id was created at.
                #[must_use]
                pub fn created_at(&self) -> Option<OffsetDateTime> {
                    let millis = i128::from(self.0 >> 22) + DISCORD_EPOCH;
                    OffsetDateTime::from_unix_timestamp_nanos(millis * 1_000_000).ok()
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($name)).field(&self.0).finish()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }

            impl From<u64> for $name {
                fn from(id: u64) -> $name {
                    $name(id)
                }
            }

            impl From<$name> for u64 {
                fn from(id: $name) -> u64 {
                    id.0
                }
            }

            impl PartialEq<u64> for $name {
                fn eq(&self, u: &u64) -> bool {
                    self.0 == *u
                }
            }

            impl std::str::FromStr for $name {
                type Err = std::num::ParseIntError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    s.parse().map(Self)
                }
            }
        )*
    }
}

id_u64! {
    /// An identifier for an Application.
    ApplicationId;
    /// An identifier for an attachment.
    AttachmentId;
    /// An identifier for a Channel
    ChannelId;
    /// An identifier for a slash command.
    CommandId;
    /// An identifier for an Emoji
    EmojiId;
    /// An identifier for an unspecific entity, such as a mentionable option value.
    GenericId;
    /// An identifier for a Guild
    GuildId;
    /// An identifier for an interaction.
    InteractionId;
    /// An identifier for a Message
    MessageId;
    /// An identifier for a Role
    RoleId;
    /// An identifier for a User
    UserId;
}

/// Discord sends snowflakes as strings, but older payloads and hand-written tests use integers.
mod snowflake {
    use std::fmt;

    use serde::de::{Error, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(SnowflakeVisitor)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    struct SnowflakeVisitor;

    impl<'de> Visitor<'de> for SnowflakeVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a non-negative integer or a string containing one")
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(value)
        }

        fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
            u64::try_from(value).map_err(|_| E::custom("snowflake must not be negative"))
        }

        fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse().map_err(E::custom)
        }
    }
}
