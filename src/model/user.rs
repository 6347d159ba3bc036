//! User and guild member information attached to interactions.

use dep_time::OffsetDateTime;

use super::id::{GuildId, RoleId, UserId};
use super::permissions::Permissions;

/// Information about a user.
///
/// Every field is optional, as partial user objects are common in interaction payloads.
///
/// [Discord docs](https://discord.com/developers/docs/resources/user#user-object).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct User {
    /// The unique Id of the user. Can be used to calculate the account's creation date.
    #[serde(default)]
    pub id: Option<UserId>,
    /// The account's username. Changing username will trigger a discriminator change if the
    /// username+discriminator pair becomes non-unique.
    #[serde(default, rename = "username")]
    pub name: Option<String>,
    /// The account's discriminator to differentiate the user from others with the same
    /// [`Self::name`]. Users that migrated to unique usernames have `"0"` here.
    #[serde(default)]
    pub discriminator: Option<String>,
    /// The account's display name, if it is set. For bots this is the application name.
    #[serde(default)]
    pub global_name: Option<String>,
    /// Optional avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Indicator of whether the user is a bot.
    #[serde(default)]
    pub bot: bool,
    /// The public flags on a user's account.
    #[serde(default)]
    pub public_flags: Option<u64>,
}

impl User {
    /// Returns the formatted URL of the user's icon, if one exists.
    ///
    /// This will produce a WEBP image URL, or GIF if the user has a GIF avatar.
    #[must_use]
    pub fn avatar_url(&self) -> Option<String> {
        Some(avatar_url(None, self.id?, self.avatar.as_deref()?))
    }

    /// Returns the "tag" for the user.
    ///
    /// The "tag" is defined as "username#discriminator", such as "zeyla#5479", or just the
    /// username for accounts without a legacy discriminator.
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        match self.discriminator.as_deref() {
            Some(discriminator) if discriminator != "0" => Some(format!("{name}#{discriminator}")),
            _ => Some(name.to_string()),
        }
    }

    /// Returns the name that the official client shows for this user.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.global_name.as_deref().or(self.name.as_deref())
    }
}

/// Information about a member of a guild who invoked an interaction.
///
/// [Discord docs](https://discord.com/developers/docs/resources/guild#guild-member-object).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Member {
    /// Attached User struct.
    #[serde(default)]
    pub user: Option<User>,
    /// The member's nickname, if present.
    #[serde(default)]
    pub nick: Option<String>,
    /// The guild avatar hash
    #[serde(default)]
    pub avatar: Option<String>,
    /// Vector of Ids of [`Role`]s given to the member.
    ///
    /// [`Role`]: https://discord.com/developers/docs/topics/permissions#role-object
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// Timestamp representing the date when the member joined.
    #[serde(default, with = "dep_time::serde::rfc3339::option")]
    pub joined_at: Option<OffsetDateTime>,
    /// Timestamp representing the date since the member is boosting the guild.
    #[serde(default, with = "dep_time::serde::rfc3339::option")]
    pub premium_since: Option<OffsetDateTime>,
    /// Indicator of whether the member can hear in voice channels.
    #[serde(default)]
    pub deaf: bool,
    /// Indicator of whether the member can speak in voice channels.
    #[serde(default)]
    pub mute: bool,
    /// Indicator that the member hasn't accepted the rules of the guild yet.
    #[serde(default)]
    pub pending: bool,
    /// The total permissions of the member in the channel the interaction was sent from,
    /// including overwrites.
    #[serde(default)]
    pub permissions: Option<Permissions>,
    /// When the user's timeout will expire and the user will be able to communicate in the guild
    /// again.
    #[serde(default, with = "dep_time::serde::rfc3339::option")]
    pub communication_disabled_until: Option<OffsetDateTime>,
    /// Guild member flags.
    #[serde(default)]
    pub flags: Option<u64>,
}

impl Member {
    /// The id of the member's user, if the payload contained one.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref()?.id
    }

    /// Returns the member's guild-specific avatar url, falling back to the user's avatar.
    #[must_use]
    pub fn face(&self, guild_id: GuildId) -> Option<String> {
        let user = self.user.as_ref()?;
        match self.avatar.as_deref() {
            Some(hash) => Some(avatar_url(Some(guild_id), user.id?, hash)),
            None => user.avatar_url(),
        }
    }

    /// Returns the nickname of the member, falling back to the user's display name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.nick.as_deref().or_else(|| self.user.as_ref()?.display_name())
    }

    /// Whether the member is currently timed out.
    #[must_use]
    pub fn is_timed_out(&self) -> bool {
        self.communication_disabled_until.is_some_and(|until| until > OffsetDateTime::now_utc())
    }
}

fn avatar_url(guild_id: Option<GuildId>, user_id: UserId, hash: &str) -> String {
    let ext = if hash.starts_with("a_") { "gif" } else { "webp" };

    match guild_id {
        Some(guild_id) => {
            cdn!("/guilds/{}/users/{}/avatars/{}.{}?size=1024", guild_id, user_id, hash, ext)
        },
        None => cdn!("/avatars/{}/{}.{}?size=1024", user_id, hash, ext),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{from_value, json};

    #[test]
    fn partial_user() {
        let user: User = from_value(json!({"id": "210", "username": "ferris"})).unwrap();
        assert_eq!(user.id, Some(UserId::new(210)));
        assert_eq!(user.tag().as_deref(), Some("ferris"));
        assert_eq!(user.avatar_url(), None);

        let user: User = from_value(json!({})).unwrap();
        assert_eq!(user, User::default());
    }

    #[test]
    fn avatar_urls() {
        let user: User = from_value(json!({
            "id": "210",
            "username": "ferris",
            "discriminator": "0042",
            "avatar": "a_1234",
        }))
        .unwrap();
        assert_eq!(user.tag().as_deref(), Some("ferris#0042"));
        assert_eq!(
            user.avatar_url().as_deref(),
            Some("https://cdn.discordapp.com/avatars/210/a_1234.gif?size=1024")
        );

        let member = Member {
            user: Some(user),
            avatar: Some("abcd".into()),
            ..Default::default()
        };
        assert_eq!(
            member.face(GuildId::new(7)).as_deref(),
            Some("https://cdn.discordapp.com/guilds/7/users/210/avatars/abcd.webp?size=1024")
        );
    }

    #[test]
    fn member_display_name() {
        let member: Member = from_value(json!({
            "user": {"id": "1", "username": "ferris", "global_name": "Ferris"},
            "roles": ["5", "6"],
            "joined_at": "2015-04-26T06:26:56.936000+00:00",
            "permissions": "2048",
        }))
        .unwrap();

        assert_eq!(member.display_name(), Some("Ferris"));
        assert_eq!(member.roles, vec![RoleId::new(5), RoleId::new(6)]);
        assert!(member.joined_at.is_some());
        assert_eq!(member.permissions, Some(Permissions::SEND_MESSAGES));
        assert!(!member.is_timed_out());
    }
}
