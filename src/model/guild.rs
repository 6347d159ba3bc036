//! The guild an interaction was triggered in.

use super::id::GuildId;
use super::permissions::Permissions;

/// The guild-scoped context of an interaction.
///
/// Only present for interactions triggered inside a guild; direct message interactions carry no
/// guild context and no [`Member`].
///
/// [`Member`]: super::user::Member
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct GuildContext {
    /// The Id of the guild.
    pub id: GuildId,
    /// The preferred locale of the guild, e.g. `en-US`.
    pub locale: Option<String>,
    /// The permissions of the application in the channel the interaction was sent from.
    pub bot_permissions: Option<Permissions>,
}

impl GuildContext {
    pub(crate) fn new(
        id: GuildId,
        locale: Option<String>,
        bot_permissions: Option<Permissions>,
    ) -> Self {
        Self {
            id,
            locale,
            bot_permissions,
        }
    }
}
