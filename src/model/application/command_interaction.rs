use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Error as _, Serialize, Serializer};

use crate::internal::prelude::*;
use crate::model::id::{AttachmentId, ChannelId, GenericId, RoleId, UserId};

enum_number! {
    /// The type of an application command option.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object-application-command-option-type).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum CommandOptionType {
        SubCommand = 1,
        SubCommandGroup = 2,
        String = 3,
        Integer = 4,
        Boolean = 5,
        User = 6,
        Channel = 7,
        Role = 8,
        Mentionable = 9,
        Number = 10,
        Attachment = 11,
        _ => Unknown(u8),
    }
}

/// A set of a parameter and a value from the user.
///
/// All options have names and an option can either be a parameter and input `value` or it can
/// denote a sub-command or group, in which case it will contain a top-level key and another vector
/// of `options`.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object-application-command-interaction-data-option-structure).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct CommandDataOption {
    /// The name of the parameter.
    pub name: String,
    /// The given value.
    pub value: CommandDataOptionValue,
}

impl CommandDataOption {
    #[must_use]
    pub fn kind(&self) -> CommandOptionType {
        self.value.kind()
    }

    /// Whether this is the option the user is currently typing in, for autocomplete interactions.
    #[must_use]
    pub fn focused(&self) -> bool {
        matches!(self.value, CommandDataOptionValue::Autocomplete { .. })
    }

    /// The nested options of a sub-command or sub-command group. Empty for any other kind.
    #[must_use]
    pub fn options(&self) -> &[CommandDataOption] {
        match &self.value {
            CommandDataOptionValue::SubCommand(options)
            | CommandDataOptionValue::SubCommandGroup(options) => options,
            _ => &[],
        }
    }
}

#[derive(Deserialize, Serialize)]
struct RawCommandDataOption {
    name: String,
    #[serde(rename = "type")]
    kind: CommandOptionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    focused: Option<bool>,
}

/// Decodes a list of option nodes, skipping the ones that are malformed.
fn decode_options(raw: Vec<Value>) -> Vec<CommandDataOption> {
    raw.into_iter().filter_map(|option| crate::json::decode_lenient("option", option)).collect()
}

fn option_from_raw<E: DeError>(raw: RawCommandDataOption) -> StdResult<CommandDataOption, E> {
    macro_rules! value {
        () => {
            serde_json::from_value(raw.value.ok_or_else(|| DeError::missing_field("value"))?)
                .map_err(DeError::custom)?
        };
    }

    let value = match raw.kind {
        // Partial input, so it is not necessarily valid for the declared kind yet
        _ if raw.focused == Some(true) => CommandDataOptionValue::Autocomplete {
            kind: raw.kind,
            value: match raw.value {
                Some(Value::String(value)) => value,
                Some(other) => other.to_string(),
                None => String::new(),
            },
        },
        CommandOptionType::Boolean => CommandDataOptionValue::Boolean(value!()),
        CommandOptionType::Integer => CommandDataOptionValue::Integer(value!()),
        CommandOptionType::Number => CommandDataOptionValue::Number(value!()),
        CommandOptionType::String => CommandDataOptionValue::String(value!()),
        CommandOptionType::SubCommand => {
            CommandDataOptionValue::SubCommand(decode_options(raw.options.unwrap_or_default()))
        },
        CommandOptionType::SubCommandGroup => {
            CommandDataOptionValue::SubCommandGroup(decode_options(raw.options.unwrap_or_default()))
        },
        CommandOptionType::Attachment => CommandDataOptionValue::Attachment(value!()),
        CommandOptionType::Channel => CommandDataOptionValue::Channel(value!()),
        CommandOptionType::Mentionable => CommandDataOptionValue::Mentionable(value!()),
        CommandOptionType::Role => CommandDataOptionValue::Role(value!()),
        CommandOptionType::User => CommandDataOptionValue::User(value!()),
        CommandOptionType::Unknown(unknown) => CommandDataOptionValue::Unknown(unknown),
    };

    Ok(CommandDataOption {
        name: raw.name,
        value,
    })
}

fn option_to_raw(option: &CommandDataOption) -> StdResult<RawCommandDataOption, serde_json::Error> {
    let mut raw = RawCommandDataOption {
        name: option.name.clone(),
        kind: option.kind(),
        value: None,
        options: None,
        focused: None,
    };

    match &option.value {
        CommandDataOptionValue::Autocomplete {
            kind: _,
            value,
        } => {
            raw.value = Some(serde_json::to_value(value)?);
            raw.focused = Some(true);
        },
        CommandDataOptionValue::Boolean(v) => raw.value = Some(serde_json::to_value(v)?),
        CommandDataOptionValue::Integer(v) => raw.value = Some(serde_json::to_value(v)?),
        CommandDataOptionValue::Number(v) => raw.value = Some(serde_json::to_value(v)?),
        CommandDataOptionValue::String(v) => raw.value = Some(serde_json::to_value(v)?),
        CommandDataOptionValue::SubCommand(o) | CommandDataOptionValue::SubCommandGroup(o) => {
            raw.options =
                Some(o.iter().map(serde_json::to_value).collect::<StdResult<_, serde_json::Error>>()?);
        },
        CommandDataOptionValue::Attachment(v) => raw.value = Some(serde_json::to_value(v)?),
        CommandDataOptionValue::Channel(v) => raw.value = Some(serde_json::to_value(v)?),
        CommandDataOptionValue::Mentionable(v) => raw.value = Some(serde_json::to_value(v)?),
        CommandDataOptionValue::Role(v) => raw.value = Some(serde_json::to_value(v)?),
        CommandDataOptionValue::User(v) => raw.value = Some(serde_json::to_value(v)?),
        CommandDataOptionValue::Unknown(_) => {},
    }

    Ok(raw)
}

// Manual impl needed to emulate integer enum tags
impl<'de> Deserialize<'de> for CommandDataOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        option_from_raw(RawCommandDataOption::deserialize(deserializer)?)
    }
}

impl Serialize for CommandDataOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        option_to_raw(self).map_err(S::Error::custom)?.serialize(serializer)
    }
}

/// The value of an [`CommandDataOption`].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum CommandDataOptionValue {
    Autocomplete { kind: CommandOptionType, value: String },
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(String),
    SubCommand(Vec<CommandDataOption>),
    SubCommandGroup(Vec<CommandDataOption>),
    Attachment(AttachmentId),
    Channel(ChannelId),
    Mentionable(GenericId),
    Role(RoleId),
    User(UserId),
    Unknown(u8),
}

impl CommandDataOptionValue {
    #[must_use]
    pub fn kind(&self) -> CommandOptionType {
        match self {
            Self::Autocomplete {
                kind, ..
            } => *kind,
            Self::Boolean(_) => CommandOptionType::Boolean,
            Self::Integer(_) => CommandOptionType::Integer,
            Self::Number(_) => CommandOptionType::Number,
            Self::String(_) => CommandOptionType::String,
            Self::SubCommand(_) => CommandOptionType::SubCommand,
            Self::SubCommandGroup(_) => CommandOptionType::SubCommandGroup,
            Self::Attachment(_) => CommandOptionType::Attachment,
            Self::Channel(_) => CommandOptionType::Channel,
            Self::Mentionable(_) => CommandOptionType::Mentionable,
            Self::Role(_) => CommandOptionType::Role,
            Self::User(_) => CommandOptionType::User,
            Self::Unknown(unknown) => CommandOptionType::Unknown(*unknown),
        }
    }

    /// If the value is a boolean, returns the associated bool. Returns None otherwise.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// If the value is an integer, returns the associated i64. Returns None otherwise.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// If the value is a number, returns the associated f64. Returns None otherwise.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Number(v) => Some(v),
            _ => None,
        }
    }

    /// If the value is a string, returns the associated str. Returns None otherwise.
    ///
    /// Also returns the partial input of a focused autocomplete option.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Autocomplete {
                value, ..
            } => Some(value),
            _ => None,
        }
    }

    /// If the value is an `AttachmentId`, returns the associated ID. Returns None otherwise.
    #[must_use]
    pub fn as_attachment_id(&self) -> Option<AttachmentId> {
        match self {
            Self::Attachment(id) => Some(*id),
            _ => None,
        }
    }

    /// If the value is an `ChannelId`, returns the associated ID. Returns None otherwise.
    #[must_use]
    pub fn as_channel_id(&self) -> Option<ChannelId> {
        match self {
            Self::Channel(id) => Some(*id),
            _ => None,
        }
    }

    /// If the value is an `GenericId`, returns the associated ID. Returns None otherwise.
    #[must_use]
    pub fn as_mentionable(&self) -> Option<GenericId> {
        match self {
            Self::Mentionable(id) => Some(*id),
            _ => None,
        }
    }

    /// If the value is an `UserId`, returns the associated ID. Returns None otherwise.
    #[must_use]
    pub fn as_user_id(&self) -> Option<UserId> {
        match self {
            Self::User(id) => Some(*id),
            _ => None,
        }
    }

    /// If the value is an `RoleId`, returns the associated ID. Returns None otherwise.
    #[must_use]
    pub fn as_role_id(&self) -> Option<RoleId> {
        match self {
            Self::Role(id) => Some(*id),
            _ => None,
        }
    }
}

/// Typed lookups over the options of a command or autocomplete interaction.
///
/// Lookups for leaf options scan the innermost level of the tree: when the user invoked a
/// sub-command (optionally inside a group), the sub-command's options are searched. The first
/// option matching both the name and the declared kind is returned.
///
/// Option nodes that cannot be decoded are skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionOptions {
    options: Vec<CommandDataOption>,
}

impl InteractionOptions {
    pub(crate) fn from_raw(raw: Option<Value>) -> Self {
        let raw = match raw {
            Some(Value::Array(raw)) => raw,
            _ => return Self::default(),
        };

        Self {
            options: decode_options(raw),
        }
    }

    /// Iterates over the top-level options.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDataOption> {
        self.options.iter()
    }

    /// The number of top-level options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// The sub-command group the user invoked, if any.
    #[must_use]
    pub fn get_sub_command_group(&self) -> Option<&CommandDataOption> {
        self.options.iter().find(|o| o.kind() == CommandOptionType::SubCommandGroup)
    }

    /// The sub-command the user invoked, if any, looking inside a sub-command group when present.
    #[must_use]
    pub fn get_sub_command(&self) -> Option<&CommandDataOption> {
        let level = match self.get_sub_command_group() {
            Some(group) => group.options(),
            None => &self.options,
        };

        level.iter().find(|o| o.kind() == CommandOptionType::SubCommand)
    }

    /// The option the user is currently typing in, for autocomplete interactions.
    #[must_use]
    pub fn get_focused(&self) -> Option<&CommandDataOption> {
        self.leaves().iter().find(|o| o.focused())
    }

    #[must_use]
    pub fn get_string_option(&self, name: &str) -> Option<&CommandDataOption> {
        self.find(CommandOptionType::String, name)
    }

    #[must_use]
    pub fn get_integer_option(&self, name: &str) -> Option<&CommandDataOption> {
        self.find(CommandOptionType::Integer, name)
    }

    #[must_use]
    pub fn get_boolean_option(&self, name: &str) -> Option<&CommandDataOption> {
        self.find(CommandOptionType::Boolean, name)
    }

    #[must_use]
    pub fn get_user_option(&self, name: &str) -> Option<&CommandDataOption> {
        self.find(CommandOptionType::User, name)
    }

    #[must_use]
    pub fn get_channel_option(&self, name: &str) -> Option<&CommandDataOption> {
        self.find(CommandOptionType::Channel, name)
    }

    #[must_use]
    pub fn get_role_option(&self, name: &str) -> Option<&CommandDataOption> {
        self.find(CommandOptionType::Role, name)
    }

    #[must_use]
    pub fn get_mentionable_option(&self, name: &str) -> Option<&CommandDataOption> {
        self.find(CommandOptionType::Mentionable, name)
    }

    #[must_use]
    pub fn get_number_option(&self, name: &str) -> Option<&CommandDataOption> {
        self.find(CommandOptionType::Number, name)
    }

    #[must_use]
    pub fn get_attachment_option(&self, name: &str) -> Option<&CommandDataOption> {
        self.find(CommandOptionType::Attachment, name)
    }

    fn leaves(&self) -> &[CommandDataOption] {
        match self.get_sub_command() {
            Some(sub_command) => sub_command.options(),
            None => &self.options,
        }
    }

    fn find(&self, kind: CommandOptionType, name: &str) -> Option<&CommandDataOption> {
        self.leaves().iter().find(|o| o.kind() == kind && o.name == name)
    }
}

impl<'a> IntoIterator for &'a InteractionOptions {
    type Item = &'a CommandDataOption;
    type IntoIter = std::slice::Iter<'a, CommandDataOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
