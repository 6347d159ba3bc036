use crate::model::id::EmojiId;

enum_number! {
    /// The type of a component
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/message-components#component-object-component-types).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum ComponentType {
        /// A container for other components.
        ActionRow = 1,
        /// A clickable button.
        Button = 2,
        /// A select menu for picking from defined text options.
        StringSelect = 3,
        /// A text input, only valid in modals.
        InputText = 4,
        /// A select menu for users.
        UserSelect = 5,
        /// A select menu for roles.
        RoleSelect = 6,
        /// A select menu for users and roles.
        MentionableSelect = 7,
        /// A select menu for channels.
        ChannelSelect = 8,
        _ => Unknown(u8),
    }
}

impl ComponentType {
    /// Whether this component is one of the select menu kinds.
    #[must_use]
    pub fn is_select_menu(self) -> bool {
        matches!(
            self,
            Self::StringSelect
                | Self::UserSelect
                | Self::RoleSelect
                | Self::MentionableSelect
                | Self::ChannelSelect
        )
    }
}

enum_number! {
    /// The style of a button.
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/message-components#button-object-button-styles).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum ButtonStyle {
        /// Blurple, requires a custom id.
        Primary = 1,
        /// Grey, requires a custom id.
        Secondary = 2,
        /// Green, requires a custom id.
        Success = 3,
        /// Red, requires a custom id.
        Danger = 4,
        /// Grey, navigates to a URL instead of sending an interaction.
        Link = 5,
        _ => Unknown(u8),
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self::Primary
    }
}

enum_number! {
    /// The style of the input text
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/message-components#text-inputs-text-input-styles).
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
    #[serde(from = "u8", into = "u8")]
    #[non_exhaustive]
    pub enum InputTextStyle {
        /// Single-line input.
        Short = 1,
        /// Multi-line input.
        Paragraph = 2,
        _ => Unknown(u8),
    }
}

/// The emoji shown on a button or select menu option.
///
/// Either the [`Self::id`] of a custom emoji or the [`Self::name`] (the unicode character for
/// standard emojis) must be present.
///
/// [Discord docs](https://discord.com/developers/docs/resources/emoji#emoji-object).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ComponentEmoji {
    /// The Id of a custom emoji.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EmojiId>,
    /// The name of a custom emoji, or the unicode character of a standard emoji.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the custom emoji is animated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub animated: bool,
}

impl ComponentEmoji {
    /// A standard unicode emoji, such as `"🦀"`.
    #[must_use]
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            animated: false,
        }
    }

    /// A custom guild emoji.
    #[must_use]
    pub fn custom(id: EmojiId, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            animated,
        }
    }

    /// Whether the emoji carries enough information to be rendered.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.id.is_some() || self.name.as_deref().is_some_and(|name| !name.is_empty())
    }
}

impl From<char> for ComponentEmoji {
    fn from(ch: char) -> Self {
        Self::unicode(ch)
    }
}

impl Default for InputTextStyle {
    fn default() -> Self {
        Self::Short
    }
}
