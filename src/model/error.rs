//! Error enum definition wrapping potential model and builder validation errors.

use std::error::Error as StdError;
use std::fmt;

/// Notes a limit that Discord enforces on a length or count, and which the library checks before
/// sending a payload.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Maximum {
    CustomId,
    ButtonLabel,
    ButtonUrl,
    SelectMenuPlaceholder,
    SelectMenuOptionCount,
    SelectMenuValues,
    SelectOptionLabel,
    SelectOptionValue,
    SelectOptionDescription,
    InputTextLabel,
    InputTextPlaceholder,
    InputTextLength,
    ModalTitle,
    ActionRowCount,
    ActionRowComponentCount,
    EmbedTitle,
    EmbedDescription,
    EmbedFieldCount,
    EmbedFieldName,
    EmbedFieldValue,
    EmbedFooterText,
    EmbedAuthorName,
    EmbedLength,
    EmbedCount,
    EmbedColour,
    MessageLength,
    AutocompleteChoiceCount,
    AutocompleteChoiceName,
    AutocompleteChoiceValue,
}

impl Maximum {
    pub(crate) fn check_overflow(self, value: usize) -> Result<(), ValidationError> {
        if value > self.value() {
            Err(ValidationError::TooLarge {
                maximum: self,
                value,
            })
        } else {
            Ok(())
        }
    }

    #[must_use]
    pub fn value(self) -> usize {
        match self {
            Self::CustomId
            | Self::SelectOptionLabel
            | Self::SelectOptionValue
            | Self::SelectOptionDescription
            | Self::InputTextPlaceholder
            | Self::AutocompleteChoiceName
            | Self::AutocompleteChoiceValue => 100,
            Self::ButtonLabel => 80,
            Self::ButtonUrl => 512,
            Self::SelectMenuPlaceholder => 150,
            Self::SelectMenuOptionCount
            | Self::SelectMenuValues
            | Self::EmbedFieldCount
            | Self::AutocompleteChoiceCount => 25,
            Self::InputTextLabel | Self::ModalTitle => 45,
            Self::InputTextLength => 4000,
            Self::ActionRowCount | Self::ActionRowComponentCount => 5,
            Self::EmbedTitle | Self::EmbedFieldName | Self::EmbedAuthorName => 256,
            Self::EmbedDescription => 4096,
            Self::EmbedFieldValue => 1024,
            Self::EmbedFooterText => 2048,
            Self::EmbedLength => 6000,
            Self::EmbedCount => 10,
            Self::EmbedColour => 0xFFFFFF,
            Self::MessageLength => 2000,
        }
    }
}

impl fmt::Display for Maximum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomId => f.write_str("Custom id length"),
            Self::ButtonLabel => f.write_str("Button label length"),
            Self::ButtonUrl => f.write_str("Button url length"),
            Self::SelectMenuPlaceholder => f.write_str("Select menu placeholder length"),
            Self::SelectMenuOptionCount => f.write_str("Select menu option count"),
            Self::SelectMenuValues => f.write_str("Select menu value count"),
            Self::SelectOptionLabel => f.write_str("Select option label length"),
            Self::SelectOptionValue => f.write_str("Select option value length"),
            Self::SelectOptionDescription => f.write_str("Select option description length"),
            Self::InputTextLabel => f.write_str("Text input label length"),
            Self::InputTextPlaceholder => f.write_str("Text input placeholder length"),
            Self::InputTextLength => f.write_str("Text input length"),
            Self::ModalTitle => f.write_str("Modal title length"),
            Self::ActionRowCount => f.write_str("Action row count"),
            Self::ActionRowComponentCount => f.write_str("Action row component count"),
            Self::EmbedTitle => f.write_str("Embed title length"),
            Self::EmbedDescription => f.write_str("Embed description length"),
            Self::EmbedFieldCount => f.write_str("Embed field count"),
            Self::EmbedFieldName => f.write_str("Embed field name length"),
            Self::EmbedFieldValue => f.write_str("Embed field value length"),
            Self::EmbedFooterText => f.write_str("Embed footer text length"),
            Self::EmbedAuthorName => f.write_str("Embed author name length"),
            Self::EmbedLength => f.write_str("Embed length"),
            Self::EmbedCount => f.write_str("Embed count"),
            Self::EmbedColour => f.write_str("Embed colour"),
            Self::MessageLength => f.write_str("Message length"),
            Self::AutocompleteChoiceCount => f.write_str("Autocomplete choice count"),
            Self::AutocompleteChoiceName => f.write_str("Autocomplete choice name length"),
            Self::AutocompleteChoiceValue => f.write_str("Autocomplete choice value length"),
        }
    }
}

/// Notes a lower bound that Discord enforces on a length or count.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Minimum {
    CustomId,
    SelectMenuOptionCount,
    SelectMenuMaxValues,
    SelectOptionLabel,
    SelectOptionValue,
    InputTextLabel,
    InputTextMaxLength,
    ModalTitle,
    ActionRowCount,
    EmbedFieldName,
    EmbedFieldValue,
    AutocompleteChoiceName,
    AutocompleteChoiceValue,
}

impl Minimum {
    pub(crate) fn check_underflow(self, value: usize) -> Result<(), ValidationError> {
        if value < self.value() {
            Err(ValidationError::TooSmall {
                minimum: self,
                value,
            })
        } else {
            Ok(())
        }
    }

    #[must_use]
    pub fn value(self) -> usize {
        // Every bound Discord documents here is "must not be empty".
        match self {
            Self::CustomId
            | Self::SelectMenuOptionCount
            | Self::SelectMenuMaxValues
            | Self::SelectOptionLabel
            | Self::SelectOptionValue
            | Self::InputTextLabel
            | Self::InputTextMaxLength
            | Self::ModalTitle
            | Self::ActionRowCount
            | Self::EmbedFieldName
            | Self::EmbedFieldValue
            | Self::AutocompleteChoiceName
            | Self::AutocompleteChoiceValue => 1,
        }
    }
}

impl fmt::Display for Minimum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomId => f.write_str("Custom id length"),
            Self::SelectMenuOptionCount => f.write_str("Select menu option count"),
            Self::SelectMenuMaxValues => f.write_str("Select menu maximum values"),
            Self::SelectOptionLabel => f.write_str("Select option label length"),
            Self::SelectOptionValue => f.write_str("Select option value length"),
            Self::InputTextLabel => f.write_str("Text input label length"),
            Self::InputTextMaxLength => f.write_str("Text input maximum length"),
            Self::ModalTitle => f.write_str("Modal title length"),
            Self::ActionRowCount => f.write_str("Action row count"),
            Self::EmbedFieldName => f.write_str("Embed field name length"),
            Self::EmbedFieldValue => f.write_str("Embed field value length"),
            Self::AutocompleteChoiceName => f.write_str("Autocomplete choice name length"),
            Self::AutocompleteChoiceValue => f.write_str("Autocomplete choice value length"),
        }
    }
}

/// A payload violated one of Discord's structural limits.
///
/// Every builder setter that takes a bounded argument returns this error immediately, and
/// [`Validate::validate`] returns it for limits that depend on more than one field. Nothing is
/// sent over the network once a payload fails to validate.
///
/// This is always wrapped within the library's [`Error::Validation`] variant.
///
/// [`Validate::validate`]: crate::builder::Validate::validate
/// [`Error::Validation`]: crate::Error::Validation
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    /// A length or count is above the limit.
    TooLarge { maximum: Maximum, value: usize },
    /// A length or count is below the limit.
    TooSmall { minimum: Minimum, value: usize },
    /// A message payload has no content, embeds, components or files.
    EmptyMessage,
    /// A field that the component requires was not set.
    MissingField(&'static str),
    /// A field was set that is not allowed in combination with the other fields.
    ForbiddenField(&'static str),
    /// A lower bound is above the upper bound of the same range.
    InvalidRange { field: &'static str, min: u16, max: u16 },
    /// A url does not parse, or uses a scheme that is not allowed for the field.
    InvalidUrl { field: &'static str, url: String },
    /// An emoji has neither an id nor a name.
    InvalidEmoji,
    /// Components that cannot share an action row, or a component used where it is not allowed.
    InvalidComponent(&'static str),
    /// A raw JSON payload does not have the expected shape.
    InvalidRaw(&'static str),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge {
                maximum,
                value,
            } => write!(f, "{maximum} is limited to {}, got {value}", maximum.value()),
            Self::TooSmall {
                minimum,
                value,
            } => write!(f, "{minimum} must be at least {}, got {value}", minimum.value()),
            Self::EmptyMessage => {
                f.write_str("Message must have content, embeds, components or files")
            },
            Self::MissingField(field) => write!(f, "Missing required field `{field}`"),
            Self::ForbiddenField(field) => write!(f, "Field `{field}` is not allowed here"),
            Self::InvalidRange {
                field,
                min,
                max,
            } => write!(f, "Minimum {field} {min} is above the maximum {max}"),
            Self::InvalidUrl {
                field,
                url,
            } => write!(f, "Invalid url for `{field}`: {url}"),
            Self::InvalidEmoji => f.write_str("Emoji needs an id or a name"),
            Self::InvalidComponent(reason) => write!(f, "Invalid component: {reason}"),
            Self::InvalidRaw(reason) => write!(f, "Invalid raw payload: {reason}"),
        }
    }
}

impl StdError for ValidationError {}
