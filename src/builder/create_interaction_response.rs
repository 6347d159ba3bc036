use serde::ser::{Serialize, SerializeMap as _, Serializer};

use super::create_attachment::attachment_metadata;
use super::create_components::check_message_rows;
use super::{
    check_length,
    check_length_range,
    validate_all,
    CreateActionRow,
    CreateAttachment,
    CreateEmbed,
    CreateModal,
    Payload,
    Validate,
};
use crate::internal::prelude::*;
use crate::model::application::{InteractionResponseFlags, InteractionResponseType};
use crate::model::error::{Maximum, Minimum};
use crate::model::ValidationError;

/// The initial response to an interaction, as sent to Discord.
///
/// Usually built by the response methods on [`Interaction`] rather than by hand.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object).
///
/// [`Interaction`]: crate::model::application::Interaction
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
#[must_use]
pub enum CreateInteractionResponse {
    /// Acknowledges a Ping (only required when setting up an endpoint).
    ///
    /// Corresponds to Discord's `PONG`.
    Pong,
    /// Responds to an interaction with a message.
    ///
    /// Corresponds to Discord's `CHANNEL_MESSAGE_WITH_SOURCE`.
    Message(CreateInteractionResponseMessage),
    /// Acknowledges the interaction in order to edit a response later. The user sees a loading
    /// state.
    ///
    /// Corresponds to Discord's `DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE`.
    Defer { ephemeral: bool },
    /// Only valid for component-based interactions. Acknowledges the interaction. You can optionally
    /// edit the original message later. The user does not see a loading state.
    ///
    /// Corresponds to Discord's `DEFERRED_UPDATE_MESSAGE`.
    Acknowledge,
    /// Only valid for component-based interactions. Edits the message the component was attached
    /// to.
    ///
    /// Corresponds to Discord's `UPDATE_MESSAGE`.
    UpdateMessage(CreateInteractionResponseMessage),
    /// Only valid for autocomplete interactions. Responds to the interaction with autocomplete
    /// choices.
    ///
    /// Corresponds to Discord's `APPLICATION_COMMAND_AUTOCOMPLETE_RESULT`.
    Autocomplete(Vec<CreateAutocompleteChoice>),
    /// Not valid for modal submit interactions. Responds to the interaction with a popup modal.
    ///
    /// Corresponds to Discord's `MODAL`.
    Modal(CreateModal),
}

impl CreateInteractionResponse {
    #[must_use]
    pub fn kind(&self) -> InteractionResponseType {
        match self {
            Self::Pong => InteractionResponseType::Pong,
            Self::Message(_) => InteractionResponseType::ChannelMessageWithSource,
            Self::Defer {
                ..
            } => InteractionResponseType::DeferredChannelMessageWithSource,
            Self::Acknowledge => InteractionResponseType::DeferredUpdateMessage,
            Self::UpdateMessage(_) => InteractionResponseType::UpdateMessage,
            Self::Autocomplete(_) => InteractionResponseType::Autocomplete,
            Self::Modal(_) => InteractionResponseType::Modal,
        }
    }

    /// Removes the files to upload from the response, leaving their `attachments` metadata in
    /// place.
    pub(crate) fn take_files(&mut self) -> Vec<CreateAttachment> {
        match self {
            Self::Message(message) | Self::UpdateMessage(message) => message.take_files(),
            _ => Vec::new(),
        }
    }
}

impl Serialize for CreateInteractionResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct DeferData {
            flags: InteractionResponseFlags,
        }

        #[derive(Serialize)]
        struct AutocompleteData<'a> {
            choices: &'a [CreateAutocompleteChoice],
        }

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind())?;

        match self {
            Self::Pong | Self::Acknowledge => {},
            Self::Message(message) | Self::UpdateMessage(message) => {
                map.serialize_entry("data", message)?;
            },
            Self::Defer {
                ephemeral,
            } => {
                if *ephemeral {
                    map.serialize_entry("data", &DeferData {
                        flags: InteractionResponseFlags::EPHEMERAL,
                    })?;
                }
            },
            Self::Autocomplete(choices) => {
                map.serialize_entry("data", &AutocompleteData {
                    choices,
                })?;
            },
            Self::Modal(modal) => map.serialize_entry("data", modal)?,
        }

        map.end()
    }
}

impl Validate for CreateInteractionResponse {
    fn validate(&self) -> StdResult<(), ValidationError> {
        match self {
            Self::Pong
            | Self::Acknowledge
            | Self::Defer {
                ..
            } => Ok(()),
            Self::Message(message) | Self::UpdateMessage(message) => message.validate(),
            Self::Autocomplete(choices) => {
                Maximum::AutocompleteChoiceCount.check_overflow(choices.len())?;
                validate_all(choices)
            },
            Self::Modal(modal) => modal.validate(),
        }
    }
}

/// A message sent in response to an interaction, or as an edit or follow-up of one.
///
/// A message must have content, embeds, components or files.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-messages).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[must_use]
pub struct CreateInteractionResponseMessage {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    tts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<Payload<CreateEmbed>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<InteractionResponseFlags>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    components: Vec<Payload<CreateActionRow>>,
    #[serde(
        rename = "attachments",
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_attachments"
    )]
    files: Vec<CreateAttachment>,
}

fn serialize_attachments<S: Serializer>(
    files: &[CreateAttachment],
    serializer: S,
) -> StdResult<S::Ok, S::Error> {
    attachment_metadata(files).serialize(serializer)
}

impl CreateInteractionResponseMessage {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the message is text-to-speech.
    ///
    /// Think carefully before setting this to `true`.
    ///
    /// Defaults to `false`.
    pub fn tts(mut self, tts: bool) -> Self {
        self.tts = tts;
        self
    }

    /// Set the content of the message.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is longer than 2000 characters.
    pub fn content(mut self, content: impl Into<String>) -> StdResult<Self, ValidationError> {
        let content = content.into();
        check_length(&content, Maximum::MessageLength)?;
        self.content = Some(content);
        Ok(self)
    }

    /// Adds an embed to the message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message already has 10 embeds.
    pub fn embed(mut self, embed: impl Into<Payload<CreateEmbed>>) -> StdResult<Self, ValidationError> {
        Maximum::EmbedCount.check_overflow(self.embeds.len() + 1)?;
        self.embeds.push(embed.into());
        Ok(self)
    }

    /// Replaces the embeds of the message.
    ///
    /// # Errors
    ///
    /// Returns an error for more than 10 embeds.
    pub fn embeds(
        mut self,
        embeds: impl IntoIterator<Item = impl Into<Payload<CreateEmbed>>>,
    ) -> StdResult<Self, ValidationError> {
        let embeds = embeds.into_iter().map(Into::into).collect::<Vec<_>>();
        Maximum::EmbedCount.check_overflow(embeds.len())?;
        self.embeds = embeds;
        Ok(self)
    }

    /// Sets the components of this message.
    ///
    /// # Errors
    ///
    /// Returns an error for more than five action rows.
    pub fn components(
        mut self,
        rows: impl IntoIterator<Item = impl Into<Payload<CreateActionRow>>>,
    ) -> StdResult<Self, ValidationError> {
        let rows = rows.into_iter().map(Into::into).collect::<Vec<_>>();
        Maximum::ActionRowCount.check_overflow(rows.len())?;
        self.components = rows;
        Ok(self)
    }

    /// Adds a file to upload along with the message.
    pub fn add_file(mut self, file: CreateAttachment) -> Self {
        self.files.push(file);
        self
    }

    /// Adds multiple files to upload along with the message.
    pub fn add_files(mut self, files: impl IntoIterator<Item = CreateAttachment>) -> Self {
        self.files.extend(files);
        self
    }

    /// Sets the flags for the message, replacing any flags set before.
    pub fn flags(mut self, flags: InteractionResponseFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Adds or removes the ephemeral flag.
    ///
    /// Ephemeral messages are only visible to the user who triggered the interaction.
    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        let mut flags = self.flags.unwrap_or_else(InteractionResponseFlags::empty);
        flags.set(InteractionResponseFlags::EPHEMERAL, ephemeral);

        self.flags = Some(flags);
        self
    }

    /// Whether the message has no content, embeds, components or files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().map_or(true, str::is_empty)
            && self.embeds.is_empty()
            && self.components.is_empty()
            && self.files.is_empty()
    }

    /// The files to upload with this message.
    #[must_use]
    pub fn files(&self) -> &[CreateAttachment] {
        &self.files
    }

    /// Moves the file contents out for upload. The `attachments` metadata keeps serializing from
    /// the emptied entries.
    pub(crate) fn take_files(&mut self) -> Vec<CreateAttachment> {
        self.files
            .iter_mut()
            .map(|file| CreateAttachment {
                data: std::mem::take(&mut file.data),
                filename: file.filename.clone(),
                description: file.description.clone(),
            })
            .collect()
    }
}

impl Validate for CreateInteractionResponseMessage {
    fn validate(&self) -> StdResult<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        if let Some(content) = &self.content {
            check_length(content, Maximum::MessageLength)?;
        }

        Maximum::EmbedCount.check_overflow(self.embeds.len())?;
        validate_all(&self.embeds)?;
        let total = self
            .embeds
            .iter()
            .filter_map(|embed| match embed {
                Payload::Builder(embed) => Some(embed.get_length()),
                Payload::Raw(_) => None,
            })
            .sum();
        Maximum::EmbedLength.check_overflow(total)?;

        check_message_rows(&self.components)
    }
}

/// The value of an autocomplete choice, matching the type of the focused option.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum AutocompleteValue {
    String(String),
    Integer(i64),
    Number(f64),
}

impl From<String> for AutocompleteValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for AutocompleteValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for AutocompleteValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for AutocompleteValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A suggestion shown to the user while they type into an autocomplete option.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/application-commands#application-command-object-application-command-option-choice-structure).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct CreateAutocompleteChoice {
    name: String,
    value: AutocompleteValue,
}

impl CreateAutocompleteChoice {
    /// Creates a choice with the given display name and value.
    ///
    /// # Errors
    ///
    /// Returns an error if the name, or a string value, is empty or longer than 100 characters.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<AutocompleteValue>,
    ) -> StdResult<Self, ValidationError> {
        let choice = Self {
            name: name.into(),
            value: value.into(),
        };
        choice.validate()?;
        Ok(choice)
    }
}

impl Validate for CreateAutocompleteChoice {
    fn validate(&self) -> StdResult<(), ValidationError> {
        check_length_range(&self.name, Minimum::AutocompleteChoiceName, Maximum::AutocompleteChoiceName)?;
        if let AutocompleteValue::String(value) = &self.value {
            check_length_range(
                value,
                Minimum::AutocompleteChoiceValue,
                Maximum::AutocompleteChoiceValue,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{CreateButton, CreateInputText};
    use crate::json::{json, to_value};
    use crate::model::application::InputTextStyle;

    #[test]
    fn empty_message() {
        let message = CreateInteractionResponseMessage::new();
        assert!(message.is_empty());
        assert_eq!(message.validate(), Err(ValidationError::EmptyMessage));

        let message = CreateInteractionResponseMessage::new().content("").unwrap();
        assert_eq!(message.validate(), Err(ValidationError::EmptyMessage));

        let message = CreateInteractionResponseMessage::new()
            .add_file(CreateAttachment::bytes(b"x".to_vec(), "x.txt"));
        assert!(message.validate().is_ok());
    }

    #[test]
    fn message_json() {
        let row = CreateActionRow::buttons([CreateButton::new("ok").unwrap()]).unwrap();
        let message = CreateInteractionResponseMessage::new()
            .content("hello")
            .unwrap()
            .ephemeral(true)
            .components([row])
            .unwrap();

        assert_eq!(
            to_value(CreateInteractionResponse::Message(message)).unwrap(),
            json!({
                "type": 4,
                "data": {
                    "content": "hello",
                    "flags": 64,
                    "components": [{
                        "type": 1,
                        "components": [{"type": 2, "style": 1, "custom_id": "ok", "disabled": false}],
                    }],
                },
            })
        );
    }

    #[test]
    fn bodyless_responses() {
        assert_eq!(to_value(CreateInteractionResponse::Pong).unwrap(), json!({"type": 1}));
        assert_eq!(to_value(CreateInteractionResponse::Acknowledge).unwrap(), json!({"type": 6}));
        assert_eq!(
            to_value(CreateInteractionResponse::Defer {
                ephemeral: false
            })
            .unwrap(),
            json!({"type": 5})
        );
        assert_eq!(
            to_value(CreateInteractionResponse::Defer {
                ephemeral: true
            })
            .unwrap(),
            json!({"type": 5, "data": {"flags": 64}})
        );
    }

    #[test]
    fn content_limit() {
        assert!(CreateInteractionResponseMessage::new().content("a".repeat(2000)).is_ok());
        assert!(CreateInteractionResponseMessage::new().content("a".repeat(2001)).is_err());
    }

    #[test]
    fn text_inputs_are_rejected_in_messages() {
        let input = CreateInputText::new(InputTextStyle::Short, "Name", "name").unwrap();
        let message = CreateInteractionResponseMessage::new()
            .components([CreateActionRow::input_text(input)])
            .unwrap();
        assert!(matches!(message.validate(), Err(ValidationError::InvalidComponent(_))));
    }

    #[test]
    fn autocomplete() {
        let choices = vec![
            CreateAutocompleteChoice::new("Five", 5_i64).unwrap(),
            CreateAutocompleteChoice::new("Half", 0.5).unwrap(),
            CreateAutocompleteChoice::new("Rust", "rust").unwrap(),
        ];
        let response = CreateInteractionResponse::Autocomplete(choices);
        assert!(response.validate().is_ok());
        assert_eq!(
            to_value(&response).unwrap(),
            json!({
                "type": 8,
                "data": {"choices": [
                    {"name": "Five", "value": 5},
                    {"name": "Half", "value": 0.5},
                    {"name": "Rust", "value": "rust"},
                ]},
            })
        );

        assert!(CreateAutocompleteChoice::new("", "x").is_err());
        assert!(CreateAutocompleteChoice::new("x", "v".repeat(101)).is_err());

        let choice = CreateAutocompleteChoice::new("n", 1_i64).unwrap();
        let too_many = CreateInteractionResponse::Autocomplete(vec![choice; 26]);
        assert!(matches!(too_many.validate(), Err(ValidationError::TooLarge { .. })));
    }

    #[test]
    fn files_keep_their_metadata() {
        let mut response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .add_file(CreateAttachment::bytes(b"data".to_vec(), "a.txt")),
        );

        let files = response.take_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].data, b"data");
        assert_eq!(
            to_value(&response).unwrap(),
            json!({"type": 4, "data": {"attachments": [{"id": 0, "filename": "a.txt"}]}})
        );
    }
}
