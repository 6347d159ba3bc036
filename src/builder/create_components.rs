use serde::ser::{Serialize, SerializeMap as _, Serializer};

use super::{check_custom_id, check_length, check_length_range, validate_all, Payload, Validate};
use crate::internal::prelude::*;
use crate::model::error::{Maximum, Minimum};
use crate::model::prelude::*;

/// A builder for creating a components action row in a message or modal.
///
/// A row holds up to five buttons, or a single select menu, or a single text input.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/message-components#action-rows).
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct CreateActionRow {
    components: Vec<Payload<CreateComponent>>,
}

impl CreateActionRow {
    /// Creates an empty action row. At least one component must be added before it is sent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a row of buttons.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooLarge`] for more than five buttons.
    pub fn buttons(
        buttons: impl IntoIterator<Item = CreateButton>,
    ) -> StdResult<Self, ValidationError> {
        Self::new().add_components(buttons)
    }

    /// Creates a row holding a single select menu.
    pub fn select_menu(select_menu: CreateSelectMenu) -> Self {
        Self {
            components: vec![Payload::Builder(CreateComponent::SelectMenu(select_menu))],
        }
    }

    /// Creates a row holding a single text input. Only valid in modals.
    pub fn input_text(input_text: CreateInputText) -> Self {
        Self {
            components: vec![Payload::Builder(CreateComponent::InputText(input_text))],
        }
    }

    /// Adds a single component to the row.
    ///
    /// # Errors
    ///
    /// See [`Self::add_components`].
    pub fn add_component(
        self,
        component: impl Into<Payload<CreateComponent>>,
    ) -> StdResult<Self, ValidationError> {
        self.add_components([component])
    }

    /// Adds several components to the row.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooLarge`] if the row would hold more than five components, or
    /// [`ValidationError::InvalidComponent`] if a select menu or text input would share the row
    /// with another component.
    pub fn add_components<I>(mut self, components: I) -> StdResult<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: Into<Payload<CreateComponent>>,
    {
        let added = components.into_iter().map(Into::into).collect::<Vec<_>>();
        Maximum::ActionRowComponentCount.check_overflow(self.components.len() + added.len())?;

        self.components.extend(added);
        check_row_kinds(self.components.iter().map(Payload::component_type))?;
        Ok(self)
    }

    /// The number of components in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Payload<CreateActionRow> {
    /// The types of the components in the row, `None` where a raw child has no known type.
    fn component_types(&self) -> Vec<Option<ComponentType>> {
        match self {
            Self::Builder(row) => row.components.iter().map(Payload::component_type).collect(),
            Self::Raw(value) => value
                .get("components")
                .and_then(Value::as_array)
                .map(|children| children.iter().map(raw_component_type).collect())
                .unwrap_or_default(),
        }
    }
}

impl Serialize for CreateActionRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", &ComponentType::ActionRow)?;
        map.serialize_entry("components", &self.components)?;
        map.end()
    }
}

impl Validate for CreateActionRow {
    fn validate(&self) -> StdResult<(), ValidationError> {
        if self.components.is_empty() {
            return Err(ValidationError::InvalidComponent("an action row cannot be empty"));
        }
        Maximum::ActionRowComponentCount.check_overflow(self.components.len())?;
        check_row_kinds(self.components.iter().map(Payload::component_type))?;
        validate_all(&self.components)
    }

    fn validate_raw(value: &Value) -> StdResult<(), ValidationError> {
        let row = value.as_object().ok_or(ValidationError::InvalidRaw("expected a JSON object"))?;

        if row.get("type").and_then(Value::as_u64) != Some(1) {
            return Err(ValidationError::InvalidRaw("an action row must have `type: 1`"));
        }

        let children = row
            .get("components")
            .and_then(Value::as_array)
            .ok_or(ValidationError::InvalidRaw("an action row must have a `components` array"))?;
        Maximum::ActionRowComponentCount.check_overflow(children.len())?;

        let kinds = children
            .iter()
            .map(|child| {
                raw_component_type(child)
                    .ok_or(ValidationError::InvalidRaw("a component must have a numeric `type`"))
            })
            .collect::<StdResult<Vec<_>, _>>()?;
        check_row_kinds(kinds.into_iter().map(Some))
    }
}

fn raw_component_type(value: &Value) -> Option<ComponentType> {
    value
        .get("type")
        .and_then(Value::as_u64)
        .and_then(|kind| u8::try_from(kind).ok())
        .map(ComponentType::from)
}

fn check_row_kinds(
    kinds: impl ExactSizeIterator<Item = Option<ComponentType>>,
) -> StdResult<(), ValidationError> {
    let len = kinds.len();
    let mut kinds = kinds.flatten();
    if len > 1 && kinds.any(|kind| kind.is_select_menu() || kind == ComponentType::InputText) {
        return Err(ValidationError::InvalidComponent(
            "a select menu or text input must be alone in its action row",
        ));
    }

    Ok(())
}

/// Any component that can be placed inside an action row.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum CreateComponent {
    Button(CreateButton),
    SelectMenu(CreateSelectMenu),
    /// Only valid in modals!
    InputText(CreateInputText),
}

impl CreateComponent {
    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        match self {
            Self::Button(_) => ComponentType::Button,
            Self::SelectMenu(menu) => menu.kind.component_type(),
            Self::InputText(_) => ComponentType::InputText,
        }
    }
}

impl Serialize for CreateComponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        match self {
            Self::Button(button) => button.serialize(serializer),
            Self::SelectMenu(menu) => menu.serialize(serializer),
            Self::InputText(input) => input.serialize(serializer),
        }
    }
}

impl Validate for CreateComponent {
    fn validate(&self) -> StdResult<(), ValidationError> {
        match self {
            Self::Button(button) => button.validate(),
            Self::SelectMenu(menu) => menu.validate(),
            Self::InputText(input) => input.validate(),
        }
    }

    fn validate_raw(value: &Value) -> StdResult<(), ValidationError> {
        match value.get("type") {
            Some(kind) if kind.is_u64() => Ok(()),
            _ => Err(ValidationError::InvalidRaw("a component must have a numeric `type`")),
        }
    }
}

impl Payload<CreateComponent> {
    fn component_type(&self) -> Option<ComponentType> {
        match self {
            Self::Builder(component) => Some(component.component_type()),
            Self::Raw(value) => raw_component_type(value),
        }
    }
}

macro_rules! impl_into_component {
    ($($builder:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$builder> for CreateComponent {
                fn from(builder: $builder) -> Self {
                    Self::$variant(builder)
                }
            }

            impl From<$builder> for Payload<CreateComponent> {
                fn from(builder: $builder) -> Self {
                    Self::Builder(CreateComponent::$variant(builder))
                }
            }
        )*
    };
}

impl_into_component! {
    CreateButton => Button,
    CreateSelectMenu => SelectMenu,
    CreateInputText => InputText,
}

/// A builder for creating a button component in a message.
///
/// Link buttons carry a url and never send an interaction. Every other style carries a custom id.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/message-components#buttons).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct CreateButton {
    style: ButtonStyle,
    #[serde(rename = "type")]
    kind: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emoji: Option<ComponentEmoji>,
    disabled: bool,
}

impl CreateButton {
    /// Creates a [`ButtonStyle::Primary`] button with the given custom id.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom id is empty or longer than 100 characters.
    pub fn new(custom_id: impl Into<String>) -> StdResult<Self, ValidationError> {
        Self::empty(ButtonStyle::Primary).custom_id(custom_id)
    }

    /// Creates a link button to the given URL.
    ///
    /// Clicking this button _will not_ trigger an interaction.
    ///
    /// # Errors
    ///
    /// See [`Self::url`].
    pub fn new_link(url: impl Into<String>) -> StdResult<Self, ValidationError> {
        Self::empty(ButtonStyle::Link).url(url)
    }

    fn empty(style: ButtonStyle) -> Self {
        Self {
            style,
            kind: ComponentType::Button,
            url: None,
            custom_id: None,
            label: None,
            emoji: None,
            disabled: false,
        }
    }

    /// Sets the style of this button.
    ///
    /// Switching between link and non-link styles leaves the button invalid until the url or
    /// custom id is adjusted accordingly.
    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the custom id of the button, a developer-defined identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom id is empty or longer than 100 characters.
    pub fn custom_id(mut self, custom_id: impl Into<String>) -> StdResult<Self, ValidationError> {
        let custom_id = custom_id.into();
        check_custom_id(&custom_id)?;
        self.custom_id = Some(custom_id);
        Ok(self)
    }

    /// Sets the url of a link button.
    ///
    /// # Errors
    ///
    /// Returns an error if the url is longer than 512 characters, or does not use the `http`,
    /// `https` or `discord` scheme.
    pub fn url(mut self, url: impl Into<String>) -> StdResult<Self, ValidationError> {
        let url = url.into();
        check_length(&url, Maximum::ButtonUrl)?;
        if !["http://", "https://", "discord://"].iter().any(|scheme| url.starts_with(scheme)) {
            return Err(ValidationError::InvalidUrl {
                field: "url",
                url,
            });
        }

        self.url = Some(url);
        Ok(self)
    }

    /// Sets the label of the button.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is longer than 80 characters.
    pub fn label(mut self, label: impl Into<String>) -> StdResult<Self, ValidationError> {
        let label = label.into();
        check_length(&label, Maximum::ButtonLabel)?;
        self.label = Some(label);
        Ok(self)
    }

    /// Sets the emoji of the button.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmoji`] if the emoji has neither an id nor a name.
    pub fn emoji(mut self, emoji: impl Into<ComponentEmoji>) -> StdResult<Self, ValidationError> {
        let emoji = emoji.into();
        if !emoji.is_valid() {
            return Err(ValidationError::InvalidEmoji);
        }
        self.emoji = Some(emoji);
        Ok(self)
    }

    /// Sets the disabled state for the button.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl Validate for CreateButton {
    fn validate(&self) -> StdResult<(), ValidationError> {
        if self.style == ButtonStyle::Link {
            if self.custom_id.is_some() {
                return Err(ValidationError::ForbiddenField("custom_id"));
            }
            if self.url.is_none() {
                return Err(ValidationError::MissingField("url"));
            }
        } else {
            if self.url.is_some() {
                return Err(ValidationError::ForbiddenField("url"));
            }
            if self.custom_id.is_none() {
                return Err(ValidationError::MissingField("custom_id"));
            }
        }

        if self.emoji.as_ref().is_some_and(|emoji| !emoji.is_valid()) {
            return Err(ValidationError::InvalidEmoji);
        }

        Ok(())
    }
}

/// The kind of a select menu, along with the data only that kind takes.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/message-components#select-menu-object-select-menu-types).
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum CreateSelectMenuKind {
    String { options: Vec<CreateSelectMenuOption> },
    User,
    Role,
    Mentionable,
    Channel { channel_types: Vec<ChannelType> },
}

impl CreateSelectMenuKind {
    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        match self {
            Self::String {
                ..
            } => ComponentType::StringSelect,
            Self::User => ComponentType::UserSelect,
            Self::Role => ComponentType::RoleSelect,
            Self::Mentionable => ComponentType::MentionableSelect,
            Self::Channel {
                ..
            } => ComponentType::ChannelSelect,
        }
    }
}

impl Serialize for CreateSelectMenuKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Json<'a> {
            #[serde(rename = "type")]
            kind: ComponentType,
            #[serde(skip_serializing_if = "Option::is_none")]
            options: Option<&'a [CreateSelectMenuOption]>,
            #[serde(skip_serializing_if = "Option::is_none")]
            channel_types: Option<&'a [ChannelType]>,
        }

        #[rustfmt::skip]
        let json = Json {
            kind: self.component_type(),
            options: match self {
                Self::String { options } => Some(options),
                _ => None,
            },
            channel_types: match self {
                Self::Channel { channel_types } if !channel_types.is_empty() => Some(channel_types),
                _ => None,
            },
        };

        json.serialize(serializer)
    }
}

/// A builder for creating a select menu component in a message.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/message-components#select-menu-object-select-menu-structure).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct CreateSelectMenu {
    custom_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_values: Option<u8>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    disabled: bool,

    #[serde(flatten)]
    kind: CreateSelectMenuKind,
}

impl CreateSelectMenu {
    /// Creates a select menu with the given custom id (a developer-defined identifier) and kind,
    /// leaving all other fields empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom id is empty or longer than 100 characters.
    pub fn new(
        custom_id: impl Into<String>,
        kind: CreateSelectMenuKind,
    ) -> StdResult<Self, ValidationError> {
        let custom_id = custom_id.into();
        check_custom_id(&custom_id)?;

        Ok(Self {
            custom_id,
            placeholder: None,
            min_values: None,
            max_values: None,
            disabled: false,
            kind,
        })
    }

    /// Creates a string select menu with the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom id is invalid, or if there are more than 25 options.
    pub fn string(
        custom_id: impl Into<String>,
        options: Vec<CreateSelectMenuOption>,
    ) -> StdResult<Self, ValidationError> {
        Maximum::SelectMenuOptionCount.check_overflow(options.len())?;
        Self::new(custom_id, CreateSelectMenuKind::String {
            options,
        })
    }

    /// Adds an option to a string select menu.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ForbiddenField`] if this is not a string select menu, or
    /// [`ValidationError::TooLarge`] if it already holds 25 options.
    pub fn add_option(
        mut self,
        option: CreateSelectMenuOption,
    ) -> StdResult<Self, ValidationError> {
        match &mut self.kind {
            CreateSelectMenuKind::String {
                options,
            } => {
                Maximum::SelectMenuOptionCount.check_overflow(options.len() + 1)?;
                options.push(option);
            },
            _ => return Err(ValidationError::ForbiddenField("options")),
        }

        Ok(self)
    }

    /// The placeholder of the select menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the placeholder is longer than 150 characters.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> StdResult<Self, ValidationError> {
        let placeholder = placeholder.into();
        check_length(&placeholder, Maximum::SelectMenuPlaceholder)?;
        self.placeholder = Some(placeholder);
        Ok(self)
    }

    /// Sets the minimum number of values the user has to select, between 0 and 25.
    ///
    /// # Errors
    ///
    /// Returns an error if `min` is above 25.
    pub fn min_values(mut self, min: u8) -> StdResult<Self, ValidationError> {
        Maximum::SelectMenuValues.check_overflow(min.into())?;
        self.min_values = Some(min);
        Ok(self)
    }

    /// Sets the maximum number of values the user can select, between 1 and 25.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` is 0 or above 25.
    pub fn max_values(mut self, max: u8) -> StdResult<Self, ValidationError> {
        Minimum::SelectMenuMaxValues.check_underflow(max.into())?;
        Maximum::SelectMenuValues.check_overflow(max.into())?;
        self.max_values = Some(max);
        Ok(self)
    }

    /// Sets the disabled state for the select menu.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl Validate for CreateSelectMenu {
    fn validate(&self) -> StdResult<(), ValidationError> {
        check_custom_id(&self.custom_id)?;

        // Discord defaults both bounds to 1
        let min = self.min_values.unwrap_or(1);
        let max = self.max_values.unwrap_or(1);
        if min > max {
            return Err(ValidationError::InvalidRange {
                field: "values",
                min: min.into(),
                max: max.into(),
            });
        }

        if let CreateSelectMenuKind::String {
            options,
        } = &self.kind
        {
            Minimum::SelectMenuOptionCount.check_underflow(options.len())?;
            Maximum::SelectMenuOptionCount.check_overflow(options.len())?;
            if usize::from(max) > options.len() {
                return Err(ValidationError::InvalidComponent(
                    "a string select menu cannot take more values than it has options",
                ));
            }
            validate_all(options)?;
        }

        Ok(())
    }
}

/// A builder for creating an option of a select menu component in a message.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/message-components#select-menu-object-select-option-structure)
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct CreateSelectMenuOption {
    label: String,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emoji: Option<ComponentEmoji>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<bool>,
}

impl CreateSelectMenuOption {
    /// Creates a select menu option with the given label and value, leaving all other fields
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the label or value is empty or longer than 100 characters.
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> StdResult<Self, ValidationError> {
        let label = label.into();
        let value = value.into();
        check_length_range(&label, Minimum::SelectOptionLabel, Maximum::SelectOptionLabel)?;
        check_length_range(&value, Minimum::SelectOptionValue, Maximum::SelectOptionValue)?;

        Ok(Self {
            label,
            value,
            description: None,
            emoji: None,
            default: None,
        })
    }

    /// Sets the description shown on this option.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is longer than 100 characters.
    pub fn description(
        mut self,
        description: impl Into<String>,
    ) -> StdResult<Self, ValidationError> {
        let description = description.into();
        check_length(&description, Maximum::SelectOptionDescription)?;
        self.description = Some(description);
        Ok(self)
    }

    /// Sets the emoji of the option.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmoji`] if the emoji has neither an id nor a name.
    pub fn emoji(mut self, emoji: impl Into<ComponentEmoji>) -> StdResult<Self, ValidationError> {
        let emoji = emoji.into();
        if !emoji.is_valid() {
            return Err(ValidationError::InvalidEmoji);
        }
        self.emoji = Some(emoji);
        Ok(self)
    }

    /// Sets this option as selected by default.
    pub fn default_selection(mut self, default: bool) -> Self {
        self.default = Some(default);
        self
    }
}

impl Validate for CreateSelectMenuOption {
    fn validate(&self) -> StdResult<(), ValidationError> {
        check_length_range(&self.label, Minimum::SelectOptionLabel, Maximum::SelectOptionLabel)?;
        check_length_range(&self.value, Minimum::SelectOptionValue, Maximum::SelectOptionValue)?;
        if let Some(description) = &self.description {
            check_length(description, Maximum::SelectOptionDescription)?;
        }
        Ok(())
    }
}

/// A builder for creating an input text component in a modal.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/message-components#text-inputs-text-input-structure).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct CreateInputText {
    #[serde(rename = "type")]
    kind: ComponentType,
    custom_id: String,
    style: InputTextStyle,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<u16>,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
}

impl CreateInputText {
    /// Creates a text input with the given style, label, and custom id (a developer-defined
    /// identifier), leaving all other fields empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is empty or longer than 45 characters, or if the custom id
    /// is invalid.
    pub fn new(
        style: InputTextStyle,
        label: impl Into<String>,
        custom_id: impl Into<String>,
    ) -> StdResult<Self, ValidationError> {
        let label = label.into();
        let custom_id = custom_id.into();
        check_length_range(&label, Minimum::InputTextLabel, Maximum::InputTextLabel)?;
        check_custom_id(&custom_id)?;

        Ok(Self {
            kind: ComponentType::InputText,
            custom_id,
            style,
            label,
            min_length: None,
            max_length: None,
            required: true,
            value: None,
            placeholder: None,
        })
    }

    /// Sets the style of this input text. Replaces the current value as set in [`Self::new`].
    pub fn style(mut self, style: InputTextStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the placeholder of this input text.
    ///
    /// # Errors
    ///
    /// Returns an error if the placeholder is longer than 100 characters.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> StdResult<Self, ValidationError> {
        let placeholder = placeholder.into();
        check_length(&placeholder, Maximum::InputTextPlaceholder)?;
        self.placeholder = Some(placeholder);
        Ok(self)
    }

    /// Sets the minimum length required for the input text, at most 4000.
    ///
    /// # Errors
    ///
    /// Returns an error if `min` is above 4000.
    pub fn min_length(mut self, min: u16) -> StdResult<Self, ValidationError> {
        Maximum::InputTextLength.check_overflow(min.into())?;
        self.min_length = Some(min);
        Ok(self)
    }

    /// Sets the maximum length allowed for the input text, between 1 and 4000.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` is 0 or above 4000.
    pub fn max_length(mut self, max: u16) -> StdResult<Self, ValidationError> {
        Minimum::InputTextMaxLength.check_underflow(max.into())?;
        Maximum::InputTextLength.check_overflow(max.into())?;
        self.max_length = Some(max);
        Ok(self)
    }

    /// Sets the pre-filled value of this input text.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is longer than 4000 characters.
    pub fn value(mut self, value: impl Into<String>) -> StdResult<Self, ValidationError> {
        let value = value.into();
        check_length(&value, Maximum::InputTextLength)?;
        self.value = Some(value);
        Ok(self)
    }

    /// Sets if the input text is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl Validate for CreateInputText {
    fn validate(&self) -> StdResult<(), ValidationError> {
        check_custom_id(&self.custom_id)?;
        check_length_range(&self.label, Minimum::InputTextLabel, Maximum::InputTextLabel)?;

        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(ValidationError::InvalidRange {
                    field: "length",
                    min,
                    max,
                });
            }
        }

        Ok(())
    }
}

/// Checks the rows of a message, which cannot hold text inputs.
pub(super) fn check_message_rows(
    rows: &[Payload<CreateActionRow>],
) -> StdResult<(), ValidationError> {
    Maximum::ActionRowCount.check_overflow(rows.len())?;
    validate_all(rows)?;

    let mut kinds = rows.iter().flat_map(|row| row.component_types());
    if kinds.any(|kind| kind == Some(ComponentType::InputText)) {
        return Err(ValidationError::InvalidComponent("text inputs are only allowed in modals"));
    }
    Ok(())
}

/// Checks the rows of a modal, each of which holds exactly one text input.
pub(super) fn check_modal_rows(rows: &[Payload<CreateActionRow>]) -> StdResult<(), ValidationError> {
    Minimum::ActionRowCount.check_underflow(rows.len())?;
    Maximum::ActionRowCount.check_overflow(rows.len())?;
    validate_all(rows)?;

    if rows.iter().any(|row| row.component_types() != [Some(ComponentType::InputText)]) {
        return Err(ValidationError::InvalidComponent("a modal row must hold a single text input"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ACTION_ROW_COMPONENT_MAX_COUNT;
    use crate::json::json;

    fn button(id: &str) -> CreateButton {
        CreateButton::new(id).unwrap()
    }

    #[test]
    fn action_row_capacity() {
        for existing in 0..=ACTION_ROW_COMPONENT_MAX_COUNT {
            let row = CreateActionRow::new()
                .add_components((0..existing).map(|i| button(&format!("existing-{i}"))))
                .unwrap();

            for added in 0..=6 {
                let buttons = (0..added).map(|i| button(&format!("added-{i}")));
                let result = row.clone().add_components(buttons);
                if existing + added <= ACTION_ROW_COMPONENT_MAX_COUNT {
                    assert_eq!(result.unwrap().len(), existing + added);
                } else {
                    assert!(
                        matches!(result, Err(ValidationError::TooLarge { .. })),
                        "{existing} + {added} should overflow"
                    );
                }
            }
        }
    }

    #[test]
    fn action_row_mixing() {
        let menu = CreateSelectMenu::new("menu", CreateSelectMenuKind::User).unwrap();
        let row = CreateActionRow::new().add_component(button("a")).unwrap();
        assert!(matches!(
            row.add_component(menu.clone()),
            Err(ValidationError::InvalidComponent(_))
        ));

        let row = CreateActionRow::select_menu(menu);
        assert!(row.validate().is_ok());
        assert!(row.add_component(button("b")).is_err());

        assert!(matches!(CreateActionRow::new().validate(), Err(ValidationError::InvalidComponent(_))));
    }

    #[test]
    fn action_row_json() {
        let row = CreateActionRow::buttons([
            button("yes").style(ButtonStyle::Success).label("Yes").unwrap(),
            CreateButton::new_link("https://example.com").unwrap().label("Docs").unwrap(),
        ])
        .unwrap();

        assert!(row.validate().is_ok());
        assert_eq!(
            crate::json::to_value(&row).unwrap(),
            json!({
                "type": 1,
                "components": [
                    {"type": 2, "style": 3, "custom_id": "yes", "label": "Yes", "disabled": false},
                    {"type": 2, "style": 5, "url": "https://example.com", "label": "Docs", "disabled": false},
                ]
            })
        );
    }

    #[test]
    fn raw_rows() {
        let ok = json!({"type": 1, "components": [{"type": 2, "style": 1, "custom_id": "x"}]});
        assert!(CreateActionRow::validate_raw(&ok).is_ok());

        let wrong_type = json!({"type": 2, "components": []});
        assert!(CreateActionRow::validate_raw(&wrong_type).is_err());

        let too_many = json!({"type": 1, "components": vec![json!({"type": 2}); 6]});
        assert!(matches!(
            CreateActionRow::validate_raw(&too_many),
            Err(ValidationError::TooLarge { .. })
        ));

        let untyped_child = json!({"type": 1, "components": [{"style": 1}]});
        assert!(matches!(
            CreateActionRow::validate_raw(&untyped_child),
            Err(ValidationError::InvalidRaw(_))
        ));

        let raw_child = CreateActionRow::new()
            .add_component(Payload::<CreateComponent>::raw(json!({"type": 2, "style": 1, "custom_id": "raw"})))
            .unwrap();
        assert!(raw_child.validate().is_ok());
    }

    #[test]
    fn button_rules() {
        let link = CreateButton::new_link("https://example.com").unwrap();
        assert!(link.validate().is_ok());

        let link_with_id = CreateButton::new_link("https://example.com").unwrap().custom_id("x").unwrap();
        assert_eq!(link_with_id.validate(), Err(ValidationError::ForbiddenField("custom_id")));

        let id_with_url = button("x").url("https://example.com").unwrap();
        assert_eq!(id_with_url.validate(), Err(ValidationError::ForbiddenField("url")));

        let link_without_url = button("x").style(ButtonStyle::Link);
        assert_eq!(link_without_url.validate(), Err(ValidationError::ForbiddenField("custom_id")));

        assert!(matches!(
            CreateButton::new_link("ftp://example.com"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(CreateButton::new_link("discord://-/channels/1/2").is_ok());
        assert!(matches!(button("x").label("a".repeat(81)), Err(ValidationError::TooLarge { .. })));
        assert_eq!(button("x").emoji(ComponentEmoji::default()), Err(ValidationError::InvalidEmoji));
        assert!(CreateButton::new("").is_err());
    }

    #[test]
    fn select_menu_rules() {
        let menu = CreateSelectMenu::string("menu", vec![]).unwrap();
        assert!(matches!(menu.validate(), Err(ValidationError::TooSmall { .. })));

        let option = CreateSelectMenuOption::new("Rust", "rust").unwrap();
        let menu = menu.add_option(option.clone()).unwrap();
        assert!(menu.validate().is_ok());

        let channel = CreateSelectMenu::new("c", CreateSelectMenuKind::Channel {
            channel_types: vec![ChannelType::Text],
        })
        .unwrap();
        assert_eq!(channel.add_option(option), Err(ValidationError::ForbiddenField("options")));

        let inverted = CreateSelectMenu::new("u", CreateSelectMenuKind::User)
            .unwrap()
            .min_values(3)
            .unwrap()
            .max_values(2)
            .unwrap();
        assert!(matches!(inverted.validate(), Err(ValidationError::InvalidRange { .. })));

        let menu = CreateSelectMenu::new("u", CreateSelectMenuKind::User).unwrap();
        assert!(menu.clone().min_values(0).is_ok());
        assert!(menu.clone().min_values(26).is_err());
        assert!(menu.clone().max_values(0).is_err());
        assert!(menu.placeholder("p".repeat(151)).is_err());

        let option = |value: &str| CreateSelectMenuOption::new(value, value).unwrap();
        let short = CreateSelectMenu::string("menu", vec![option("a"), option("b")]).unwrap();
        assert!(short.clone().max_values(2).unwrap().validate().is_ok());
        assert!(matches!(
            short.max_values(3).unwrap().validate(),
            Err(ValidationError::InvalidComponent(_))
        ));

        assert!(CreateSelectMenuOption::new("a".repeat(101), "v").is_err());
        assert!(CreateSelectMenuOption::new("", "v").is_err());
    }

    #[test]
    fn select_menu_json() {
        let menu = CreateSelectMenu::new("c", CreateSelectMenuKind::Channel {
            channel_types: vec![ChannelType::Text, ChannelType::Forum],
        })
        .unwrap()
        .max_values(2)
        .unwrap();

        assert_eq!(
            crate::json::to_value(&menu).unwrap(),
            json!({"type": 8, "custom_id": "c", "max_values": 2, "channel_types": [0, 15]})
        );
    }

    #[test]
    fn message_rows_reject_text_inputs() {
        let input = CreateInputText::new(InputTextStyle::Short, "Name", "name").unwrap();
        assert!(matches!(
            check_message_rows(&[CreateActionRow::input_text(input).into()]),
            Err(ValidationError::InvalidComponent(_))
        ));

        let raw = Payload::<CreateActionRow>::raw(json!({
            "type": 1,
            "components": [{"type": 4, "custom_id": "name", "style": 1, "label": "Name"}],
        }));
        assert!(matches!(check_message_rows(&[raw]), Err(ValidationError::InvalidComponent(_))));

        let buttons = CreateActionRow::buttons([button("a"), button("b")]).unwrap();
        assert!(check_message_rows(&[buttons.into()]).is_ok());
    }

    #[test]
    fn modal_rows_hold_one_text_input() {
        let input = CreateInputText::new(InputTextStyle::Short, "Name", "name").unwrap();
        assert!(check_modal_rows(&[CreateActionRow::input_text(input).into()]).is_ok());

        let raw_input = Payload::<CreateActionRow>::raw(json!({
            "type": 1,
            "components": [{"type": 4, "custom_id": "name", "style": 1, "label": "Name"}],
        }));
        assert!(check_modal_rows(&[raw_input]).is_ok());

        let buttons = CreateActionRow::buttons([button("a")]).unwrap();
        let menu = CreateActionRow::select_menu(
            CreateSelectMenu::new("menu", CreateSelectMenuKind::Role).unwrap(),
        );
        let raw_button = Payload::<CreateActionRow>::raw(json!({
            "type": 1,
            "components": [{"type": 2, "style": 1, "custom_id": "b"}],
        }));
        let rows: [Payload<CreateActionRow>; 3] = [buttons.into(), menu.into(), raw_button];
        for row in rows {
            assert!(matches!(
                check_modal_rows(&[row]),
                Err(ValidationError::InvalidComponent(_))
            ));
        }
    }

    #[test]
    fn input_text_rules() {
        assert!(CreateInputText::new(InputTextStyle::Short, "", "id").is_err());
        assert!(CreateInputText::new(InputTextStyle::Short, "a".repeat(46), "id").is_err());

        let input = CreateInputText::new(InputTextStyle::Paragraph, "Bio", "bio").unwrap();
        assert!(input.clone().max_length(0).is_err());
        assert!(input.clone().min_length(4001).is_err());

        let inverted = input.min_length(10).unwrap().max_length(5).unwrap();
        assert!(matches!(inverted.validate(), Err(ValidationError::InvalidRange { .. })));
    }
}
