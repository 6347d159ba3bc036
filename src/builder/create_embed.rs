//! Developer note:
//!
//! This is a set of embed builders for rich embeds.
//!
//! These are used in [`CreateInteractionResponseMessage::embed`] and its siblings.
//!
//! The only builder that should be exposed is [`CreateEmbed`]. The rest of these have no real
//! reason for being exposed, but are for completeness' sake.
//!
//! Documentation for embeds can be found [here].
//!
//! [`CreateInteractionResponseMessage::embed`]: super::CreateInteractionResponseMessage::embed
//! [here]: https://discord.com/developers/docs/resources/channel#embed-object

use dep_time::OffsetDateTime;
use url::Url;

use super::{char_len, check_length, check_length_range, Validate};
use crate::internal::prelude::*;
use crate::model::error::{Maximum, Minimum};
use crate::model::ValidationError;
use crate::utils::Colour;

/// A builder to create an embed in a message
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#embed-object)
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct CreateEmbed {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "dep_time::serde::rfc3339::option")]
    timestamp: Option<OffsetDateTime>,
    #[serde(rename = "color")]
    #[serde(skip_serializing_if = "Option::is_none")]
    colour: Option<Colour>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<CreateEmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<CreateEmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<CreateEmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<CreateEmbedAuthor>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    fields: Vec<CreateEmbedField>,
}

impl CreateEmbed {
    /// Equivalent to [`Self::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the author of the embed.
    ///
    /// Refer to the documentation for [`CreateEmbedAuthor`] for more information.
    pub fn author(mut self, author: CreateEmbedAuthor) -> Self {
        self.author = Some(author);
        self
    }

    /// Set the colour of the left-hand side of the embed.
    ///
    /// This is an alias of [`Self::colour`].
    ///
    /// # Errors
    ///
    /// See [`Self::colour`].
    pub fn color<C: Into<Colour>>(self, colour: C) -> StdResult<Self, ValidationError> {
        self.colour(colour)
    }

    /// Set the colour of the left-hand side of the embed.
    ///
    /// # Errors
    ///
    /// Returns an error if the colour is above `0xFFFFFF`.
    pub fn colour<C: Into<Colour>>(mut self, colour: C) -> StdResult<Self, ValidationError> {
        let colour = colour.into();
        Maximum::EmbedColour.check_overflow(colour.0 as usize)?;
        self.colour = Some(colour);
        Ok(self)
    }

    /// Set the description of the embed.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is longer than 4096 characters.
    pub fn description(mut self, description: impl Into<String>) -> StdResult<Self, ValidationError> {
        let description = description.into();
        check_length(&description, Maximum::EmbedDescription)?;
        self.description = Some(description);
        Ok(self)
    }

    /// Adds a field. Note that this will not overwrite other fields, and will add to them.
    ///
    /// # Errors
    ///
    /// Returns an error if the embed already has 25 fields, if the name is empty or longer than
    /// 256 characters, or if the value is empty or longer than 1024 characters.
    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> StdResult<Self, ValidationError> {
        Maximum::EmbedFieldCount.check_overflow(self.fields.len() + 1)?;
        self.fields.push(CreateEmbedField::new(name.into(), value.into(), inline)?);
        Ok(self)
    }

    /// Adds multiple fields at once.
    ///
    /// This is sugar to reduce the need of calling [`Self::field`] manually multiple times.
    ///
    /// # Errors
    ///
    /// See [`Self::field`].
    pub fn fields<N, V>(
        self,
        fields: impl IntoIterator<Item = (N, V, bool)>,
    ) -> StdResult<Self, ValidationError>
    where
        N: Into<String>,
        V: Into<String>,
    {
        fields.into_iter().try_fold(self, |embed, (name, value, inline)| {
            embed.field(name, value, inline)
        })
    }

    /// Set the footer of the embed.
    ///
    /// Refer to the documentation for [`CreateEmbedFooter`] for more information.
    pub fn footer(mut self, footer: CreateEmbedFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Set the image associated with the embed. This only supports HTTP(S) and `attachment://`
    /// urls.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] for any other url.
    pub fn image(mut self, url: impl Into<String>) -> StdResult<Self, ValidationError> {
        self.image = Some(CreateEmbedImage {
            url: check_url("image", url.into(), true)?,
        });
        Ok(self)
    }

    /// Set the thumbnail of the embed. This only supports HTTP(S) and `attachment://` urls.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] for any other url.
    pub fn thumbnail(mut self, url: impl Into<String>) -> StdResult<Self, ValidationError> {
        self.thumbnail = Some(CreateEmbedImage {
            url: check_url("thumbnail", url.into(), true)?,
        });
        Ok(self)
    }

    /// Set the timestamp.
    pub fn timestamp(mut self, timestamp: OffsetDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the title of the embed.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is longer than 256 characters.
    pub fn title(mut self, title: impl Into<String>) -> StdResult<Self, ValidationError> {
        let title = title.into();
        check_length(&title, Maximum::EmbedTitle)?;
        self.title = Some(title);
        Ok(self)
    }

    /// Set the URL to direct to when clicking on the title.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] if the url is not an HTTP(S) url.
    pub fn url(mut self, url: impl Into<String>) -> StdResult<Self, ValidationError> {
        self.url = Some(check_url("url", url.into(), false)?);
        Ok(self)
    }

    /// Same as calling [`Self::image`] with "attachment://filename.(jpg, png)".
    ///
    /// Note however, you have to be sure you attach a file with the provided filename to the
    /// message, see [`CreateAttachment`]. Or else this won't work.
    ///
    /// [`CreateAttachment`]: super::CreateAttachment
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] if the filename does not form a valid url.
    pub fn attachment(self, filename: impl Into<String>) -> StdResult<Self, ValidationError> {
        let mut filename = filename.into();
        filename.insert_str(0, "attachment://");
        self.image(filename)
    }

    /// The number of characters Discord counts towards the 6000 character limit of an embed.
    #[must_use]
    pub fn get_length(&self) -> usize {
        let mut length = 0;
        if let Some(author) = &self.author {
            length += char_len(&author.name);
        }

        if let Some(description) = &self.description {
            length += char_len(description);
        }

        for field in &self.fields {
            length += char_len(&field.name);
            length += char_len(&field.value);
        }

        if let Some(footer) = &self.footer {
            length += char_len(&footer.text);
        }

        if let Some(title) = &self.title {
            length += char_len(title);
        }

        length
    }
}

impl Default for CreateEmbed {
    /// Creates a builder with default values, setting the `type` to `rich`.
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            description: None,
            thumbnail: None,
            timestamp: None,
            kind: "rich",
            author: None,
            colour: None,
            footer: None,
            image: None,
            title: None,
            url: None,
        }
    }
}

impl Validate for CreateEmbed {
    fn validate(&self) -> StdResult<(), ValidationError> {
        if let Some(title) = &self.title {
            check_length(title, Maximum::EmbedTitle)?;
        }
        if let Some(description) = &self.description {
            check_length(description, Maximum::EmbedDescription)?;
        }
        if let Some(colour) = self.colour {
            Maximum::EmbedColour.check_overflow(colour.0 as usize)?;
        }

        Maximum::EmbedFieldCount.check_overflow(self.fields.len())?;
        for field in &self.fields {
            field.validate()?;
        }
        if let Some(author) = &self.author {
            check_length(&author.name, Maximum::EmbedAuthorName)?;
        }
        if let Some(footer) = &self.footer {
            check_length(&footer.text, Maximum::EmbedFooterText)?;
        }

        Maximum::EmbedLength.check_overflow(self.get_length())
    }
}

fn check_url(
    field: &'static str,
    url: String,
    allow_attachment: bool,
) -> StdResult<String, ValidationError> {
    let valid = Url::parse(&url).is_ok_and(|parsed| match parsed.scheme() {
        "http" | "https" => true,
        "attachment" => allow_attachment,
        _ => false,
    });

    if valid {
        Ok(url)
    } else {
        Err(ValidationError::InvalidUrl {
            field,
            url,
        })
    }
}

/// A builder to create the author data of an embed. See [`CreateEmbed::author`]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct CreateEmbedAuthor {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
}

impl CreateEmbedAuthor {
    /// Creates an author object with the given name, leaving all other fields empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is longer than 256 characters.
    pub fn new(name: impl Into<String>) -> StdResult<Self, ValidationError> {
        let name = name.into();
        check_length(&name, Maximum::EmbedAuthorName)?;
        Ok(Self {
            name,
            icon_url: None,
            url: None,
        })
    }

    /// Set the URL of the author's icon. This only supports HTTP(S) and `attachment://` urls.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] for any other url.
    pub fn icon_url(mut self, icon_url: impl Into<String>) -> StdResult<Self, ValidationError> {
        self.icon_url = Some(check_url("icon_url", icon_url.into(), true)?);
        Ok(self)
    }

    /// Set the author's URL.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] if the url is not an HTTP(S) url.
    pub fn url(mut self, url: impl Into<String>) -> StdResult<Self, ValidationError> {
        self.url = Some(check_url("url", url.into(), false)?);
        Ok(self)
    }
}

/// A builder to create the footer data for an embed. See [`CreateEmbed::footer`]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct CreateEmbedFooter {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
}

impl CreateEmbedFooter {
    /// Creates a new footer object with the given text, leaving all other fields empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is longer than 2048 characters.
    pub fn new(text: impl Into<String>) -> StdResult<Self, ValidationError> {
        let text = text.into();
        check_length(&text, Maximum::EmbedFooterText)?;
        Ok(Self {
            text,
            icon_url: None,
        })
    }

    /// Set the icon URL's value. This only supports HTTP(S) and `attachment://` urls.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] for any other url.
    pub fn icon_url(mut self, icon_url: impl Into<String>) -> StdResult<Self, ValidationError> {
        self.icon_url = Some(check_url("icon_url", icon_url.into(), true)?);
        Ok(self)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct CreateEmbedField {
    name: String,
    value: String,
    inline: bool,
}

impl CreateEmbedField {
    fn new(name: String, value: String, inline: bool) -> StdResult<Self, ValidationError> {
        let field = Self {
            name,
            value,
            inline,
        };
        field.validate()?;
        Ok(field)
    }

    fn validate(&self) -> StdResult<(), ValidationError> {
        check_length_range(&self.name, Minimum::EmbedFieldName, Maximum::EmbedFieldName)?;
        check_length_range(&self.value, Minimum::EmbedFieldValue, Maximum::EmbedFieldValue)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct CreateEmbedImage {
    url: String,
}
