use super::create_components::check_modal_rows;
use super::{check_custom_id, check_length_range, CreateActionRow, Payload, Validate};
use crate::internal::prelude::*;
use crate::model::error::{Maximum, Minimum};
use crate::model::ValidationError;

/// A builder for a popup form, sent in response to a command or component interaction.
///
/// A modal holds between one and five action rows, each with a single text input.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-modal).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct CreateModal {
    custom_id: String,
    title: String,
    components: Vec<Payload<CreateActionRow>>,
}

impl CreateModal {
    /// Creates a new modal with the given custom id (a developer-defined identifier) and title.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom id is empty or longer than 100 characters, or if the title
    /// is empty or longer than 45 characters.
    pub fn new(
        custom_id: impl Into<String>,
        title: impl Into<String>,
    ) -> StdResult<Self, ValidationError> {
        let custom_id = custom_id.into();
        let title = title.into();
        check_custom_id(&custom_id)?;
        check_length_range(&title, Minimum::ModalTitle, Maximum::ModalTitle)?;

        Ok(Self {
            custom_id,
            title,
            components: Vec::new(),
        })
    }

    /// Adds an action row to the modal.
    ///
    /// # Errors
    ///
    /// Returns an error if the modal already holds five rows.
    pub fn add_row(
        mut self,
        row: impl Into<Payload<CreateActionRow>>,
    ) -> StdResult<Self, ValidationError> {
        Maximum::ActionRowCount.check_overflow(self.components.len() + 1)?;
        self.components.push(row.into());
        Ok(self)
    }

    /// Replaces the rows of the modal.
    ///
    /// # Errors
    ///
    /// Returns an error for more than five rows.
    pub fn components(
        mut self,
        rows: impl IntoIterator<Item = impl Into<Payload<CreateActionRow>>>,
    ) -> StdResult<Self, ValidationError> {
        let rows = rows.into_iter().map(Into::into).collect::<Vec<_>>();
        Maximum::ActionRowCount.check_overflow(rows.len())?;
        self.components = rows;
        Ok(self)
    }

    /// The custom id the submission will carry.
    #[must_use]
    pub fn custom_id(&self) -> &str {
        &self.custom_id
    }
}

impl Validate for CreateModal {
    fn validate(&self) -> StdResult<(), ValidationError> {
        check_custom_id(&self.custom_id)?;
        check_length_range(&self.title, Minimum::ModalTitle, Maximum::ModalTitle)?;
        check_modal_rows(&self.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CreateInputText;
    use crate::json::{json, to_value};
    use crate::model::application::InputTextStyle;

    fn row(id: &str) -> CreateActionRow {
        CreateActionRow::input_text(
            CreateInputText::new(InputTextStyle::Short, "Label", id).unwrap(),
        )
    }

    #[test]
    fn row_bounds() {
        let modal = CreateModal::new("form", "Title").unwrap();
        assert!(matches!(modal.validate(), Err(ValidationError::TooSmall { .. })));

        let modal = modal.components((0..5).map(|i| row(&format!("f{i}")))).unwrap();
        assert!(modal.validate().is_ok());
        assert!(matches!(modal.add_row(row("extra")), Err(ValidationError::TooLarge { .. })));
    }

    #[test]
    fn title_and_custom_id() {
        assert!(CreateModal::new("form", "").is_err());
        assert!(CreateModal::new("form", "t".repeat(46)).is_err());
        assert!(CreateModal::new("", "Title").is_err());
        assert!(CreateModal::new("a".repeat(101), "Title").is_err());
    }

    #[test]
    fn json() {
        let modal = CreateModal::new("feedback", "Feedback").unwrap().add_row(row("text")).unwrap();
        assert_eq!(
            to_value(&modal).unwrap(),
            json!({
                "custom_id": "feedback",
                "title": "Feedback",
                "components": [{
                    "type": 1,
                    "components": [{
                        "type": 4,
                        "custom_id": "text",
                        "style": 1,
                        "label": "Label",
                        "required": true,
                    }],
                }],
            })
        );
    }

    #[test]
    fn raw_rows_are_checked() {
        let modal = CreateModal::new("form", "Title")
            .unwrap()
            .add_row(Payload::<CreateActionRow>::raw(json!({"type": 2, "components": []})))
            .unwrap();
        assert!(matches!(modal.validate(), Err(ValidationError::InvalidRaw(_))));
    }

    #[test]
    fn rows_must_hold_text_inputs() {
        use crate::builder::{CreateButton, CreateSelectMenu, CreateSelectMenuKind};

        let buttons = CreateActionRow::buttons([CreateButton::new("b").unwrap()]).unwrap();
        let modal = CreateModal::new("m", "Title").unwrap().add_row(buttons).unwrap();
        assert!(matches!(modal.validate(), Err(ValidationError::InvalidComponent(_))));

        let menu = CreateSelectMenu::new("s", CreateSelectMenuKind::User).unwrap();
        let modal = CreateModal::new("m", "Title")
            .unwrap()
            .add_row(row("text"))
            .unwrap()
            .add_row(CreateActionRow::select_menu(menu))
            .unwrap();
        assert!(matches!(modal.validate(), Err(ValidationError::InvalidComponent(_))));

        let raw = Payload::<CreateActionRow>::raw(json!({
            "type": 1,
            "components": [{"type": 2, "style": 1, "custom_id": "b"}],
        }));
        let modal = CreateModal::new("m", "Title").unwrap().add_row(raw).unwrap();
        assert!(matches!(modal.validate(), Err(ValidationError::InvalidComponent(_))));
    }
}
