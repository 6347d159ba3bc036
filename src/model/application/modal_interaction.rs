use super::component::ComponentType;
use crate::internal::prelude::*;

/// A single field of a submitted modal.
///
/// [Discord docs](https://discord.com/developers/docs/interactions/message-components#text-inputs-text-input-interaction).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ModalField {
    /// The type of the component, [`ComponentType::InputText`] for text inputs.
    #[serde(rename = "type")]
    pub kind: ComponentType,
    /// The developer-defined identifier of the field.
    pub custom_id: String,
    /// The value the user submitted. Empty when the field was left blank.
    #[serde(default)]
    pub value: String,
}

/// A row of submitted modal fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ModalRow {
    pub fields: Vec<ModalField>,
}

/// The fields of a submitted modal, grouped into the rows they were laid out in.
///
/// Rows or fields that cannot be decoded are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalComponents {
    rows: Vec<ModalRow>,
}

impl ModalComponents {
    pub(crate) fn from_raw(raw: Option<Value>) -> Self {
        let Some(Value::Array(raw_rows)) = raw else {
            return Self::default();
        };

        let rows = raw_rows
            .into_iter()
            .filter_map(|row| {
                let Value::Object(mut row) = row else {
                    tracing::trace!("skipping modal row that is not an object");
                    return None;
                };
                let Some(Value::Array(children)) = row.remove("components") else {
                    tracing::trace!("skipping modal row without components");
                    return None;
                };

                let fields = children
                    .into_iter()
                    .filter_map(|field| crate::json::decode_lenient("modal field", field))
                    .collect();
                Some(ModalRow {
                    fields,
                })
            })
            .collect();

        Self {
            rows,
        }
    }

    /// The submitted rows.
    #[must_use]
    pub fn rows(&self) -> &[ModalRow] {
        &self.rows
    }

    /// Iterates over every field of every row, in layout order.
    pub fn iter(&self) -> impl Iterator<Item = &ModalField> {
        self.rows.iter().flat_map(|row| row.fields.iter())
    }

    /// Returns the first field with the given custom id.
    #[must_use]
    pub fn get_data_by_id(&self, custom_id: &str) -> Option<&ModalField> {
        self.iter().find(|field| field.custom_id == custom_id)
    }

    /// Returns the value of the first field with the given custom id.
    #[must_use]
    pub fn get_value_by_id(&self, custom_id: &str) -> Option<&str> {
        self.get_data_by_id(custom_id).map(|field| field.value.as_str())
    }
}
