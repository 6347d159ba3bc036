//! A set of builders used to make responding to interactions easier.
//!
//! Every builder checks the limits Discord enforces as soon as a bounded value is set, and checks
//! the remaining cross-field rules in [`Validate::validate`]. Sending a payload always validates it
//! first, so an invalid payload never reaches the network.

use serde::ser::{Serialize, Serializer};

use crate::internal::prelude::*;
use crate::model::error::{Maximum, Minimum};
use crate::model::ValidationError;

mod create_attachment;
mod create_components;
mod create_embed;
mod create_interaction_response;
mod create_modal;

pub use create_attachment::*;
pub use create_components::*;
pub use create_embed::*;
pub use create_interaction_response::*;
pub use create_modal::*;

/// A payload that can check itself against Discord's structural rules.
pub trait Validate: Serialize {
    /// Checks every rule that could not be checked when the individual fields were set.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    fn validate(&self) -> StdResult<(), ValidationError>;

    /// Checks a raw JSON value that stands in for this builder.
    ///
    /// By default only requires the value to be a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRaw`] if the value does not have the expected shape.
    fn validate_raw(value: &Value) -> StdResult<(), ValidationError>
    where
        Self: Sized,
    {
        if value.is_object() {
            Ok(())
        } else {
            Err(ValidationError::InvalidRaw("expected a JSON object"))
        }
    }

    /// Validates the payload and serializes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the payload is invalid, or [`Error::Json`] if it cannot
    /// be serialized.
    ///
    /// [`Error::Validation`]: crate::Error::Validation
    /// [`Error::Json`]: crate::Error::Json
    fn to_json(&self) -> Result<Value> {
        self.validate()?;
        crate::json::to_value(self)
    }
}

/// Either a builder, or a raw JSON value of the same shape.
///
/// Raw values allow sending payloads the builders do not model yet. They are checked for their
/// basic shape only, see [`Validate::validate_raw`].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Payload<T> {
    Builder(T),
    Raw(Value),
}

impl<T> Payload<T> {
    /// Wraps a raw JSON value.
    #[must_use]
    pub fn raw(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl<T> From<T> for Payload<T> {
    fn from(builder: T) -> Self {
        Self::Builder(builder)
    }
}

impl<T: Serialize> Serialize for Payload<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        match self {
            Self::Builder(builder) => builder.serialize(serializer),
            Self::Raw(value) => value.serialize(serializer),
        }
    }
}

impl<T: Validate> Validate for Payload<T> {
    fn validate(&self) -> StdResult<(), ValidationError> {
        match self {
            Self::Builder(builder) => builder.validate(),
            Self::Raw(value) => T::validate_raw(value),
        }
    }
}

/// Counts characters the way Discord does for length limits.
fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn check_length(value: &str, maximum: Maximum) -> StdResult<(), ValidationError> {
    maximum.check_overflow(char_len(value))
}

fn check_length_range(
    value: &str,
    minimum: Minimum,
    maximum: Maximum,
) -> StdResult<(), ValidationError> {
    let len = char_len(value);
    minimum.check_underflow(len)?;
    maximum.check_overflow(len)
}

fn check_custom_id(custom_id: &str) -> StdResult<(), ValidationError> {
    check_length_range(custom_id, Minimum::CustomId, Maximum::CustomId)
}

fn validate_all<'a, T: Validate + 'a>(
    items: impl IntoIterator<Item = &'a T>,
) -> StdResult<(), ValidationError> {
    items.into_iter().try_for_each(Validate::validate)
}
