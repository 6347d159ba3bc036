//! This module exports different types for JSON interactions.
//!
//! Payloads that do not need a dedicated type (raw components, embeds and interaction `data`) are
//! carried around as a [`Value`].

use serde::de::DeserializeOwned;
use serde::ser::Serialize;

use crate::Result;

pub type Value = serde_json::Value;

pub use serde_json::json;
pub use serde_json::Error as JsonError;

pub type JsonMap = serde_json::Map<String, Value>;

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn to_string<T>(v: &T) -> Result<String>
where
    T: Serialize,
{
    Ok(serde_json::to_string(v)?)
}

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_slice(v)?)
}

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn from_value<T>(v: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(v)?)
}

#[allow(clippy::missing_errors_doc)] // It's obvious
pub fn to_value<T>(value: T) -> Result<Value>
where
    T: Serialize,
{
    Ok(serde_json::to_value(value)?)
}

/// Decodes an optional nested object, discarding it when it has an unexpected shape.
///
/// Interaction payloads are only partially specified, so a malformed sub-object must not make the
/// whole interaction unusable.
pub(crate) fn decode_lenient<T: DeserializeOwned>(field: &'static str, value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }

    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(why) => {
            tracing::trace!("discarding malformed `{}`: {}", field, why);
            None
        },
    }
}

#[cfg(test)]
#[track_caller]
pub(crate) fn assert_json<T>(data: &T, json: crate::json::Value)
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    // test serialization
    let serialized = serde_json::to_value(data).unwrap();
    assert!(
        serialized == json,
        "data->JSON serialization failed\nexpected: {json:?}\n     got: {serialized:?}"
    );

    // test deserialization
    let deserialized = serde_json::from_value::<T>(json).unwrap();
    assert!(
        &deserialized == data,
        "JSON->data deserialization failed\nexpected: {data:?}\n     got: {deserialized:?}"
    );
}
