use std::error::Error as StdError;
use std::fmt;

#[cfg(feature = "http")]
use reqwest::header::InvalidHeaderValue;
#[cfg(feature = "http")]
use reqwest::Error as ReqwestError;

use super::LightMethod;
use crate::internal::prelude::*;

/// The error body Discord sends along with an unsuccessful status code.
///
/// [Discord docs](https://discord.com/developers/docs/reference#error-messages).
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct DiscordJsonError {
    /// The error code.
    #[serde(default)]
    pub code: isize,
    /// The error message.
    #[serde(default)]
    pub message: String,
    /// The per-field errors, if Discord listed any.
    #[serde(default)]
    pub errors: Option<Value>,
}

/// An unsuccessful response from Discord.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ErrorResponse {
    pub status_code: u16,
    pub url: String,
    pub method: LightMethod,
    pub error: DiscordJsonError,
}

impl ErrorResponse {
    /// Builds an error response from the raw response body, falling back to the body text as
    /// the message when it is not a JSON error object.
    #[must_use]
    pub fn new(status_code: u16, url: String, method: LightMethod, body: &[u8]) -> Self {
        let error = serde_json::from_slice(body).unwrap_or_else(|_| DiscordJsonError {
            code: -1,
            message: String::from_utf8_lossy(body).into_owned(),
            errors: None,
        });

        Self {
            status_code,
            url,
            method,
            error,
        }
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum HttpError {
    /// When a non-successful status code was received for a request.
    UnsuccessfulRequest(ErrorResponse),
    /// Header value contains invalid input.
    #[cfg(feature = "http")]
    InvalidHeader(InvalidHeaderValue),
    /// Reqwest's Error contain information on why sending a request failed.
    #[cfg(feature = "http")]
    Request(ReqwestError),
}

impl HttpError {
    /// Returns true when the error is caused by an unsuccessful request
    #[must_use]
    pub fn is_unsuccessful_request(&self) -> bool {
        matches!(self, Self::UnsuccessfulRequest(_))
    }

    /// Returns the status code if the error is an unsuccessful request
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnsuccessfulRequest(res) => Some(res.status_code),
            #[cfg(feature = "http")]
            _ => None,
        }
    }
}

impl From<ErrorResponse> for HttpError {
    fn from(error: ErrorResponse) -> Self {
        Self::UnsuccessfulRequest(error)
    }
}

#[cfg(feature = "http")]
impl From<ReqwestError> for HttpError {
    fn from(error: ReqwestError) -> Self {
        Self::Request(error)
    }
}

#[cfg(feature = "http")]
impl From<InvalidHeaderValue> for HttpError {
    fn from(error: InvalidHeaderValue) -> Self {
        Self::InvalidHeader(error)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsuccessfulRequest(e) => {
                f.write_str(&e.error.message)?;

                // Put Discord's human readable error explanations in parentheses
                if let Some(errors) = &e.error.errors {
                    write!(f, " ({errors})")?;
                }

                Ok(())
            },
            #[cfg(feature = "http")]
            Self::InvalidHeader(_) => f.write_str("Provided value is an invalid header value."),
            #[cfg(feature = "http")]
            Self::Request(_) => f.write_str("Error while sending HTTP request."),
        }
    }
}

impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            #[cfg(feature = "http")]
            Self::InvalidHeader(inner) => Some(inner),
            #[cfg(feature = "http")]
            Self::Request(inner) => Some(inner),
            Self::UnsuccessfulRequest(_) => None,
        }
    }
}
