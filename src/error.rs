use std::error::Error as StdError;
use std::fmt;
use std::io::Error as IoError;

use crate::http::HttpError;
use crate::interactions_endpoint::InvalidKey;
use crate::json::JsonError;
use crate::model::application::{IllegalTransition, TimeWindow};
use crate::model::ValidationError;

/// The common result type between most library functions.
///
/// The library exposes functions which, for a result type, exposes only one type, rather than the
/// usual 2 (`Result<T, Error>`). This is because all functions that return a result return
/// the crate's [`Error`], so this is implied, and a "simpler" result is used.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A common error enum returned by most of the library's functionality within a custom
/// [`Result`].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A builder or payload broke one of Discord's structural limits. Nothing was sent.
    Validation(ValidationError),
    /// An initial response that the interaction does not accept in its current state, or for
    /// its type. Nothing was sent.
    IllegalTransition(IllegalTransition),
    /// The response came too late. Nothing was sent.
    TimeWindowExpired(TimeWindow),
    /// An error from the [`http`] module.
    ///
    /// [`http`]: crate::http
    Http(HttpError),
    /// An error from the `serde_json` crate.
    Json(JsonError),
    /// The application public key could not be parsed.
    InvalidKey(InvalidKey),
    /// An `std::io` error.
    Io(IoError),
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Error {
        Error::Validation(e)
    }
}

impl From<IllegalTransition> for Error {
    fn from(e: IllegalTransition) -> Error {
        Error::IllegalTransition(e)
    }
}

impl From<TimeWindow> for Error {
    fn from(e: TimeWindow) -> Error {
        Error::TimeWindowExpired(e)
    }
}

impl From<HttpError> for Error {
    fn from(e: HttpError) -> Error {
        Error::Http(e)
    }
}

impl From<JsonError> for Error {
    fn from(e: JsonError) -> Error {
        Error::Json(e)
    }
}

impl From<InvalidKey> for Error {
    fn from(e: InvalidKey) -> Error {
        Error::InvalidKey(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Error {
        Error::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(inner) => fmt::Display::fmt(&inner, f),
            Self::IllegalTransition(inner) => fmt::Display::fmt(&inner, f),
            Self::TimeWindowExpired(inner) => fmt::Display::fmt(&inner, f),
            Self::Http(inner) => fmt::Display::fmt(&inner, f),
            Self::Json(inner) => fmt::Display::fmt(&inner, f),
            Self::InvalidKey(inner) => fmt::Display::fmt(&inner, f),
            Self::Io(inner) => fmt::Display::fmt(&inner, f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Validation(inner) => Some(inner),
            Self::IllegalTransition(inner) => Some(inner),
            Self::TimeWindowExpired(_) => None,
            Self::Http(inner) => Some(inner),
            Self::Json(inner) => Some(inner),
            Self::InvalidKey(inner) => Some(inner),
            Self::Io(inner) => Some(inner),
        }
    }
}
