//! The HTTP module which performs the REST calls of an interaction: edits of the original
//! response and follow-up messages.
//!
//! Calls go through the [`Transport`] trait so the client can be swapped out, for example with a
//! recording fake in tests. With the `http` feature, [`Http`] is the default implementation,
//! backed by `reqwest`.
//!
//! Nothing in this module retries requests or tracks rate limits.

mod error;
mod request;
mod routing;

#[cfg(feature = "http")]
mod client;
#[cfg(feature = "http")]
mod multipart;

use async_trait::async_trait;

#[cfg(feature = "http")]
pub use self::client::*;
pub use self::error::*;
pub use self::request::Request;
pub use self::routing::Route;
use crate::internal::prelude::*;

/// Performs REST requests against Discord's API on behalf of interactions.
///
/// One transport is shared by all interactions, so implementations must not keep per-call
/// mutable state.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the request, returning the decoded JSON body or `None` for an empty response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] when the request could not be sent or Discord answered with an
    /// unsuccessful status code.
    async fn request(&self, request: Request<'_>) -> Result<Option<Value>>;
}

/// The HTTP method of a [`Request`].
///
/// `reqwest`'s `Method` is not `Copy` and needs the `http` feature, so requests carry this
/// instead.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum LightMethod {
    /// Indicates that a route is for the `DELETE` method only.
    Delete,
    /// Indicates that a route is for the `GET` method only.
    Get,
    /// Indicates that a route is for the `PATCH` method only.
    Patch,
    /// Indicates that a route is for the `POST` method only.
    Post,
    /// Indicates that a route is for the `PUT` method only.
    Put,
}

impl LightMethod {
    #[cfg(feature = "http")]
    #[must_use]
    pub fn reqwest_method(self) -> reqwest::Method {
        match self {
            Self::Delete => reqwest::Method::DELETE,
            Self::Get => reqwest::Method::GET,
            Self::Patch => reqwest::Method::PATCH,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
        }
    }
}

impl std::fmt::Display for LightMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Delete => "DELETE",
            Self::Get => "GET",
            Self::Patch => "PATCH",
            Self::Post => "POST",
            Self::Put => "PUT",
        })
    }
}
