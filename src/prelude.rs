//! A set of exports which can be helpful to use.
//!
//! Note that the `InteractionsError` re-export is equivalent to [`interactions::Error`], although
//! is re-exported as a separate name to remove likely ambiguity with other crate error enums.
//!
//! # Examples
//!
//! Import all of the exports:
//!
//! ```rust
//! use interactions::prelude::*;
//! ```
//!
//! [`interactions::Error`]: crate::Error

pub use crate::builder::Validate;
pub use crate::error::Error as InteractionsError;
pub use crate::http::{HttpError, Transport};
pub use crate::interactions_endpoint::{Endpoint, InteractionHandler, Settings};
pub use crate::model::application::Interaction;
pub use crate::model::ValidationError;
