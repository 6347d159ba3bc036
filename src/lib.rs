//! A Rust library for receiving and answering Discord interactions over HTTP.
//!
//! Discord can deliver interactions (slash commands, component clicks, modal submissions and
//! autocomplete requests) as signed HTTP POST requests to an "Interactions Endpoint URL" instead of
//! over the gateway. This crate covers everything between the raw request and the reply:
//!
//! - verifying the request signature with the application's public key, see [`Verifier`];
//! - parsing the payload into an [`Interaction`] with typed accessors for its options and modal
//!   fields;
//! - enforcing the response protocol: exactly one initial response, issued before the
//!   acknowledgement deadline, followed by any number of edits and follow-up messages while the
//!   interaction token is valid;
//! - builders for buttons, select menus, text inputs, modals and embeds that reject payloads
//!   Discord would refuse, before anything is sent.
//!
//! The HTTP server itself is not part of this crate. Hand the raw headers and body of each request
//! to [`Endpoint::handle`] and write the returned [`EndpointResponse`] back to the client.
//!
//! ```rust,no_run
//! # #[cfg(feature = "http")]
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//!
//! use interactions::builder::CreateInteractionResponseMessage;
//! use interactions::http::Http;
//! use interactions::interactions_endpoint::{Endpoint, EndpointRequest, InteractionHandler};
//! use interactions::model::application::Interaction;
//!
//! struct Handler;
//!
//! async fn pong(interaction: &mut Interaction) -> interactions::Result<()> {
//!     let message = CreateInteractionResponseMessage::new().content("Pong!")?;
//!     interaction.reply(message).await
//! }
//!
//! #[interactions::async_trait]
//! impl InteractionHandler for Handler {
//!     async fn interaction(&self, mut interaction: Interaction) {
//!         if interaction.command_name.as_deref() == Some("ping") {
//!             if let Err(why) = pong(&mut interaction).await {
//!                 println!("Cannot respond to slash command: {why}");
//!             }
//!         }
//!     }
//! }
//!
//! let http = Arc::new(Http::new(&std::env::var("DISCORD_TOKEN")?));
//! let endpoint = Endpoint::new(&std::env::var("DISCORD_PUBLIC_KEY")?, http, Handler)?;
//!
//! // For every request received by the web server:
//! # let (signature, timestamp, body) = (None, None, &[][..]);
//! let response = endpoint.handle(EndpointRequest::new(signature, timestamp, body)).await;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```
//!
//! [`Verifier`]: crate::interactions_endpoint::Verifier
//! [`Interaction`]: crate::model::application::Interaction
//! [`Endpoint::handle`]: crate::interactions_endpoint::Endpoint::handle
//! [`EndpointResponse`]: crate::interactions_endpoint::EndpointResponse
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    unused,
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::clone_on_ref_ptr,
    clippy::non_ascii_literal,
    clippy::fallible_impl_from,
    clippy::let_underscore_must_use,
    clippy::format_push_string,
    clippy::pedantic
)]
#![allow(
    // Allowed as they are too pedantic
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
    clippy::unreadable_literal,
    clippy::cast_possible_wrap,
    clippy::wildcard_imports,
    clippy::cast_sign_loss,
    clippy::too_many_lines,
    clippy::doc_markdown,
    clippy::missing_panics_doc,
    clippy::doc_link_with_quotes
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[macro_use]
extern crate serde;

#[macro_use]
mod internal;

pub mod builder;
pub mod constants;
pub mod http;
pub mod interactions_endpoint;
pub mod json;
pub mod model;
pub mod prelude;
pub mod utils;

mod error;

pub use crate::error::{Error, Result};

/// Special module that re-exports most public items from this crate.
///
/// Useful, because you don't have to remember the full paths of all items.
pub mod all {
    #[doc(no_inline)]
    pub use crate::builder::*;
    #[doc(no_inline)]
    pub use crate::constants::*;
    #[doc(no_inline)]
    pub use crate::http::*;
    #[doc(no_inline)]
    pub use crate::interactions_endpoint::*;
    #[doc(no_inline)]
    pub use crate::model::prelude::*;
    #[doc(no_inline)]
    pub use crate::utils::*;
}

// For the procedural macros used by handler implementations.
pub use async_trait::async_trait;
