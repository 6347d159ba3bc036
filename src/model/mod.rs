//! Mappings of objects received from the API, with optional helper methods for ease of use.
//!
//! The central type is [`Interaction`], built from a verified interactions endpoint payload. The
//! other models describe the context the interaction was triggered in.
//!
//! [`Interaction`]: application::Interaction

pub mod application;
pub mod channel;
pub mod error;
pub mod guild;
pub mod id;
pub mod permissions;
pub mod prelude;
pub mod user;

pub use self::error::ValidationError;
pub use self::permissions::Permissions;
