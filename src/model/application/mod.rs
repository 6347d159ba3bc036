//! Models for interactions received through the interactions endpoint, and the response protocol
//! they follow.

mod command_interaction;
pub use command_interaction::*;
mod component;
pub use component::*;
mod interaction;
pub use interaction::*;
mod modal_interaction;
pub use modal_interaction::*;
mod response;
pub use response::*;
