//! A set of utilities to help with common use cases that are not required to fully use the
//! library.

mod colour;

pub use self::colour::{colours, Colour, Colour as Color, ParseColourError};
