//! Helper functions shared by the renderer, the CLI and the API
//!
//! HTML escaping lives here so that every place emitting markup escapes
//! text the same way.

mod date;
mod html;

pub use date::*;
pub use html::*;
