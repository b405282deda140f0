//! Helper functions for rendering pages

mod date;
mod html;

pub use date::*;
pub use html::*;
