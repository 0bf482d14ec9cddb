//! Backend-agnostic rendering
//!
//! The game fills a `DrawList` each frame; a GPU or terminal backend
//! consumes it.

pub mod draw_list;

pub use draw_list::{DrawList, RectInstance, TextCommand, colors};
