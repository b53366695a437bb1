//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, status bar and overlays
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling
//! - `pages`: per-route content rendering

pub mod input;
pub mod pages;
pub mod render;
pub mod styles;
