//! CLI command implementations.
//!
//! - `modes` - List covering types
//! - `cover` - Generate a covering as SVG or JSON
//! - `render` - Paint a (partly uncovered) covering over an image
//! - `play` - Drive a reveal session from a script

pub mod common;
pub mod cover;
pub mod play;
pub mod render;

pub use cover::{cmd_cover, cmd_modes};
pub use play::cmd_play;
pub use render::cmd_render;
