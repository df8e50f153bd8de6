//! Map Quiz rendering
//!
//! Draws the labels of guessed regions onto a copy of the base map.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                   map                    │
//! │     MapRenderer, LabelPainter, layout    │
//! │  (coordinate transform + label placing)  │
//! ├──────────────────────────────────────────┤
//! │                 renderer                 │
//! │          cosmic-text + tiny-skia         │
//! │      (text shaping + glyph blending)     │
//! ├──────────────────────────────────────────┤
//! │                  encode                  │
//! │               PNG output                 │
//! └──────────────────────────────────────────┘
//! ```

pub mod encode;
pub mod error;
pub mod map;
pub mod renderer;
pub mod utils;

pub use encode::{encode_png, write_png};
pub use error::RenderError;
pub use map::{LabelPainter, LabelPlacement, MapRenderer, to_pixel};
pub use renderer::{FontOptions, TextRenderer};
pub use utils::color_from_rgba;

// Re-export tiny_skia Color for external use
pub use tiny_skia::Color;
