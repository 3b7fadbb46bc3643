/// Configuration, types, and shared structures for densiscii.
///
/// This crate contains the glyph model, pixel/glyph buffers, configuration
/// and the error taxonomy shared across the densiscii workspace.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod sample;

pub use charset::{Glyph, GlyphRange};
pub use config::Config;
pub use error::{CoreError, Result};
pub use frame::{GlyphGrid, GrayFrame, RgbaFrame};
pub use sample::BrightnessSample;
