//! Brightness → glyph decoding: decode table construction, persistence and
//! grayscale-to-glyph conversion.

pub mod convert;
pub mod store;
pub mod table;

pub use convert::{Conversion, image_to_glyph_grid};
pub use table::{DecodeTable, NormalizedBrightness, normalize};
