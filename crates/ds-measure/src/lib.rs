//! Glyph density measurement: rasterise each printable glyph of a font and
//! record how much ink it leaves on a white canvas.

pub mod density;
pub mod font;
pub mod snapshot;

pub use density::{FontMeasurement, measure_font, measure_with};
pub use font::load_font;
pub use snapshot::write_snapshots;
