//! Output side of densiscii: glyph grids serialised as SVG text art.

pub mod svg;

pub use svg::{EmbeddedFont, SvgOptions, push_escaped, render_svg, write_svg};
