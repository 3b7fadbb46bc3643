use crate::charset::Glyph;

/// Mean pixel intensity of one glyph rendered alone at the reference size.
///
/// `raw` is in 0.0..=255.0: a blank canvas measures 255, a fully inked one 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrightnessSample {
    pub glyph: Glyph,
    pub raw: f64,
}

impl BrightnessSample {
    #[must_use]
    pub fn new(glyph: Glyph, raw: f64) -> Self {
        Self { glyph, raw }
    }
}
