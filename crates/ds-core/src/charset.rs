use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// First printable ASCII code (space).
pub const FIRST_PRINTABLE: u8 = 32;

/// Last printable ASCII code (`~`).
pub const LAST_PRINTABLE: u8 = 126;

/// Un caractère imprimable, identifié par son code ASCII (32..=126).
///
/// # Example
/// ```
/// use ds_core::charset::Glyph;
/// let g = Glyph::new(b'#').unwrap();
/// assert_eq!(g.as_char(), '#');
/// assert!(Glyph::new(10).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Glyph(u8);

impl Glyph {
    /// The blank glyph, used as fallback for unmapped pixels.
    pub const SPACE: Glyph = Glyph(b' ');

    /// Build a glyph from its code. Returns `None` outside the printable set.
    #[must_use]
    pub fn new(code: u8) -> Option<Self> {
        (FIRST_PRINTABLE..=LAST_PRINTABLE)
            .contains(&code)
            .then_some(Self(code))
    }

    /// Character code.
    #[inline(always)]
    #[must_use]
    pub fn code(self) -> u8 {
        self.0
    }

    #[inline(always)]
    #[must_use]
    pub fn as_char(self) -> char {
        char::from(self.0)
    }

    /// True for characters that need escaping inside XML text.
    #[must_use]
    pub fn is_markup_special(self) -> bool {
        matches!(self.0, b'&' | b'<' | b'>' | b'"' | b'\'')
    }
}

impl TryFrom<char> for Glyph {
    type Error = CoreError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        u8::try_from(ch)
            .ok()
            .and_then(Glyph::new)
            .ok_or_else(|| CoreError::TableFormat(format!("non-printable glyph {ch:?}")))
    }
}

impl From<Glyph> for char {
    fn from(glyph: Glyph) -> Self {
        glyph.as_char()
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Plage contiguë de glyphes imprimables, bornes incluses.
///
/// # Example
/// ```
/// use ds_core::charset::GlyphRange;
/// let range = GlyphRange::printable();
/// assert_eq!(range.iter().count(), 95);
/// assert!(GlyphRange::new(100, 40).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRange {
    first: u8,
    last: u8,
}

impl GlyphRange {
    /// Validate a sub-range of the printable set.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidRange` if a bound is outside 32..=126 or
    /// `first > last`.
    pub fn new(first: u8, last: u8) -> Result<Self, CoreError> {
        if Glyph::new(first).is_none() || Glyph::new(last).is_none() || first > last {
            return Err(CoreError::InvalidRange { first, last });
        }
        Ok(Self { first, last })
    }

    /// The full printable range, 32..=126.
    #[must_use]
    pub fn printable() -> Self {
        Self {
            first: FIRST_PRINTABLE,
            last: LAST_PRINTABLE,
        }
    }

    #[must_use]
    pub fn codes(&self) -> RangeInclusive<u8> {
        self.first..=self.last
    }

    /// Glyphs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.codes().map(Glyph)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.last - self.first) + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for GlyphRange {
    fn default() -> Self {
        Self::printable()
    }
}
