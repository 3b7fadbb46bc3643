//! Decode table: grayscale level (0..=255) → weighted glyph candidates.
//!
//! Built from per-glyph brightness samples in three steps: min/max
//! normalisation to a level, first-claim deduplication per level, then
//! exact match or linear interpolation for every level.

use ds_core::{BrightnessSample, CoreError, Glyph, Result};

/// Number of grayscale levels.
pub const LEVELS: usize = 256;

/// One glyph's brightness rescaled to the font's observed range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedBrightness {
    pub glyph: Glyph,
    /// `(raw - min) / (max - min)`, in 0.0..=1.0.
    pub norm: f64,
    /// `round(norm * 255)`.
    pub level: u8,
}

/// Rescale raw samples to 0.0..=1.0 and quantise them to grayscale levels.
///
/// Output is in ascending glyph code order.
///
/// # Errors
/// `EmptySampleSet` for no samples, `DegenerateFont` when every sample has
/// the same raw brightness.
///
/// # Example
/// ```
/// use ds_core::{BrightnessSample, Glyph};
/// use ds_ascii::normalize;
/// let samples = [
///     BrightnessSample::new(Glyph::SPACE, 255.0),
///     BrightnessSample::new(Glyph::new(b'#').unwrap(), 180.0),
/// ];
/// let norm = normalize(&samples).unwrap();
/// assert_eq!(norm[0].level, 255);
/// assert_eq!(norm[1].level, 0);
/// ```
pub fn normalize(samples: &[BrightnessSample]) -> Result<Vec<NormalizedBrightness>> {
    if samples.is_empty() {
        return Err(CoreError::EmptySampleSet);
    }
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.raw), hi.max(s.raw))
        });
    let span = max - min;
    if span <= 0.0 {
        return Err(CoreError::DegenerateFont { brightness: min });
    }

    let mut out: Vec<NormalizedBrightness> = samples
        .iter()
        .map(|s| {
            let norm = (s.raw - min) / span;
            NormalizedBrightness {
                glyph: s.glyph,
                norm,
                level: (norm * 255.0).round().clamp(0.0, 255.0) as u8,
            }
        })
        .collect();
    out.sort_by_key(|n| n.glyph);
    Ok(out)
}

/// Grayscale level → ordered glyph candidates, one slot per level.
///
/// Exact levels hold a single glyph. An interpolated level between kept
/// levels `L < level < U` holds the `L` glyph `U - level` times followed by
/// the `U` glyph `level - L` times, so a uniform draw favours the closer
/// neighbour. Levels outside the kept span clamp to the nearest kept glyph.
///
/// # Example
/// ```
/// use ds_core::Glyph;
/// use ds_ascii::DecodeTable;
/// let hash = Glyph::new(b'#').unwrap();
/// let table = DecodeTable::from_levels(&[(hash, 0), (Glyph::SPACE, 255)]).unwrap();
/// assert_eq!(table.candidates(0), &[hash]);
/// assert_eq!(table.candidates(128).len(), 255);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeTable {
    levels: [Vec<Glyph>; LEVELS],
}

impl DecodeTable {
    /// Normalise `samples` and build the table.
    ///
    /// # Errors
    /// See [`normalize`].
    pub fn build(samples: &[BrightnessSample]) -> Result<Self> {
        Self::from_normalized(&normalize(samples)?)
    }

    /// Build from already normalised brightness.
    ///
    /// # Errors
    /// `EmptySampleSet` if `normalized` is empty.
    pub fn from_normalized(normalized: &[NormalizedBrightness]) -> Result<Self> {
        let pairs: Vec<(Glyph, u8)> = normalized.iter().map(|n| (n.glyph, n.level)).collect();
        Self::from_levels(&pairs)
    }

    /// Build from (glyph, level) pairs.
    ///
    /// When several glyphs share a level, the one with the lowest code wins.
    ///
    /// # Errors
    /// `EmptySampleSet` if `pairs` is empty.
    pub fn from_levels(pairs: &[(Glyph, u8)]) -> Result<Self> {
        let anchors = first_claims(pairs);
        if anchors.is_empty() {
            return Err(CoreError::EmptySampleSet);
        }
        log::debug!("{} distinct levels kept from {} glyphs", anchors.len(), pairs.len());

        let mut claimed: [Option<Glyph>; LEVELS] = [None; LEVELS];
        for &(glyph, level) in &anchors {
            claimed[usize::from(level)] = Some(glyph);
        }

        let levels = std::array::from_fn(|level| {
            if let Some(glyph) = claimed[level] {
                return vec![glyph];
            }
            let lower = claimed[..level]
                .iter()
                .enumerate()
                .rev()
                .find_map(|(l, g)| g.map(|g| (g, l)));
            let upper = claimed[level + 1..]
                .iter()
                .enumerate()
                .find_map(|(i, g)| g.map(|g| (g, level + 1 + i)));
            match (lower, upper) {
                (Some((lo, lo_level)), Some((up, up_level))) => {
                    interpolate(lo, lo_level, up, up_level, level)
                }
                (Some((g, _)), None) | (None, Some((g, _))) => vec![g],
                (None, None) => Vec::new(),
            }
        });
        Ok(Self { levels })
    }

    /// Table from raw per-level candidate lists, as read back from disk.
    /// Levels may be empty.
    #[must_use]
    pub fn from_candidates(levels: [Vec<Glyph>; LEVELS]) -> Self {
        Self { levels }
    }

    /// Candidates for `level`; empty only for an incomplete table read from disk.
    #[inline(always)]
    #[must_use]
    pub fn candidates(&self, level: u8) -> &[Glyph] {
        &self.levels[usize::from(level)]
    }

    /// (level, candidates) for every level, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[Glyph])> {
        self.levels
            .iter()
            .enumerate()
            .map(|(level, c)| (level as u8, c.as_slice()))
    }

    /// True when every level has at least one candidate.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.levels.iter().all(|c| !c.is_empty())
    }
}

/// Keep the lowest-code glyph per level, sorted ascending by level.
fn first_claims(pairs: &[(Glyph, u8)]) -> Vec<(Glyph, u8)> {
    let mut by_code = pairs.to_vec();
    by_code.sort_by_key(|&(glyph, _)| glyph);

    let mut seen = [false; LEVELS];
    let mut kept: Vec<(Glyph, u8)> = by_code
        .into_iter()
        .filter(|&(_, level)| !std::mem::replace(&mut seen[usize::from(level)], true))
        .collect();
    kept.sort_by_key(|&(_, level)| level);
    kept
}

fn interpolate(lo: Glyph, lo_level: usize, up: Glyph, up_level: usize, level: usize) -> Vec<Glyph> {
    let mut out = Vec::with_capacity(up_level - lo_level);
    out.extend(std::iter::repeat_n(lo, up_level - level));
    out.extend(std::iter::repeat_n(up, level - lo_level));
    out
}
