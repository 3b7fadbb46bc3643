use ds_core::{Glyph, GlyphGrid, GrayFrame};
use fastrand::Rng;

use crate::table::DecodeTable;

/// Output of one grayscale → glyph conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub grid: GlyphGrid,
    /// Pixels whose level had no candidate and fell back to a space.
    pub unmapped: usize,
}

/// Convert a grayscale frame to a glyph grid of identical dimensions.
///
/// Pixels are visited row-major, left to right then top to bottom, and each
/// draws one uniform index into its level's candidates from `rng`. The same
/// table, pixels and RNG state therefore always produce the same grid. A
/// level without candidates yields a space and never aborts the image.
///
/// # Example
/// ```
/// use ds_core::{Glyph, GrayFrame};
/// use ds_ascii::{DecodeTable, image_to_glyph_grid};
/// let hash = Glyph::new(b'#').unwrap();
/// let table = DecodeTable::from_levels(&[(hash, 0), (Glyph::SPACE, 255)]).unwrap();
/// let frame = GrayFrame::from_raw(2, 1, vec![0, 255]).unwrap();
/// let out = image_to_glyph_grid(&frame, &table, &mut fastrand::Rng::with_seed(1234));
/// assert_eq!(out.grid.to_text(), "# \n");
/// ```
pub fn image_to_glyph_grid(image: &GrayFrame, table: &DecodeTable, rng: &mut Rng) -> Conversion {
    let mut unmapped = 0usize;
    let cells: Vec<Glyph> = image
        .data
        .iter()
        .map(|&level| {
            let candidates = table.candidates(level);
            if candidates.is_empty() {
                unmapped += 1;
                Glyph::SPACE
            } else {
                candidates[rng.usize(..candidates.len())]
            }
        })
        .collect();

    if unmapped > 0 {
        log::warn!(
            "{unmapped} of {} pixels had no decode entry and were left blank",
            cells.len()
        );
    }

    Conversion {
        grid: GlyphGrid {
            width: image.width,
            height: image.height,
            cells,
        },
        unmapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::LEVELS;

    fn g(c: u8) -> Glyph {
        Glyph::new(c).unwrap()
    }

    fn two_glyph_table() -> DecodeTable {
        DecodeTable::from_levels(&[(g(b'#'), 0), (g(b' '), 255)]).unwrap()
    }

    fn gradient(width: u32, height: u32) -> GrayFrame {
        let data = (0..width * height).map(|i| (i * 7 % 256) as u8).collect();
        GrayFrame::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn dimensions_are_preserved() {
        let frame = gradient(13, 5);
        let out = image_to_glyph_grid(&frame, &two_glyph_table(), &mut Rng::with_seed(1));
        assert_eq!(out.grid.width, 13);
        assert_eq!(out.grid.height, 5);
        assert_eq!(out.grid.cells.len(), 65);
        assert_eq!(out.grid.rows().count(), 5);
        assert_eq!(out.unmapped, 0);
    }

    #[test]
    fn same_seed_same_grid() {
        let frame = gradient(40, 30);
        let table = two_glyph_table();
        let a = image_to_glyph_grid(&frame, &table, &mut Rng::with_seed(1234));
        let b = image_to_glyph_grid(&frame, &table, &mut Rng::with_seed(1234));
        assert_eq!(a, b);
        assert_eq!(a.grid.to_text(), b.grid.to_text());
    }

    #[test]
    fn single_mid_gray_pixel_is_reproducible() {
        let frame = GrayFrame::filled(1, 1, 128);
        let table = two_glyph_table();
        let first = image_to_glyph_grid(&frame, &table, &mut Rng::with_seed(99));
        let second = image_to_glyph_grid(&frame, &table, &mut Rng::with_seed(99));
        let glyph = first.grid.get(0, 0);
        assert!(glyph == g(b'#') || glyph == g(b' '));
        assert_eq!(glyph, second.grid.get(0, 0));
    }

    #[test]
    fn draws_follow_row_major_order() {
        // One shared stream across two images equals one image holding both.
        let table = two_glyph_table();
        let top = gradient(6, 2);
        let bottom = GrayFrame::from_raw(6, 1, vec![128, 64, 200, 1, 254, 100]).unwrap();

        let mut rng = Rng::with_seed(5);
        let a = image_to_glyph_grid(&top, &table, &mut rng);
        let b = image_to_glyph_grid(&bottom, &table, &mut rng);

        let mut joined = top.data.clone();
        joined.extend_from_slice(&bottom.data);
        let joined = GrayFrame::from_raw(6, 3, joined).unwrap();
        let c = image_to_glyph_grid(&joined, &table, &mut Rng::with_seed(5));

        let mut expected = a.grid.cells.clone();
        expected.extend_from_slice(&b.grid.cells);
        assert_eq!(c.grid.cells, expected);
    }

    #[test]
    fn exact_levels_are_deterministic_regardless_of_seed() {
        let frame = GrayFrame::from_raw(2, 1, vec![0, 255]).unwrap();
        for seed in 0..20 {
            let out = image_to_glyph_grid(&frame, &two_glyph_table(), &mut Rng::with_seed(seed));
            assert_eq!(out.grid.to_text(), "# \n");
        }
    }

    #[test]
    fn mid_gray_mixes_both_neighbours() {
        let frame = GrayFrame::filled(64, 64, 128);
        let out = image_to_glyph_grid(&frame, &two_glyph_table(), &mut Rng::with_seed(1234));
        let hashes = out.grid.cells.iter().filter(|&&c| c == g(b'#')).count();
        // 127/255 expected share of 4096 cells.
        assert!((1700..2400).contains(&hashes), "hashes = {hashes}");
    }

    #[test]
    fn empty_level_falls_back_to_space() {
        let mut levels: [Vec<Glyph>; LEVELS] = std::array::from_fn(|_| vec![g(b'@')]);
        levels[10].clear();
        let table = DecodeTable::from_candidates(levels);
        let frame = GrayFrame::from_raw(3, 1, vec![9, 10, 11]).unwrap();
        let out = image_to_glyph_grid(&frame, &table, &mut Rng::with_seed(0));
        assert_eq!(out.grid.to_text(), "@ @\n");
        assert_eq!(out.unmapped, 1);
    }
}
