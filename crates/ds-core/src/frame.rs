use crate::charset::Glyph;

/// Buffer RGBA 8 bits, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RgbaFrame {
    /// Fully transparent black frame.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Pixel at (x, y) as (r, g, b, a).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        (self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i] = rgba.0;
        self.data[i + 1] = rgba.1;
        self.data[i + 2] = rgba.2;
        self.data[i + 3] = rgba.3;
    }
}

/// Single-channel 8-bit image: 0 = black, 255 = white.
///
/// # Example
/// ```
/// use ds_core::frame::GrayFrame;
/// let mut frame = GrayFrame::filled(3, 2, 255);
/// frame.set(1, 1, 0);
/// assert_eq!(frame.get(1, 1), 0);
/// assert_eq!(frame.rows().count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl GrayFrame {
    #[must_use]
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            data: vec![value; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wrap an existing buffer. Returns `None` if the length does not match.
    #[must_use]
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == width as usize * height as usize).then_some(Self {
            data,
            width,
            height,
        })
    }

    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        self.data[y as usize * self.width as usize + x as usize] = value;
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.width.max(1) as usize)
    }

    /// Arithmetic mean of all pixels; 255.0 for an empty frame.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 255.0;
        }
        let sum: u64 = self.data.iter().map(|&v| u64::from(v)).sum();
        sum as f64 / self.data.len() as f64
    }
}

/// 2-D glyph grid, row-major, isomorphic to the grayscale frame it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphGrid {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<Glyph>,
}

impl GlyphGrid {
    /// Grid filled with spaces.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Glyph::SPACE; width as usize * height as usize],
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Glyph {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, glyph: Glyph) {
        self.cells[y as usize * self.width as usize + x as usize] = glyph;
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }

    /// Plain-text rendering, one line per row.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.rows() {
            out.extend(row.iter().map(|g| g.as_char()));
            out.push('\n');
        }
        out
    }
}
