use std::path::Path;

use ab_glyph::{Font, PxScale, ScaleFont, point};
use ds_core::config::MeasureConfig;
use ds_core::{BrightnessSample, CoreError, Glyph, GrayFrame, Result};
use rayon::prelude::*;

use crate::font::load_font;

/// Result of one measurement pass over a font.
#[derive(Debug, Clone)]
pub struct FontMeasurement {
    /// One sample per glyph, ascending character code.
    pub samples: Vec<BrightnessSample>,
    /// Rendered canvases, kept only when `MeasureConfig::snapshots` is set.
    pub snapshots: Vec<(Glyph, GrayFrame)>,
}

/// Load `path` and measure every glyph of the configured range.
///
/// # Errors
/// `FontLoad` if the font cannot be opened, `GlyphRender` if any glyph of the
/// range cannot be rendered, `InvalidRange` for a bad range. No partial
/// result is returned.
///
/// # Example
/// ```no_run
/// use ds_core::config::MeasureConfig;
/// use ds_measure::measure_font;
/// let m = measure_font(std::path::Path::new("cour.ttf"), &MeasureConfig::default()).unwrap();
/// assert_eq!(m.samples.len(), 95);
/// ```
pub fn measure_font(path: &Path, config: &MeasureConfig) -> Result<FontMeasurement> {
    let font = load_font(path)?;
    let measurement = measure_with(&font, config)?;
    log::info!(
        "Measured {} glyphs of {}",
        measurement.samples.len(),
        path.display()
    );
    Ok(measurement)
}

/// Measure every glyph of the configured range with an already loaded font.
///
/// Glyphs are rendered in parallel; the samples keep ascending code order.
///
/// # Errors
/// See [`measure_font`].
pub fn measure_with<F: Font + Sync>(font: &F, config: &MeasureConfig) -> Result<FontMeasurement> {
    let range = config.range()?;
    let glyphs: Vec<Glyph> = range.iter().collect();

    let rendered = glyphs
        .par_iter()
        .map(|&glyph| render_glyph(font, glyph, config).map(|canvas| (glyph, canvas)))
        .collect::<Result<Vec<_>>>()?;

    let samples = rendered
        .iter()
        .map(|(glyph, canvas)| {
            let raw = canvas.mean();
            log::debug!("Glyph '{glyph}' raw brightness {raw:.3}");
            BrightnessSample::new(*glyph, raw)
        })
        .collect();

    let snapshots = if config.snapshots {
        rendered
    } else {
        Vec::new()
    };

    Ok(FontMeasurement { samples, snapshots })
}

/// Render `glyph` alone onto a white canvas of `config.canvas_size()`.
///
/// The glyph origin sits at the left edge with its baseline at the font
/// ascent, so the ascender line touches the top of the canvas.
///
/// # Errors
/// `GlyphRender` if the font has no glyph for the code point (space excepted).
pub fn render_glyph<F: Font>(font: &F, glyph: Glyph, config: &MeasureConfig) -> Result<GrayFrame> {
    let (w, h) = config.canvas_size();
    let mut canvas = GrayFrame::filled(w, h, 255);

    let scale = PxScale::from(config.font_size);
    let scaled = font.as_scaled(scale);
    let id = font.glyph_id(glyph.as_char());
    if id.0 == 0 && glyph != Glyph::SPACE {
        return Err(CoreError::GlyphRender {
            code: glyph.code(),
            reason: "no glyph in font".to_string(),
        });
    }

    let positioned = id.with_scale_and_position(scale, point(0.0, scaled.ascent()));
    // Whitespace has no outline: the canvas stays blank.
    if let Some(outlined) = font.outline_glyph(positioned) {
        let bounds = outlined.px_bounds();
        let (ox, oy) = (bounds.min.x as i32, bounds.min.y as i32);
        outlined.draw(|x, y, coverage| {
            ink(&mut canvas, ox + x as i32, oy + y as i32, coverage);
        });
    }
    Ok(canvas)
}

/// Darken one canvas pixel by `coverage` (0 = untouched, 1 = black).
/// Out-of-canvas coordinates are clipped.
#[inline(always)]
pub fn ink(canvas: &mut GrayFrame, x: i32, y: i32, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width || y as u32 >= canvas.height {
        return;
    }
    let value = (255.0 * (1.0 - coverage.clamp(0.0, 1.0))).round() as u8;
    let (x, y) = (x as u32, y as u32);
    if value < canvas.get(x, y) {
        canvas.set(x, y, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ink_darkens_and_never_lightens() {
        let mut canvas = GrayFrame::filled(2, 2, 255);
        ink(&mut canvas, 0, 0, 1.0);
        ink(&mut canvas, 1, 0, 0.5);
        ink(&mut canvas, 1, 0, 0.1);
        assert_eq!(canvas.get(0, 0), 0);
        assert_eq!(canvas.get(1, 0), 128);
        assert_eq!(canvas.get(0, 1), 255);
    }

    #[test]
    fn ink_clips_outside_canvas() {
        let mut canvas = GrayFrame::filled(2, 2, 255);
        ink(&mut canvas, -1, 0, 1.0);
        ink(&mut canvas, 0, 2, 1.0);
        ink(&mut canvas, 5, 5, 1.0);
        assert!(canvas.data.iter().all(|&v| v == 255));
    }

    #[test]
    fn coverage_is_clamped() {
        let mut canvas = GrayFrame::filled(1, 1, 255);
        ink(&mut canvas, 0, 0, 1.7);
        assert_eq!(canvas.get(0, 0), 0);
    }

    #[test]
    fn mean_orders_ink_amount() {
        let blank = GrayFrame::filled(4, 4, 255);
        let mut dot = blank.clone();
        ink(&mut dot, 1, 1, 1.0);
        let mut bar = blank.clone();
        for x in 0..4 {
            ink(&mut bar, x, 2, 1.0);
        }
        assert!(blank.mean() > dot.mean());
        assert!(dot.mean() > bar.mean());
    }
}
