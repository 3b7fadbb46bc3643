//! SVG emission for glyph grids.
//!
//! Geometry follows a monospace cell of `font_size * char_width` by
//! `font_size * line_height`; row `i` sits on baseline `(i + 1) * line pitch`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ds_core::config::{RenderConfig, SvgLayout};
use ds_core::{Glyph, GlyphGrid};

/// Font file inlined into the SVG as a base64 data URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedFont {
    pub mime: &'static str,
    pub format: &'static str,
    pub base64: String,
}

impl EmbeddedFont {
    /// Encode raw font bytes; `extension` selects the MIME type (ttf, otf, woff, woff2).
    #[must_use]
    pub fn from_bytes(bytes: &[u8], extension: &str) -> Self {
        let (mime, format) = match extension.to_ascii_lowercase().as_str() {
            "otf" => ("font/otf", "opentype"),
            "woff" => ("font/woff", "woff"),
            "woff2" => ("font/woff2", "woff2"),
            _ => ("font/ttf", "truetype"),
        };
        Self {
            mime,
            format,
            base64: STANDARD.encode(bytes),
        }
    }

    /// Read and encode a font file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Cannot read font {}", path.display()))?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("ttf");
        Ok(Self::from_bytes(&bytes, ext))
    }
}

/// SVG rendering parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgOptions {
    pub font_family: String,
    pub font_size: f64,
    pub char_width: f64,
    pub line_height: f64,
    pub layout: SvgLayout,
    pub embedded_font: Option<EmbeddedFont>,
}

impl SvgOptions {
    /// Options from the `[render]` config section, without an embedded font.
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            font_family: config.font_family.clone(),
            font_size: config.font_size,
            char_width: config.char_width,
            line_height: config.line_height,
            layout: config.layout,
            embedded_font: None,
        }
    }

    #[must_use]
    pub fn with_font(mut self, font: EmbeddedFont) -> Self {
        self.embedded_font = Some(font);
        self
    }

    fn advance(&self) -> f64 {
        self.font_size * self.char_width
    }

    fn pitch(&self) -> f64 {
        self.font_size * self.line_height
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

/// Append `glyph` to `out`, escaped for XML text content.
pub fn push_escaped(out: &mut String, glyph: Glyph) {
    match glyph.as_char() {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#x27;"),
        c => out.push(c),
    }
}

/// Font family as the body of a single-quoted CSS string inside `<style>`:
/// quotes and backslashes get CSS escapes, markup characters XML entities.
fn escape_family(s: &str) -> String {
    s.chars().fold(String::with_capacity(s.len()), |mut out, c| {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
        out
    })
}

/// Shortest decimal form with at most three fractional digits.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Render `grid` as an SVG document.
///
/// # Example
/// ```
/// use ds_core::{Glyph, GlyphGrid};
/// use ds_export::{SvgOptions, render_svg};
/// let mut grid = GlyphGrid::new(2, 1);
/// grid.set(0, 0, Glyph::new(b'<').unwrap());
/// let svg = render_svg(&grid, &SvgOptions::default());
/// assert!(svg.contains("&lt;"));
/// assert!(svg.ends_with("</svg>\n"));
/// ```
#[must_use]
pub fn render_svg(grid: &GlyphGrid, options: &SvgOptions) -> String {
    let width = f64::from(grid.width) * options.advance();
    let height = f64::from(grid.height) * options.pitch();
    let family = escape_family(&options.font_family);

    let mut svg = String::with_capacity(grid.cells.len() * 24 + 512);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        num(width),
        num(height)
    );
    svg.push_str("<style>\n");
    if let Some(font) = &options.embedded_font {
        let _ = writeln!(
            svg,
            r#"@font-face {{ font-family: '{family}'; src: url("data:{};base64,{}") format("{}"); }}"#,
            font.mime, font.base64, font.format
        );
    }
    let _ = writeln!(
        svg,
        "text {{ font-family: '{family}', monospace; font-size: {}px; white-space: pre; }}",
        num(options.font_size)
    );
    svg.push_str("</style>\n");

    for (row_idx, row) in grid.rows().enumerate() {
        let y = num((row_idx as f64 + 1.0) * options.pitch());
        match options.layout {
            SvgLayout::Row => {
                let mut text = String::with_capacity(row.len());
                for &glyph in row {
                    push_escaped(&mut text, glyph);
                }
                let _ = writeln!(svg, r#"<text x="0" y="{y}" xml:space="preserve">{text}</text>"#);
            }
            SvgLayout::Cell => {
                for (col_idx, &glyph) in row.iter().enumerate() {
                    // Blank cells draw nothing.
                    if glyph == Glyph::SPACE {
                        continue;
                    }
                    let x = num(col_idx as f64 * options.advance());
                    let _ = write!(svg, r#"<text x="{x}" y="{y}">"#);
                    push_escaped(&mut svg, glyph);
                    svg.push_str("</text>\n");
                }
            }
        }
    }
    svg.push_str("</svg>\n");
    svg
}

/// Render and write `grid` to `path`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_svg(grid: &GlyphGrid, options: &SvgOptions, path: &Path) -> Result<()> {
    std::fs::write(path, render_svg(grid, options))
        .with_context(|| format!("Cannot write {}", path.display()))?;
    log::info!("SVG saved to {}", path.display());
    Ok(())
}
