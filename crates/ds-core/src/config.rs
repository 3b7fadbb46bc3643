//! Configuration TOML de densiscii.
//!
//! Every field has a default; a missing config file is equivalent to an
//! empty one.

use std::path::Path;

use serde::Deserialize;

use crate::charset::GlyphRange;
use crate::error::{CoreError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub measure: MeasureConfig,
    pub resize: ResizeConfig,
    pub render: RenderConfig,
}

/// Glyph density measurement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    /// Reference rasterisation size in pixels.
    pub font_size: f32,
    pub first: u8,
    pub last: u8,
    /// Canvas width as a fraction of `font_size`.
    pub cell_width_ratio: f32,
    /// Canvas height as a fraction of `font_size`.
    pub cell_height_ratio: f32,
    /// Keep one bitmap per glyph for inspection.
    pub snapshots: bool,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            font_size: 30.0,
            first: 32,
            last: 126,
            cell_width_ratio: 0.6,
            cell_height_ratio: 1.2,
            snapshots: false,
        }
    }
}

impl MeasureConfig {
    /// Glyph range described by `first..=last`.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidRange` if the bounds are not printable.
    pub fn range(&self) -> Result<GlyphRange> {
        GlyphRange::new(self.first, self.last)
    }

    /// Canvas size (width, height) in pixels, rounded up.
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        let w = (self.font_size * self.cell_width_ratio).ceil().max(1.0) as u32;
        let h = (self.font_size * self.cell_height_ratio).ceil().max(1.0) as u32;
        (w, h)
    }
}

/// Image preparation before conversion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Gaussian blur sigma; 0 disables the blur.
    pub blur_sigma: f32,
    /// Vertical squash compensating for glyph cells being taller than wide.
    pub height_ratio: f64,
    pub max_width: u32,
    pub max_height: u32,
    pub alpha: AlphaPolicy,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            height_ratio: 0.55 / 0.9,
            max_width: 300,
            max_height: 300,
            alpha: AlphaPolicy::default(),
        }
    }
}

/// How transparent pixels are resolved against the white background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphaPolicy {
    /// Any pixel with alpha < 255 becomes white.
    #[default]
    Flatten,
    /// Alpha compositing over white.
    Blend,
}

/// SVG emission and random glyph selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Seed for the batch random stream.
    pub seed: u64,
    pub font_family: String,
    pub font_size: f64,
    /// Glyph advance as a fraction of `font_size`.
    pub char_width: f64,
    /// Line pitch as a fraction of `font_size`.
    pub line_height: f64,
    pub layout: SvgLayout,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            seed: 1234,
            font_family: "Courier New".to_string(),
            font_size: 10.0,
            char_width: 0.6,
            line_height: 0.9,
            layout: SvgLayout::default(),
        }
    }
}

/// SVG text layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvgLayout {
    /// One positioned `<text>` per glyph.
    #[default]
    Cell,
    /// One `<text xml:space="preserve">` per row.
    Row,
}

impl Config {
    /// Load from a TOML file. `None` or a missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            log::warn!("Config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|source| CoreError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML text.
    ///
    /// # Errors
    /// Returns the TOML deserialisation error.
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::parse(
            r#"
            [measure]
            font_size = 20.0
            snapshots = true

            [render]
            layout = "row"
            seed = 7

            [resize]
            alpha = "blend"
            "#,
        )
        .unwrap();
        assert!((cfg.measure.font_size - 20.0).abs() < f32::EPSILON);
        assert!(cfg.measure.snapshots);
        assert_eq!(cfg.measure.first, 32);
        assert_eq!(cfg.render.layout, SvgLayout::Row);
        assert_eq!(cfg.render.seed, 7);
        assert_eq!(cfg.render.font_family, "Courier New");
        assert_eq!(cfg.resize.alpha, AlphaPolicy::Blend);
        assert_eq!(cfg.resize.max_width, 300);
    }

    #[test]
    fn canvas_matches_reference_geometry() {
        let cfg = MeasureConfig::default();
        assert_eq!(cfg.canvas_size(), (18, 36));
    }

    #[test]
    fn invalid_range_is_rejected() {
        let cfg = MeasureConfig {
            first: 5,
            ..MeasureConfig::default()
        };
        assert!(matches!(cfg.range(), Err(CoreError::InvalidRange { .. })));
    }

    #[test]
    fn load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[render]\nseed = \"x\"\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(CoreError::Config { .. })
        ));
    }
}
