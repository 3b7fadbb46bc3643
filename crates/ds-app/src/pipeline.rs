//! Batch pipelines behind the `measure` and `render` subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ds_ascii::store::{BRIGHTNESS_FILE, DECODER_FILE, write_brightness, write_table};
use ds_ascii::{DecodeTable, image_to_glyph_grid, normalize};
use ds_core::Config;
use ds_core::config::MeasureConfig;
use ds_export::{SvgOptions, write_svg};
use ds_measure::{measure_font, write_snapshots};
use fastrand::Rng;

/// Subfolder receiving per-glyph snapshots.
pub const SNAPSHOT_DIR: &str = "character_img";

/// Outcome of a multi-font measurement batch.
#[derive(Debug, Default)]
pub struct MeasureReport {
    /// Per-font output folders that were fully written.
    pub built: Vec<PathBuf>,
    /// Fonts that failed, with the error message.
    pub failed: Vec<(PathBuf, String)>,
}

/// Outcome of a folder render batch.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, String)>,
    /// Total pixels that fell back to a blank glyph.
    pub unmapped: usize,
}

/// Measure each font and write its decode table and brightness map.
///
/// A font that fails is logged and recorded; the batch continues.
///
/// # Errors
/// Returns an error only if `out_dir` cannot be created.
pub fn measure_fonts(fonts: &[PathBuf], out_dir: &Path, config: &MeasureConfig) -> Result<MeasureReport> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Cannot create {}", out_dir.display()))?;

    let mut report = MeasureReport::default();
    for font in fonts {
        match build_font_tables(font, out_dir, config) {
            Ok(dir) => {
                log::info!("Decode table for {} written to {}", font.display(), dir.display());
                report.built.push(dir);
            }
            Err(e) => {
                log::warn!("Skipping font {}: {e:#}", font.display());
                report.failed.push((font.clone(), format!("{e:#}")));
            }
        }
    }
    Ok(report)
}

/// Measure one font and write `<out_dir>/<font stem>/` artifacts.
///
/// Nothing is written unless measurement and table construction succeed.
///
/// # Errors
/// Returns an error on font load, glyph render, degenerate font or I/O failure.
pub fn build_font_tables(font: &Path, out_dir: &Path, config: &MeasureConfig) -> Result<PathBuf> {
    let measurement = measure_font(font, config)?;
    let normalized = normalize(&measurement.samples)?;
    let table = DecodeTable::from_normalized(&normalized)?;

    let stem = font
        .file_stem()
        .map_or_else(|| "font".into(), |s| s.to_string_lossy().into_owned());
    let dir = out_dir.join(stem);
    std::fs::create_dir_all(&dir).with_context(|| format!("Cannot create {}", dir.display()))?;

    write_table(&table, &dir.join(DECODER_FILE))?;
    write_brightness(&normalized, &dir.join(BRIGHTNESS_FILE))?;
    write_snapshots(&measurement, &dir.join(SNAPSHOT_DIR))?;
    Ok(dir)
}

/// SVG file name for an input image: `<family>-<stem>.svg`.
///
/// Path separators in the family become `_` so the file stays in the
/// output folder.
#[must_use]
pub fn output_name(font_family: &str, input: &Path) -> String {
    let family: String = font_family
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let stem = input
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    format!("{family}-{stem}.svg")
}

/// Convert every image of `input_dir` into an SVG in `output_dir`.
///
/// One random stream, seeded from `config.render.seed`, serves the whole
/// batch; images are taken in file-name order so reruns are identical.
/// Images that cannot be loaded are skipped.
///
/// # Errors
/// Returns an error if the folders cannot be read or created, or an SVG
/// cannot be written.
pub fn render_folder(
    table: &DecodeTable,
    input_dir: &Path,
    output_dir: &Path,
    config: &Config,
    svg: &SvgOptions,
) -> Result<RenderReport> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Cannot create {}", output_dir.display()))?;
    let images = ds_source::folder_batch::list_images(input_dir)?;
    log::info!("{} images found in {}", images.len(), input_dir.display());

    let mut rng = Rng::with_seed(config.render.seed);
    let mut report = RenderReport::default();
    for path in images {
        log::info!("Processing {}", path.display());
        let gray = match ds_source::image::load_image(&path)
            .and_then(|frame| ds_source::resize::prepare_grayscale(&frame, &config.resize))
        {
            Ok(gray) => gray,
            Err(e) => {
                log::warn!("Skipping {}: {e:#}", path.display());
                report.skipped.push((path, format!("{e:#}")));
                continue;
            }
        };

        let conversion = image_to_glyph_grid(&gray, table, &mut rng);
        report.unmapped += conversion.unmapped;

        let target = output_dir.join(output_name(&svg.font_family, &path));
        write_svg(&conversion.grid, svg, &target)?;
        report.written.push(target);
    }
    Ok(report)
}
