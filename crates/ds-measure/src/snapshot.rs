/// Debug snapshots: one grayscale PNG per measured glyph, named `<code>.png`.
use std::path::Path;

use ds_core::{CoreError, Result};
use image::GrayImage;

use crate::density::FontMeasurement;

/// Write every retained snapshot into `dir` (created if needed).
/// Returns the number of files written.
///
/// # Errors
/// Returns an I/O error if the directory or a file cannot be written.
pub fn write_snapshots(measurement: &FontMeasurement, dir: &Path) -> Result<usize> {
    if measurement.snapshots.is_empty() {
        return Ok(0);
    }
    std::fs::create_dir_all(dir)?;
    for (glyph, canvas) in &measurement.snapshots {
        let img = GrayImage::from_raw(canvas.width, canvas.height, canvas.data.clone())
            .ok_or_else(|| std::io::Error::other("snapshot buffer size mismatch"))?;
        let path = dir.join(format!("{}.png", glyph.code()));
        img.save(&path)
            .map_err(|e| CoreError::Io(std::io::Error::other(e.to_string())))?;
    }
    log::debug!(
        "Wrote {} glyph snapshots to {}",
        measurement.snapshots.len(),
        dir.display()
    );
    Ok(measurement.snapshots.len())
}
