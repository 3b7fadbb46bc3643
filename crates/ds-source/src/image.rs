/// Image loading into RGBA frames.
use std::path::Path;

use anyhow::{Context, Result};
use ds_core::RgbaFrame;

/// Load any supported image file as 8-bit RGBA.
///
/// Images without an alpha channel come back fully opaque.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use ds_source::image::load_image;
/// let frame = load_image(std::path::Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<RgbaFrame> {
    let img = image::open(path).with_context(|| format!("Cannot load {}", path.display()))?;
    let has_alpha = img.color().has_alpha();
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!(
        "Loaded {} ({width}x{height}, alpha: {has_alpha})",
        path.display()
    );
    Ok(RgbaFrame {
        data: rgba.into_raw(),
        width,
        height,
    })
}
