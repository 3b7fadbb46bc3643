use std::path::Path;

use ab_glyph::FontVec;
use ds_core::{CoreError, Result};

/// Read and parse a TrueType/OpenType font file.
///
/// # Errors
/// Returns `CoreError::FontLoad` if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ds_measure::load_font;
/// let font = load_font(std::path::Path::new("cour.ttf")).unwrap();
/// ```
pub fn load_font(path: &Path) -> Result<FontVec> {
    let bytes = std::fs::read(path).map_err(|e| CoreError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let font = FontVec::try_from_vec(bytes).map_err(|e| CoreError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::debug!("Loaded font {}", path.display());
    Ok(font)
}
