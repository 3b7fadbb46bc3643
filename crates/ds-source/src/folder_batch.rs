/// Folder iteration for batch conversion.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Extensions accepted as input images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// True if `path` has one of [`IMAGE_EXTENSIONS`].
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Image files directly inside `dir`, sorted by file name so batches are
/// processed in a reproducible order. Subdirectories are not visited.
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Cannot read folder {}", dir.display()))?;
    let mut images = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Cannot list {}", dir.display()))?
            .path();
        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        } else {
            log::debug!("Skipping {}", path.display());
        }
    }
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(is_supported_image(Path::new("a/B.PNG")));
        assert!(is_supported_image(Path::new("x.JpEg")));
        assert!(is_supported_image(Path::new("x.webp")));
        assert!(!is_supported_image(Path::new("x.svg")));
        assert!(!is_supported_image(Path::new("png")));
    }

    #[test]
    fn lists_images_sorted_and_skips_others() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta.png", "alpha.JPG", "notes.txt", "mid.gif"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names: Vec<String> = list_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha.JPG", "mid.gif", "zeta.png"]);
    }

    #[test]
    fn missing_folder_is_an_error() {
        assert!(list_images(Path::new("/nonexistent/densiscii/input")).is_err());
    }
}
