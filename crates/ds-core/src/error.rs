use std::path::PathBuf;

use thiserror::Error;

/// Erreurs des crates bibliothèques densiscii.
///
/// Build-time variants (`FontLoad`, `GlyphRender`, `DegenerateFont`,
/// `EmptySampleSet`) are fatal for the font being measured only.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("cannot load font {}: {reason}", .path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("cannot render glyph {code} ({:?}): {reason}", code_char(.code))]
    GlyphRender { code: u8, reason: String },

    #[error("degenerate font: every glyph has raw brightness {brightness}")]
    DegenerateFont { brightness: f64 },

    #[error("no brightness samples to build a table from")]
    EmptySampleSet,

    #[error("invalid glyph range {first}..={last} (printable is 32..=126)")]
    InvalidRange { first: u8, last: u8 },

    #[error("invalid decode table: {0}")]
    TableFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;

fn code_char(code: &u8) -> char {
    char::from(*code)
}
