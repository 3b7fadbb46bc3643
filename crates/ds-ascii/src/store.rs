//! On-disk formats.
//!
//! `brightness_decoder.json`: `{"0": ["#"], "1": ["#", "#", "@"], ...}`,
//! keys are decimal levels, values ordered single-character strings.
//! `brightness_data.json`: `{" ": 1.0, "!": 0.83, ...}`, write-only diagnostic.

use std::collections::BTreeMap;
use std::path::Path;

use ds_core::{CoreError, Glyph, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::table::{DecodeTable, LEVELS, NormalizedBrightness};

/// Default file name of the decode table.
pub const DECODER_FILE: &str = "brightness_decoder.json";

/// Default file name of the normalised brightness map.
pub const BRIGHTNESS_FILE: &str = "brightness_data.json";

/// Serialise with four-space indentation.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| CoreError::TableFormat(e.to_string()))
}

/// Decode table as JSON text. Empty levels are omitted.
///
/// # Errors
/// Returns a JSON error if serialisation fails.
pub fn table_to_json(table: &DecodeTable) -> Result<String> {
    let map: BTreeMap<u8, &[Glyph]> = table.iter().filter(|(_, c)| !c.is_empty()).collect();
    to_pretty_json(&map)
}

/// Parse a decode table from JSON text.
///
/// Missing levels are accepted and left empty; they decode to a blank glyph
/// at conversion time.
///
/// # Errors
/// `Json` for malformed JSON or a document that is not an object of string
/// arrays. `TableFormat` for a level key outside `0..=255`, or a glyph that
/// is not a single printable character.
///
/// # Example
/// ```
/// use ds_ascii::store::table_from_json;
/// let table = table_from_json(r##"{"0": ["#"], "1": ["#", " "], "2": [" "]}"##).unwrap();
/// assert_eq!(table.candidates(1).len(), 2);
/// assert!(table.candidates(3).is_empty());
/// ```
pub fn table_from_json(json: &str) -> Result<DecodeTable> {
    let map: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
    let mut levels: [Vec<Glyph>; LEVELS] = std::array::from_fn(|_| Vec::new());
    for (key, candidates) in map {
        let level: u8 = key
            .parse()
            .map_err(|_| CoreError::TableFormat(format!("unknown level key {key:?}")))?;
        levels[usize::from(level)] = candidates
            .iter()
            .map(|s| parse_glyph(&key, s))
            .collect::<Result<_>>()?;
    }
    let missing = levels.iter().filter(|c| c.is_empty()).count();
    if missing > 0 {
        log::warn!("Decode table has {missing} empty levels; they will render as blanks");
    }
    Ok(DecodeTable::from_candidates(levels))
}

fn parse_glyph(key: &str, s: &str) -> Result<Glyph> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Glyph::try_from(ch).map_err(|_| {
            CoreError::TableFormat(format!("level {key}: non-printable glyph {s:?}"))
        }),
        _ => Err(CoreError::TableFormat(format!(
            "level {key}: expected one character, got {s:?}"
        ))),
    }
}

/// Write the decode table to `path`.
///
/// # Errors
/// Returns an I/O or JSON error.
pub fn write_table(table: &DecodeTable, path: &Path) -> Result<()> {
    std::fs::write(path, table_to_json(table)?)?;
    log::debug!("Decode table written to {}", path.display());
    Ok(())
}

/// Read a decode table from `path`.
///
/// # Errors
/// Returns an I/O or JSON error.
pub fn read_table(path: &Path) -> Result<DecodeTable> {
    table_from_json(&std::fs::read_to_string(path)?)
}

/// Normalised brightness per glyph as JSON text, ascending code order.
///
/// # Errors
/// Returns a JSON error if serialisation fails.
pub fn brightness_to_json(normalized: &[NormalizedBrightness]) -> Result<String> {
    let map: BTreeMap<char, f64> = normalized
        .iter()
        .map(|n| (n.glyph.as_char(), n.norm))
        .collect();
    to_pretty_json(&map)
}

/// Write the normalised brightness map to `path`.
///
/// # Errors
/// Returns an I/O or JSON error.
pub fn write_brightness(normalized: &[NormalizedBrightness], path: &Path) -> Result<()> {
    std::fs::write(path, brightness_to_json(normalized)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(c: u8) -> Glyph {
        Glyph::new(c).unwrap()
    }

    #[test]
    fn json_keys_are_decimal_levels_in_numeric_order() {
        let table = DecodeTable::from_levels(&[(g(b'#'), 0), (g(b' '), 255)]).unwrap();
        let json = table_to_json(&table).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 256);
        assert_eq!(obj["0"], serde_json::json!(["#"]));
        assert_eq!(obj["255"], serde_json::json!([" "]));
        assert!(json.find("\"2\"").unwrap() < json.find("\"10\"").unwrap());
        assert!(json.contains("\n    \"0\": ["));
    }

    #[test]
    fn markup_glyphs_survive_parsing() {
        let table = table_from_json(r#"{"0": ["<", "&"], "1": ["\""], "2": ["'"]}"#).unwrap();
        assert_eq!(table.candidates(0), &[g(b'<'), g(b'&')]);
        assert_eq!(table.candidates(1), &[g(b'"')]);
        assert_eq!(table.candidates(2), &[g(b'\'')]);
    }

    #[test]
    fn rejects_malformed_entries() {
        for json in [
            r##"{"256": ["#"]}"##,
            r##"{"-1": ["#"]}"##,
            r##"{"x": ["#"]}"##,
            r#"{"0": ["ab"]}"#,
            r#"{"0": [""]}"#,
            r#"{"0": ["\n"]}"#,
            r#"{"0": ["é"]}"#,
        ] {
            assert!(
                matches!(table_from_json(json), Err(CoreError::TableFormat(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn format_errors_name_the_culprit() {
        let Err(err) = table_from_json(r#"{"7": ["ab"]}"#) else {
            panic!("expected an error");
        };
        let msg = err.to_string();
        assert!(msg.contains("level 7") && msg.contains("\"ab\""), "{msg}");

        let Err(err) = table_from_json(r##"{"300": ["#"]}"##) else {
            panic!("expected an error");
        };
        assert!(err.to_string().contains("\"300\""));
    }

    #[test]
    fn broken_json_stays_a_json_error() {
        assert!(matches!(table_from_json(r##"["#"]"##), Err(CoreError::Json(_))));
        assert!(matches!(table_from_json("{\"0\": "), Err(CoreError::Json(_))));
    }

    #[test]
    fn brightness_map_is_keyed_by_glyph() {
        let normalized = [
            NormalizedBrightness { glyph: g(b' '), norm: 1.0, level: 255 },
            NormalizedBrightness { glyph: g(b'#'), norm: 0.0, level: 0 },
        ];
        let json = brightness_to_json(&normalized).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[" "], serde_json::json!(1.0));
        assert_eq!(value["#"], serde_json::json!(0.0));
    }
}
