//! Measurement against real fonts shipped under `tests/fonts/`.
//!
//! `DejaVuSansMono-NoTilde.ttf` is the same font with `~` removed from its
//! character maps.

use std::path::PathBuf;

use ds_core::config::MeasureConfig;
use ds_core::{CoreError, Glyph, GrayFrame};
use ds_measure::density::render_glyph;
use ds_measure::{load_font, measure_font, write_snapshots};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fonts").join(name)
}

fn raw(samples: &[ds_core::BrightnessSample], ch: u8) -> f64 {
    samples
        .iter()
        .find(|s| s.glyph.code() == ch)
        .map(|s| s.raw)
        .unwrap()
}

fn inked_rows(canvas: &GrayFrame) -> Vec<usize> {
    canvas
        .rows()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|&v| v < 255))
        .map(|(y, _)| y)
        .collect()
}

#[test]
fn measures_every_printable_glyph_in_code_order() {
    let m = measure_font(&fixture("DejaVuSansMono.ttf"), &MeasureConfig::default()).unwrap();
    assert_eq!(m.samples.len(), 95);
    let codes: Vec<u8> = m.samples.iter().map(|s| s.glyph.code()).collect();
    assert_eq!(codes, (32..=126).collect::<Vec<u8>>());
    assert!(m.snapshots.is_empty());
}

#[test]
fn space_is_white_and_dense_glyphs_are_darker() {
    let m = measure_font(&fixture("DejaVuSansMono.ttf"), &MeasureConfig::default()).unwrap();
    let space = raw(&m.samples, b' ');
    let dot = raw(&m.samples, b'.');
    assert!((space - 255.0).abs() < f64::EPSILON);
    assert!(dot < space);
    assert!(raw(&m.samples, b'M') < dot);
    assert!(raw(&m.samples, b'@') < dot);
    assert!(m.samples.iter().all(|s| s.raw > 0.0 && s.raw <= 255.0));
}

#[test]
fn baseline_sits_at_the_ascent() {
    let font = load_font(&fixture("DejaVuSansMono.ttf")).unwrap();
    let config = MeasureConfig::default();

    // 30 px over ascent 1901 / descent -483: baseline near y = 23.9.
    let x = render_glyph(&font, Glyph::new(b'x').unwrap(), &config).unwrap();
    assert_eq!((x.width, x.height), (18, 36));
    let rows = inked_rows(&x);
    assert!(rows.contains(&23), "{rows:?}");
    assert!(rows.iter().all(|&y| (9..=23).contains(&y)), "{rows:?}");

    // The underscore hangs below the baseline but inside the canvas.
    let under = render_glyph(&font, Glyph::new(b'_').unwrap(), &config).unwrap();
    let rows = inked_rows(&under);
    assert!(rows.contains(&29), "{rows:?}");
    assert!(rows.iter().all(|&y| (28..=30).contains(&y)), "{rows:?}");
}

#[test]
fn missing_glyph_aborts_the_whole_pass() {
    let path = fixture("DejaVuSansMono-NoTilde.ttf");
    let result = measure_font(&path, &MeasureConfig::default());
    assert!(
        matches!(result, Err(CoreError::GlyphRender { code: 126, .. })),
        "{result:?}"
    );

    let without_tilde = MeasureConfig {
        last: 125,
        ..MeasureConfig::default()
    };
    let m = measure_font(&path, &without_tilde).unwrap();
    assert_eq!(m.samples.len(), 94);
}

#[test]
fn snapshots_are_kept_on_request_and_written_as_png() {
    let config = MeasureConfig {
        first: b'A',
        last: b'E',
        snapshots: true,
        ..MeasureConfig::default()
    };
    let m = measure_font(&fixture("DejaVuSansMono.ttf"), &config).unwrap();
    assert_eq!(m.snapshots.len(), 5);
    assert_eq!(m.snapshots[0].0, Glyph::new(b'A').unwrap());

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("character_img");
    assert_eq!(write_snapshots(&m, &out).unwrap(), 5);
    assert!(out.join("65.png").exists());
    assert!(out.join("69.png").exists());
}
