//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ds_core::Config;
use ds_core::config::{AlphaPolicy, SvgLayout};

/// Glyph-density character art.
#[derive(Debug, Parser)]
#[command(name = "densiscii", version, about)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Measure glyph density of fonts and write their decode tables.
    Measure(MeasureArgs),
    /// Convert every image of a folder into SVG glyph art.
    Render(RenderArgs),
}

#[derive(Debug, Args)]
pub struct MeasureArgs {
    /// Font files (TTF/OTF) to measure.
    #[arg(required = true)]
    pub fonts: Vec<PathBuf>,

    /// Output folder; one subfolder per font.
    #[arg(short, long, default_value = "tables")]
    pub out: PathBuf,

    /// Reference rasterisation size in pixels.
    #[arg(long)]
    pub size: Option<f32>,

    /// Keep one PNG per glyph under `character_img/`.
    #[arg(long)]
    pub snapshots: bool,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Decode table (`brightness_decoder.json`).
    #[arg(short, long)]
    pub table: PathBuf,

    /// Folder of input images.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Folder receiving the SVG files.
    #[arg(short, long)]
    pub output: PathBuf,

    /// CSS font family written into the SVG.
    #[arg(long)]
    pub font_family: Option<String>,

    /// Font file embedded into the SVG as a data URL.
    #[arg(long)]
    pub font_file: Option<PathBuf>,

    /// Output font size in pixels.
    #[arg(long)]
    pub font_size: Option<f64>,

    /// Seed of the batch random stream.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum)]
    pub layout: Option<Layout>,

    /// Transparency handling.
    #[arg(long, value_enum)]
    pub alpha: Option<Alpha>,
}

/// SVG layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// One `<text>` per glyph.
    Cell,
    /// One `<text>` per row.
    Row,
}

impl From<Layout> for SvgLayout {
    fn from(l: Layout) -> Self {
        match l {
            Layout::Cell => SvgLayout::Cell,
            Layout::Row => SvgLayout::Row,
        }
    }
}

/// Transparency handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Alpha {
    /// Any transparency becomes white.
    Flatten,
    /// Composite over white.
    Blend,
}

impl From<Alpha> for AlphaPolicy {
    fn from(a: Alpha) -> Self {
        match a {
            Alpha::Flatten => AlphaPolicy::Flatten,
            Alpha::Blend => AlphaPolicy::Blend,
        }
    }
}

impl MeasureArgs {
    /// Override config fields given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(size) = self.size {
            config.measure.font_size = size;
        }
        if self.snapshots {
            config.measure.snapshots = true;
        }
    }
}

impl RenderArgs {
    /// Override config fields given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(family) = &self.font_family {
            config.render.font_family.clone_from(family);
        }
        if let Some(size) = self.font_size {
            config.render.font_size = size;
        }
        if let Some(seed) = self.seed {
            config.render.seed = seed;
        }
        if let Some(layout) = self.layout {
            config.render.layout = layout.into();
        }
        if let Some(alpha) = self.alpha {
            config.resize.alpha = alpha.into();
        }
    }
}
