use anyhow::{Context, Result, bail};
use clap::Parser;
use ds_app::cli::{Cli, Command};
use ds_app::pipeline;
use ds_core::Config;
use ds_export::{EmbeddedFont, SvgOptions};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Measure(args) => {
            args.apply(&mut config);
            let report = pipeline::measure_fonts(&args.fonts, &args.out, &config.measure)?;
            log::info!(
                "{} font(s) measured, {} failed",
                report.built.len(),
                report.failed.len()
            );
            if report.built.is_empty() {
                bail!("no font could be measured");
            }
        }
        Command::Render(args) => {
            args.apply(&mut config);
            let table = ds_ascii::store::read_table(&args.table)
                .with_context(|| format!("Cannot read decode table {}", args.table.display()))?;

            let mut svg = SvgOptions::from_config(&config.render);
            if let Some(font_file) = &args.font_file {
                svg = svg.with_font(EmbeddedFont::from_file(font_file)?);
            }

            let report = pipeline::render_folder(&table, &args.input, &args.output, &config, &svg)?;
            log::info!(
                "{} SVG(s) written, {} image(s) skipped",
                report.written.len(),
                report.skipped.len()
            );
            if report.unmapped > 0 {
                log::warn!("{} pixel(s) rendered blank for lack of a decode entry", report.unmapped);
            }
        }
    }
    Ok(())
}
