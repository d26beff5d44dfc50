use anyhow::{Context, Result};
use clap::Parser;
use irverb::{Reverb, Settings};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "irverb")]
#[command(version)]
#[command(about = "Convolution reverb: renders a dry WAV through an impulse response.")]
struct Args {
    #[arg(help = "Dry 16-bit mono PCM WAV file")]
    dry: PathBuf,
    #[arg(help = "Impulse response, 16-bit mono PCM WAV file")]
    ir: PathBuf,
    #[arg(help = "Output WAV file (created or overwritten)")]
    output: PathBuf,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    info!("irverb v{}", env!("CARGO_PKG_VERSION"));
    info!("Args: {args:?}");

    let settings = Settings::load().context("failed to load settings")?;
    info!("Settings:\n{settings}");

    let reverb = Reverb::new(settings);
    let report = reverb
        .render_file(&args.dry, &args.ir, &args.output)
        .with_context(|| {
            format!(
                "failed to render '{}' through '{}'",
                args.dry.display(),
                args.ir.display()
            )
        })?;

    match report.transform_len {
        Some(len) => info!(
            "Done: {} + {} samples -> {} samples at {} Hz ({}, {len}-point transform)",
            report.dry_samples,
            report.ir_samples,
            report.output_samples,
            report.sample_rate,
            report.strategy
        ),
        None => info!(
            "Done: {} + {} samples -> {} samples at {} Hz ({})",
            report.dry_samples,
            report.ir_samples,
            report.output_samples,
            report.sample_rate,
            report.strategy
        ),
    }

    Ok(())
}
