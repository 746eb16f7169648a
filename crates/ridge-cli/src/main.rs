//! Ridge Signal Analysis Command-Line Interface
//!
//! This CLI provides tools for:
//! - Detecting peaks in delimited sensor captures, one axis at a time
//! - Summarizing per-axis statistics
//! - Generating synthetic captures with known peak content
//!
//! Captures follow the accelerometer-log convention: the first column is
//! a timestamp and every later column is one axis of signal data.

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use ridge_core::{PeakDetector, SamplePoint, SignalSummary};
use ridge_sim::{BumpSignalConfig, BumpSignalGenerator};
use std::path::PathBuf;
use tracing::{debug, info};

mod reader;

#[derive(Parser)]
#[command(name = "ridge")]
#[command(author, version, about = "1-D signal peak analysis", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect peaks in each axis of a capture
    Detect {
        /// Input file (comma separated, timestamp column first)
        #[arg(short, long)]
        input: PathBuf,

        /// Threshold sensitivity in standard deviations above the mean
        #[arg(long, default_value = "1.5")]
        sigmas: f64,

        /// Keep only peaks of at least this area (uses the sparse-point
        /// scan, whose area integration runs past the right trough)
        #[arg(long)]
        min_area: Option<f64>,

        /// Output format (text, json, csv)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Summarize each axis of a capture
    Stats {
        /// Input file (comma separated, timestamp column first)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Generate a synthetic capture with known peak content
    Generate {
        /// Output file
        #[arg(short, long, default_value = "bumps.csv")]
        output: PathBuf,

        /// Samples per axis
        #[arg(long, default_value = "512")]
        samples: usize,

        /// Bumps per axis
        #[arg(long, default_value = "4")]
        bumps: usize,

        /// Standard deviation of the additive noise
        #[arg(long, default_value = "0.5")]
        noise: f64,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of axis columns after the timestamp
        #[arg(long, default_value = "3")]
        axes: usize,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    match cli.command {
        Commands::Detect {
            input,
            sigmas,
            min_area,
            format,
        } => cmd_detect(input, sigmas, min_area, &format),

        Commands::Stats { input, format } => cmd_stats(input, &format),

        Commands::Generate {
            output,
            samples,
            bumps,
            noise,
            seed,
            axes,
        } => cmd_generate(output, samples, bumps, noise, seed, axes),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load a capture and split off the timestamp column.
fn load_axes(input: &PathBuf) -> Result<Vec<Vec<f64>>> {
    let columns = reader::read_columns(input)?;
    if columns.len() < 2 {
        bail!(
            "{}: need a timestamp column plus at least one axis column",
            input.display()
        );
    }

    info!(
        axes = columns.len() - 1,
        samples = columns[0].len(),
        "loaded {}",
        input.display()
    );

    // The leading timestamp column is skipped by convention.
    Ok(columns.into_iter().skip(1).collect())
}

fn cmd_detect(input: PathBuf, sigmas: f64, min_area: Option<f64>, format: &str) -> Result<()> {
    let axes = load_axes(&input)?;
    let detector = PeakDetector::new().with_sigmas(sigmas);

    for (i, axis) in axes.iter().enumerate() {
        let peaks = match min_area {
            Some(min) => {
                let points: Vec<SamplePoint> = axis
                    .iter()
                    .enumerate()
                    .map(|(x, &v)| SamplePoint::new(x as u64, v))
                    .collect();
                detector.find_peaks_of_size(&points, min)
            }
            None => detector.find_peaks(axis),
        };
        debug!(axis = i + 1, peaks = peaks.len(), "axis scanned");

        println!("Axis {}:", i + 1);
        let rendered = match format {
            "text" => PeakDetector::format_text(&peaks),
            "json" => PeakDetector::format_json(&peaks),
            "csv" => PeakDetector::format_csv(&peaks),
            other => bail!("unknown output format: '{other}'"),
        };
        println!("{rendered}");
    }

    Ok(())
}

fn cmd_stats(input: PathBuf, format: &str) -> Result<()> {
    let axes = load_axes(&input)?;

    for (i, axis) in axes.iter().enumerate() {
        let summary = SignalSummary::compute(axis)
            .with_context(|| format!("axis {}: cannot summarize", i + 1))?;

        println!("Axis {}:", i + 1);
        let rendered = match format {
            "text" => summary.to_text(),
            "json" => summary.to_json(),
            other => bail!("unknown output format: '{other}'"),
        };
        println!("{rendered}");
    }

    Ok(())
}

fn cmd_generate(
    output: PathBuf,
    samples: usize,
    bumps: usize,
    noise: f64,
    seed: u64,
    axes: usize,
) -> Result<()> {
    if axes == 0 {
        bail!("need at least one axis column");
    }

    // One independently seeded generator per axis so the columns differ.
    let signals: Vec<Vec<f64>> = (0..axes)
        .map(|axis| {
            let config = BumpSignalConfig {
                samples,
                bumps,
                noise_sigma: noise,
                seed: seed.wrapping_add(axis as u64),
                ..Default::default()
            };
            BumpSignalGenerator::new(config).generate()
        })
        .collect();

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    for i in 0..samples {
        let mut record = Vec::with_capacity(axes + 1);
        record.push(i.to_string());
        for signal in &signals {
            record.push(signal[i].to_string());
        }
        writer
            .write_record(&record)
            .with_context(|| format!("failed to write {}", output.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        samples,
        bumps, axes, "wrote synthetic capture to {}", output.display()
    );
    println!(
        "Wrote {} samples x {} axes to {}",
        samples,
        axes,
        output.display()
    );

    Ok(())
}
