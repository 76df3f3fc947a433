//! CLI tool to write a synthetic flight-data JSON file.

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use flightviz_cli::sim::{sample_path, to_json, CircularPath, FlightPath, LinearPath};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pattern {
    Circle,
    Line,
}

/// Generate flight data for the replay player
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Flight shape
    #[arg(long, value_enum, default_value_t = Pattern::Circle)]
    pattern: Pattern,

    /// Number of samples
    #[arg(long, default_value_t = 97)]
    samples: usize,

    /// Seconds between samples
    #[arg(long, default_value_t = 60.0)]
    interval: f64,

    /// Speed in distance units per hour
    #[arg(long, default_value_t = 120.0)]
    speed: f64,

    /// Initial heading in degrees (0 = east, 90 = north)
    #[arg(long, default_value_t = 0.0)]
    heading: f64,

    /// Circle radius (circle pattern)
    #[arg(long, default_value_t = 150.0)]
    radius: f64,

    /// Turn clockwise (circle pattern)
    #[arg(long)]
    clockwise: bool,

    /// Timestamp of the first sample in seconds [default: now]
    #[arg(long)]
    start: Option<f64>,

    /// Write speed and direction as numbers instead of strings
    #[arg(long)]
    numeric: bool,

    /// Output file
    #[arg(long, default_value = "flightData.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.samples == 0 {
        bail!("--samples must be at least 1");
    }
    if !(args.interval > 0.0) {
        bail!("--interval must be positive");
    }

    let path: Box<dyn FlightPath> = match args.pattern {
        Pattern::Circle => Box::new(CircularPath::new(
            args.radius,
            args.speed,
            args.heading,
            args.clockwise,
        )),
        Pattern::Line => {
            let duration_h = args.samples as f64 * args.interval / 3600.0;
            Box::new(LinearPath::new(args.heading, args.speed, args.speed * duration_h))
        }
    };

    let start = args.start.unwrap_or_else(|| Utc::now().timestamp() as f64);
    let samples = sample_path(path.as_ref(), args.samples, args.interval, start);
    let json = to_json(&samples, !args.numeric);

    std::fs::write(&args.output, serde_json::to_string_pretty(&json)?)?;

    println!(
        "Wrote {} samples ({:?}, {}s apart) to {}",
        samples.len(),
        args.pattern,
        args.interval,
        args.output.display()
    );
    Ok(())
}
