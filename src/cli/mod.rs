//! Command-line parsing for the isograph estimator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting code; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::InputFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "iso", version, about = "Polynomial cost-surface (isograph) estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a polynomial surface to cost samples and resample it on a grid.
    Estimate(EstimateArgs),
    /// Render a saved estimates JSON as a terminal heat map.
    Plot(PlotArgs),
    /// Generate a synthetic estimation request around an origin.
    Sample(SampleArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// Samples file: a request body / row array (JSON) or `lat,lng,cost` CSV. `-` reads stdin.
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Input format.
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    /// Polynomial total order (overrides the request body).
    #[arg(short = 'k', long, allow_negative_numbers = true)]
    pub order: Option<i64>,

    /// Grid points per axis (overrides the request body).
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    pub dim_sample_count: Option<i64>,

    /// Write the estimates JSON here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also export the estimates as `lng,lat,cost` CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,

    /// Emit single-line JSON.
    #[arg(long)]
    pub compact: bool,

    /// Print a heat map of the grid to stderr.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,

    /// Suppress the run summary.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options for plotting saved estimates.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Estimates JSON produced by `iso estimate`.
    #[arg(long, value_name = "JSON")]
    pub estimates: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Origin as `LAT,LNG`.
    #[arg(long, value_parser = parse_origin, allow_hyphen_values = true)]
    pub origin: (f64, f64),

    /// Number of evenly spaced bearings.
    #[arg(long, default_value_t = 8)]
    pub directions: usize,

    /// Samples per bearing.
    #[arg(long, default_value_t = 10)]
    pub steps: usize,

    /// Distance between samples along a bearing (metres).
    #[arg(long, default_value_t = 100.0)]
    pub step_m: f64,

    /// Cost at the origin.
    #[arg(long, default_value_t = 0.0)]
    pub base_cost: f64,

    /// Cost added per kilometre travelled.
    #[arg(long, default_value_t = 240.0)]
    pub cost_per_km: f64,

    /// Standard deviation of the Gaussian cost noise.
    #[arg(long, default_value_t = 20.0)]
    pub noise_sd: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// `order` written into the generated request.
    #[arg(long, default_value_t = 2)]
    pub order: i64,

    /// `dim_sample_count` written into the generated request.
    #[arg(long, default_value_t = 20)]
    pub dim_sample_count: i64,

    /// Write the request here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn parse_origin(s: &str) -> Result<(f64, f64), String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{s}'"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("bad latitude '{lat}': {e}"))?;
    let lng = lng.trim().parse::<f64>().map_err(|e| format!("bad longitude '{lng}': {e}"))?;
    Ok((lat, lng))
}
