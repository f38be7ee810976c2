//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads settings and installs logging
//! - parses CLI arguments
//! - runs the estimate pipeline
//! - prints summaries/plots and writes outputs

use std::io::Write;

use clap::Parser;

use crate::cli::{Command, EstimateArgs, PlotArgs, SampleArgs};
use crate::config::Settings;
use crate::data::{RadialConfig, radial_samples};
use crate::domain::{EstimateRequest, EstimateResponse};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `iso` binary.
pub fn run() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    crate::logging::init(&settings.log_filter);

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Estimate(args) => handle_estimate(args, &settings),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_estimate(args: EstimateArgs, settings: &Settings) -> Result<(), AppError> {
    let input = crate::io::load_samples(&args.input, args.format)?;
    let iso = pipeline::run_from_input(&input, args.order, args.dim_sample_count, settings)?;

    // Human-readable output goes to stderr; stdout carries only JSON.
    if !args.quiet {
        eprint!("{}", crate::report::format_run_summary(&iso));
    }
    if args.plot {
        eprint!("{}", crate::plot::render_heatmap(&iso.points, args.width, args.height));
    }

    if let Some(path) = &args.export_csv {
        crate::io::write_estimates_csv(path, &iso.points)?;
    }

    let response = EstimateResponse {
        estimates: iso.points,
    };
    match &args.output {
        Some(path) => crate::io::write_estimates_json(path, &response, !args.compact),
        None => write_stdout(&response, !args.compact),
    }
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let response = crate::io::read_estimates_json(&args.estimates)?;
    let plot = crate::plot::render_heatmap(&response.estimates, args.width, args.height);
    print!("{plot}");
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = RadialConfig {
        origin_lat: args.origin.0,
        origin_lng: args.origin.1,
        directions: args.directions,
        steps: args.steps,
        step_m: args.step_m,
        base_cost: args.base_cost,
        cost_per_km: args.cost_per_km,
        noise_sd: args.noise_sd,
        seed: args.seed,
    };
    let request = EstimateRequest {
        cost_samples: radial_samples(&config)?,
        order: args.order,
        dim_sample_count: args.dim_sample_count,
    };

    let json = serde_json::to_string_pretty(&request)
        .map_err(|e| AppError::new(2, format!("Failed to encode request JSON: {e}")))?;
    match &args.output {
        Some(path) => std::fs::write(path, json + "\n")
            .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display()))),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn write_stdout(response: &EstimateResponse, pretty: bool) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    crate::io::write_estimates(&mut lock, response, pretty)?;
    writeln!(lock).map_err(|e| AppError::new(2, format!("Failed to write to stdout: {e}")))
}
