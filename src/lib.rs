//! `isograph` library crate.
//!
//! Fits a bivariate polynomial to `(lat, lng, cost)` samples by least squares
//! and resamples it on a regular grid (`fit::estimate`).
//!
//! The binary (`iso`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the same pipeline can sit behind a CLI or a network endpoint

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;

pub use error::{AppError, EstimateError};
pub use fit::{estimate, generate_isograph};
