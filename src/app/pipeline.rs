//! Shared "estimate pipeline" logic.
//!
//! This is the collaborator around the pure `estimate` core: it resolves
//! request parameters, applies the configured size guards, runs the fit, and
//! turns failures into `AppError`s. The CLI only handles presentation.

use tracing::{info, warn};

use crate::config::Settings;
use crate::domain::{EstimateRequest, EstimateResponse, Isograph, RawRow};
use crate::error::{AppError, EstimateError};
use crate::fit::generate_isograph;
use crate::io::SampleInput;

/// Serve one request body, as the estimation endpoint would.
pub fn handle_request(request: &EstimateRequest, settings: &Settings) -> Result<EstimateResponse, AppError> {
    let iso = run_estimate(
        &request.cost_samples,
        request.order,
        request.dim_sample_count,
        settings,
    )?;
    Ok(EstimateResponse {
        estimates: iso.points,
    })
}

/// Resolve parameters (explicit overrides win over values in the input) and run.
pub fn run_from_input(
    input: &SampleInput,
    order: Option<i64>,
    dim_sample_count: Option<i64>,
    settings: &Settings,
) -> Result<Isograph, AppError> {
    let order = order
        .or(input.order)
        .ok_or_else(|| AppError::new(2, "Missing `order`: pass --order or include it in the request body."))?;
    let dim_sample_count = dim_sample_count.or(input.dim_sample_count).ok_or_else(|| {
        AppError::new(
            2,
            "Missing `dim_sample_count`: pass --dim-sample-count or include it in the request body.",
        )
    })?;

    run_estimate(&input.rows, order, dim_sample_count, settings)
}

/// Apply the configured guards, then fit and resample.
pub fn run_estimate(
    rows: &[RawRow],
    order: i64,
    dim_sample_count: i64,
    settings: &Settings,
) -> Result<Isograph, AppError> {
    check_limits(order, dim_sample_count, settings)?;

    let iso = generate_isograph(rows, order, dim_sample_count)?;

    let dropped = iso.rows_read - iso.quality.n;
    if dropped > 0 {
        warn!(dropped, rows_read = iso.rows_read, "dropped incomplete sample rows");
    }
    info!(
        samples = iso.quality.n,
        order,
        terms = iso.quality.term_count,
        rank = iso.quality.rank,
        rmse = iso.quality.rmse,
        points = iso.points.len(),
        "isograph estimated"
    );

    Ok(iso)
}

fn check_limits(order: i64, dim_sample_count: i64, settings: &Settings) -> Result<(), EstimateError> {
    if order > i64::from(settings.max_order) {
        return Err(EstimateError::invalid(format!(
            "order {order} exceeds the configured maximum {}",
            settings.max_order
        )));
    }
    if dim_sample_count > settings.max_dim_sample_count as i64 {
        return Err(EstimateError::invalid(format!(
            "dim_sample_count {dim_sample_count} exceeds the configured maximum {}",
            settings.max_dim_sample_count
        )));
    }
    Ok(())
}
