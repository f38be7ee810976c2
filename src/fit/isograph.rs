//! The `estimate` operation: clean → fit → resample.
//!
//! This is a pure function of its inputs. Parameter checks run before any
//! sample is touched, so a bad `order` or `dim_sample_count` never costs a fit.

use std::mem::size_of;

use tracing::debug;

use crate::data::prepare_samples;
use crate::domain::{EstimatePoint, Isograph, RawRow};
use crate::error::EstimateError;
use crate::fit::{fit_surface, resample};
use crate::math::{MAX_ORDER, term_count};

/// Fit a surface of total order `order` and resample it on a
/// `dim_sample_count × dim_sample_count` grid. Returns `[lng, lat, cost]` points.
pub fn estimate(
    samples: &[RawRow],
    order: i64,
    dim_sample_count: i64,
) -> Result<Vec<EstimatePoint>, EstimateError> {
    generate_isograph(samples, order, dim_sample_count).map(|iso| iso.points)
}

/// Like `estimate`, but keeps the fitted surface and diagnostics.
pub fn generate_isograph(
    samples: &[RawRow],
    order: i64,
    dim_sample_count: i64,
) -> Result<Isograph, EstimateError> {
    let order = validate_order(order)?;
    let dim = validate_dim_sample_count(dim_sample_count)?;

    let columns = prepare_samples(samples)?;
    debug!(
        rows_read = columns.rows_read,
        rows_used = columns.len(),
        "samples prepared"
    );

    let (surface, quality) = fit_surface(&columns, order)?;

    let empty = || EstimateError::EmptyDataset {
        rows_read: columns.rows_read,
    };
    let lat_range = columns.lat_range().ok_or_else(empty)?;
    let lng_range = columns.lng_range().ok_or_else(empty)?;

    let points = resample(&surface, lat_range, lng_range, dim)?;
    if points.iter().any(|p| !p.cost.is_finite()) {
        return Err(EstimateError::NonFiniteFit);
    }

    Ok(Isograph {
        rows_read: columns.rows_read,
        surface,
        quality,
        lat_range,
        lng_range,
        dim_sample_count: dim,
        points,
    })
}

/// Accepts `0..=MAX_ORDER` whose term count is representable.
pub fn validate_order(order: i64) -> Result<u32, EstimateError> {
    if order < 0 {
        return Err(EstimateError::invalid(format!("order must be >= 0, got {order}")));
    }
    u32::try_from(order)
        .ok()
        .filter(|&o| o <= MAX_ORDER && term_count(o).is_some())
        .ok_or_else(|| EstimateError::invalid(format!("order {order} is too large")))
}

/// Accepts any `d >= 1` whose `d × d` grid fits in the address space.
pub fn validate_dim_sample_count(dim_sample_count: i64) -> Result<usize, EstimateError> {
    if dim_sample_count < 1 {
        return Err(EstimateError::invalid(format!(
            "dim_sample_count must be >= 1, got {dim_sample_count}"
        )));
    }
    usize::try_from(dim_sample_count)
        .ok()
        .filter(|&d| {
            d.checked_mul(d)
                .and_then(|cells| cells.checked_mul(size_of::<EstimatePoint>()))
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| {
            EstimateError::invalid(format!("dim_sample_count {dim_sample_count} is too large"))
        })
}
