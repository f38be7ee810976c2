//! Grid resampling of a fitted surface.
//!
//! The grid spans the observed coordinate ranges with `dim` evenly spaced
//! values per axis (both endpoints included). Points are emitted latitude-major:
//! for each latitude, every longitude in increasing order.

use rayon::prelude::*;

use crate::domain::{AxisRange, EstimatePoint, PolySurface};
use crate::error::EstimateError;
use crate::models::{clip_cost, predict_with};

/// `n` evenly spaced values over `[min, max]`, endpoints inclusive.
///
/// `n == 1` yields `[min]`; `n == 0` yields nothing.
pub fn lin_space(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| min + step * i as f64).collect();
            // Pin the endpoint so rounding never leaves it short of `max`.
            out[n - 1] = max;
            out
        }
    }
}

/// Evaluate the clipped surface on a `dim × dim` grid.
///
/// Fails with `InvalidInput` if the grid cannot be allocated.
pub fn resample(
    surface: &PolySurface,
    lat_range: AxisRange,
    lng_range: AxisRange,
    dim: usize,
) -> Result<Vec<EstimatePoint>, EstimateError> {
    let too_large = || EstimateError::invalid(format!("a {dim}x{dim} grid cannot be allocated"));
    let len = dim.checked_mul(dim).ok_or_else(too_large)?;
    let mut points = Vec::new();
    points.try_reserve_exact(len).map_err(|_| too_large())?;

    let lat_axis = lin_space(lat_range.min, lat_range.max, dim);
    let lng_axis = lin_space(lng_range.min, lng_range.max, dim);
    let term_count = surface.terms.len();

    points.par_extend(lat_axis.par_iter().flat_map_iter(|&lat| {
        let mut row = vec![0.0; term_count];
        lng_axis.iter().map(move |&lng| EstimatePoint {
            lng,
            lat,
            cost: clip_cost(predict_with(surface, lat, lng, &mut row)),
        })
    }));
    Ok(points)
}
