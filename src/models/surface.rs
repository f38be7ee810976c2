//! Evaluation of a fitted `PolySurface`.
//!
//! The value at `(lat, lng)` is the dot product of the point's basis row with
//! the coefficient vector, using the same term convention as the regression.

use crate::domain::PolySurface;
use crate::math::fill_basis_row;

/// Raw polynomial value at `(lat, lng)`.
pub fn predict(surface: &PolySurface, lat: f64, lng: f64) -> f64 {
    let mut row = vec![0.0; surface.terms.len()];
    predict_with(surface, lat, lng, &mut row)
}

/// Raw polynomial value at `(lat, lng)`, using `row` as the basis buffer.
///
/// `row` must hold one slot per term.
pub fn predict_with(surface: &PolySurface, lat: f64, lng: f64, row: &mut [f64]) -> f64 {
    fill_basis_row(&surface.terms, lat, lng, row);
    row.iter().zip(&surface.coefficients).map(|(b, c)| b * c).sum()
}

/// Clamp a cost estimate to `[0, ∞)`.
pub fn clip_cost(cost: f64) -> f64 {
    if cost < 0.0 { 0.0 } else { cost }
}

/// Evaluate a batch of points with a reusable row buffer.
pub fn predict_many(surface: &PolySurface, points: &[(f64, f64)]) -> Vec<f64> {
    let mut row = vec![0.0; surface.terms.len()];
    points
        .iter()
        .map(|&(lat, lng)| predict_with(surface, lat, lng, &mut row))
        .collect()
}
