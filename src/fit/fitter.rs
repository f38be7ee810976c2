//! Polynomial least squares fit.
//!
//! Given cleaned samples `(lat_i, lng_i, cost_i)` and a total order `N`:
//! - build the regression matrix, one row per sample, one column per term of
//!   `power_set(N)`
//! - solve for the coefficients by SVD least squares
//! - report SSE/RMSE and the numerical rank
//!
//! A rank-deficient matrix (too few distinct samples for the order, or
//! collinear coordinates) is not an error: the minimum-norm coefficients are
//! returned and the deficiency is logged and recorded in `FitQuality`.

use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

use crate::data::SampleColumns;
use crate::domain::{FitQuality, PolySurface, PowerTerm};
use crate::error::EstimateError;
use crate::math::{fill_basis_row, power_set, solve_least_squares};
use crate::models::predict_many;

/// Fit a surface of total order `order` to the samples.
pub fn fit_surface(
    samples: &SampleColumns,
    order: u32,
) -> Result<(PolySurface, FitQuality), EstimateError> {
    if samples.is_empty() {
        return Err(EstimateError::EmptyDataset {
            rows_read: samples.rows_read,
        });
    }

    let terms = power_set(order)?;
    let x = regression_matrix(&terms, &samples.lat, &samples.lng)?;
    // Finite coordinates can still overflow once raised to a power.
    if x.iter().any(|v| !v.is_finite()) {
        return Err(EstimateError::NonFiniteFit);
    }
    let y = DVector::from_column_slice(&samples.cost);

    debug!(
        rows = x.nrows(),
        terms = x.ncols(),
        order,
        "solving polynomial least squares"
    );

    let solution = solve_least_squares(&x, &y).ok_or(EstimateError::NonFiniteFit)?;
    if solution.rank < terms.len() {
        warn!(
            rank = solution.rank,
            terms = terms.len(),
            samples = samples.len(),
            "regression matrix is rank-deficient; using minimum-norm coefficients"
        );
    }

    let surface = PolySurface {
        order,
        coefficients: solution.beta.iter().copied().collect(),
        terms,
    };

    let points: Vec<(f64, f64)> = samples
        .lat
        .iter()
        .zip(&samples.lng)
        .map(|(&lat, &lng)| (lat, lng))
        .collect();
    let sse: f64 = predict_many(&surface, &points)
        .iter()
        .zip(&samples.cost)
        .map(|(fit, obs)| (obs - fit).powi(2))
        .sum();
    let n = samples.len();

    let quality = FitQuality {
        n,
        term_count: surface.terms.len(),
        rank: solution.rank,
        sse,
        rmse: (sse / n as f64).sqrt(),
    };

    Ok((surface, quality))
}

/// Row `i`, column `k` holds `lat_i^a_k * lng_i^b_k` for term `k = (a_k, b_k)`.
///
/// Fails with `InvalidInput` if the matrix cannot be allocated.
pub fn regression_matrix(
    terms: &[PowerTerm],
    lat: &[f64],
    lng: &[f64],
) -> Result<DMatrix<f64>, EstimateError> {
    let (rows, cols) = (lat.len(), terms.len());
    let too_large = || {
        EstimateError::invalid(format!(
            "a {rows}x{cols} regression matrix cannot be allocated"
        ))
    };
    let len = rows.checked_mul(cols).ok_or_else(too_large)?;
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| too_large())?;
    data.resize(len, 0.0);
    let mut x = DMatrix::from_vec(rows, cols, data);

    let mut row = vec![0.0; terms.len()];
    for (i, (&la, &ln)) in lat.iter().zip(lng).enumerate() {
        fill_basis_row(terms, la, ln, &mut row);
        for (k, v) in row.iter().enumerate() {
            x[(i, k)] = *v;
        }
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::predict;

    fn columns(rows: &[[f64; 3]]) -> SampleColumns {
        SampleColumns {
            lat: rows.iter().map(|r| r[0]).collect(),
            lng: rows.iter().map(|r| r[1]).collect(),
            cost: rows.iter().map(|r| r[2]).collect(),
            rows_read: rows.len(),
        }
    }

    #[test]
    fn regression_matrix_layout() {
        let terms = power_set(1).unwrap();
        let x = regression_matrix(&terms, &[2.0, 5.0], &[3.0, 7.0]).unwrap();
        assert_eq!(x.shape(), (2, 3));
        assert_eq!(x.row(0).iter().copied().collect::<Vec<_>>(), vec![1.0, 3.0, 2.0]);
        assert_eq!(x.row(1).iter().copied().collect::<Vec<_>>(), vec![1.0, 7.0, 5.0]);
    }

    #[test]
    fn recovers_exact_quadratic_surface() {
        // cost = 4 - lng + 0.5*lat + 2*lng^2 - lat*lng + 3*lat^2
        let truth = PolySurface {
            order: 2,
            terms: power_set(2).unwrap(),
            coefficients: vec![4.0, -1.0, 0.5, 2.0, -1.0, 3.0],
        };
        let mut rows = Vec::new();
        for i in 0..6 {
            for j in 0..5 {
                let lat = -1.0 + 0.4 * i as f64;
                let lng = 0.5 * j as f64;
                rows.push([lat, lng, predict(&truth, lat, lng)]);
            }
        }

        let (surface, quality) = fit_surface(&columns(&rows), 2).unwrap();
        assert_eq!(quality.rank, 6);
        assert!(!quality.is_rank_deficient());
        assert!(quality.rmse < 1e-9);
        for (a, b) in surface.coefficients.iter().zip(&truth.coefficients) {
            assert!((a - b).abs() < 1e-8, "coefficient {a} != {b}");
        }
    }

    #[test]
    fn order_zero_fits_the_mean() {
        let rows = [[0.0, 0.0, 1.0], [3.0, 1.0, 2.0], [1.0, 9.0, 6.0]];
        let (surface, quality) = fit_surface(&columns(&rows), 0).unwrap();
        assert_eq!(surface.coefficients.len(), 1);
        assert!((surface.coefficients[0] - 3.0).abs() < 1e-12);
        assert!((quality.sse - 14.0).abs() < 1e-9);
    }

    #[test]
    fn too_few_samples_is_rank_deficient_not_an_error() {
        let rows = [[0.0, 0.0, 1.0], [1.0, 1.0, 2.0]];
        let (surface, quality) = fit_surface(&columns(&rows), 2).unwrap();
        assert_eq!(quality.term_count, 6);
        assert!(quality.is_rank_deficient());
        assert!(surface.coefficients.iter().all(|c| c.is_finite()));
        // The minimum-norm fit still interpolates the samples.
        for r in rows {
            assert!((predict(&surface, r[0], r[1]) - r[2]).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_columns_are_rejected() {
        let err = fit_surface(&columns(&[]), 1).unwrap_err();
        assert_eq!(err, EstimateError::EmptyDataset { rows_read: 0 });
    }

    #[test]
    fn overflowing_powers_are_a_non_finite_fit() {
        // Finite inputs, but lat^2 overflows at order 2.
        let rows = [
            [1e200, 0.0, 1.0],
            [2e200, 1.0, 2.0],
            [3e200, 2.0, 3.0],
            [0.0, 3.0, 4.0],
        ];
        assert_eq!(fit_surface(&columns(&rows), 2).unwrap_err(), EstimateError::NonFiniteFit);
    }
}
