//! Least squares solver.
//!
//! We solve `minimize ||y - X β||²` for a tall (or, with few samples, wide)
//! design matrix.
//!
//! Implementation choices:
//! - SVD rather than normal equations: forming `XᵀX` squares the condition
//!   number, and high-order monomial bases are badly conditioned already.
//! - Singular values below `σ_max · max(m, n) · ε` are treated as zero, which
//!   yields the minimum-norm solution when `X` is rank-deficient instead of
//!   failing. The numerical rank is reported so callers can surface it.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - The SVD runs with an iteration cap. Nalgebra's plain `svd()` iterates
//!   until convergence, which never comes for non-finite input.

use nalgebra::{DMatrix, DVector};

/// Upper bound on SVD sweeps per dimension of the matrix.
const SVD_ITERATIONS_PER_DIM: usize = 100;

/// Solution of a least squares problem.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub beta: DVector<f64>,
    /// Number of singular values above the cutoff.
    pub rank: usize,
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if `x` is empty, the shapes disagree, an input entry is not
/// finite, the SVD fails to converge, or the solution is not finite.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<LeastSquares> {
    if x.nrows() == 0 || x.ncols() == 0 || x.nrows() != y.len() {
        return None;
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }

    let max_niter = x.nrows().max(x.ncols()).saturating_mul(SVD_ITERATIONS_PER_DIM);
    let svd = x.clone().try_svd(true, true, f64::EPSILON, max_niter)?;

    let sigma_max = svd.singular_values.max();
    let cutoff = sigma_max * x.nrows().max(x.ncols()) as f64 * f64::EPSILON;
    let rank = svd.singular_values.iter().filter(|&&s| s > cutoff).count();

    let beta = svd.solve(y, cutoff).ok()?;
    if beta.iter().all(|v| v.is_finite()) {
        Some(LeastSquares { beta, rank })
    } else {
        None
    }
}
