//! Bivariate monomial basis.
//!
//! For a total order `N` the basis is every `lat^i * lng^j` with `i + j <= N`,
//! enumerated by total degree `n = 0..=N` and, within a degree, by increasing
//! latitude power:
//!
//! ```text
//! N = 2:  1, lng, lat, lng^2, lat*lng, lat^2
//! ```
//!
//! The enumeration is the only link between a coefficient and its term, so the
//! fitter and the resampler must both go through `power_set`.

use crate::domain::PowerTerm;
use crate::error::EstimateError;

/// Largest total order whose powers `powi` can take exactly.
pub const MAX_ORDER: u32 = i32::MAX as u32;

/// Number of terms for a given total order: `C(N + 2, 2)`.
///
/// `None` if the count does not fit in a `usize`.
pub fn term_count(order: u32) -> Option<usize> {
    let n = usize::try_from(order).ok()?;
    let a = n.checked_add(1)?;
    let b = n.checked_add(2)?;
    // One of two consecutive integers is even.
    if a % 2 == 0 {
        (a / 2).checked_mul(b)
    } else {
        a.checked_mul(b / 2)
    }
}

/// Enumerate the power set for `order`.
///
/// Fails with `InvalidInput` when the order exceeds [`MAX_ORDER`] or the term
/// list cannot be allocated.
pub fn power_set(order: u32) -> Result<Vec<PowerTerm>, EstimateError> {
    if order > MAX_ORDER {
        return Err(EstimateError::invalid(format!(
            "order {order} exceeds the maximum of {MAX_ORDER}"
        )));
    }
    let count = term_count(order).ok_or_else(|| {
        EstimateError::invalid(format!("order {order} has too many basis terms"))
    })?;
    let mut terms = Vec::new();
    terms.try_reserve_exact(count).map_err(|_| {
        EstimateError::invalid(format!("cannot allocate {count} basis terms for order {order}"))
    })?;
    for n in 0..=order {
        for lat_power in 0..=n {
            terms.push(PowerTerm {
                lat_power,
                lng_power: n - lat_power,
            });
        }
    }
    Ok(terms)
}

/// Fill one regression/evaluation row for the point `(lat, lng)`.
///
/// `out` must be as long as `terms`; debug builds assert it.
pub fn fill_basis_row(terms: &[PowerTerm], lat: f64, lng: f64, out: &mut [f64]) {
    debug_assert_eq!(out.len(), terms.len(), "basis row length mismatch");
    for (slot, term) in out.iter_mut().zip(terms) {
        *slot = pow(lat, term.lat_power) * pow(lng, term.lng_power);
    }
}

fn pow(base: f64, exp: u32) -> f64 {
    match i32::try_from(exp) {
        Ok(e) => base.powi(e),
        Err(_) => base.powf(f64::from(exp)),
    }
}
