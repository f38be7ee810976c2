//! Reporting utilities: formatted terminal summary of a run.
//!
//! Formatting lives here so the fitting code stays free of presentation, and
//! output changes stay localized.

use crate::domain::{EstimatePoint, Isograph, PowerTerm};

/// Summary statistics of the resampled costs.
#[derive(Debug, Clone, PartialEq)]
pub struct CostStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Grid points at exactly zero (mostly clipped negative estimates).
    pub zero_count: usize,
}

pub fn cost_stats(points: &[EstimatePoint]) -> Option<CostStats> {
    if points.is_empty() {
        return None;
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut zero_count = 0;
    for p in points {
        min = min.min(p.cost);
        max = max.max(p.cost);
        sum += p.cost;
        if p.cost == 0.0 {
            zero_count += 1;
        }
    }
    Some(CostStats {
        min,
        max,
        mean: sum / points.len() as f64,
        zero_count,
    })
}

/// Format the run summary (dataset + fit diagnostics + grid).
pub fn format_run_summary(iso: &Isograph) -> String {
    let q = &iso.quality;
    let mut out = String::new();

    out.push_str("=== isograph - polynomial cost surface ===\n");
    out.push_str(&format!(
        "Samples: {} read, {} used, {} dropped\n",
        iso.rows_read,
        q.n,
        iso.rows_read.saturating_sub(q.n)
    ));
    out.push_str(&format!(
        "Extent: lat=[{:.6}, {:.6}] lng=[{:.6}, {:.6}]\n",
        iso.lat_range.min, iso.lat_range.max, iso.lng_range.min, iso.lng_range.max
    ));
    out.push_str(&format!(
        "Fit: order {} ({} terms), rank {}, RMSE {:.4}, SSE {:.4}\n",
        iso.surface.order, q.term_count, q.rank, q.rmse, q.sse
    ));
    if q.is_rank_deficient() {
        out.push_str("Note: rank-deficient fit; coefficients are the minimum-norm solution.\n");
    }
    out.push_str(&format!("Surface: {}\n", format_polynomial(&iso.surface.terms, &iso.surface.coefficients)));

    out.push_str(&format!(
        "Grid: {0}x{0} = {1} points",
        iso.dim_sample_count,
        iso.points.len()
    ));
    if let Some(stats) = cost_stats(&iso.points) {
        out.push_str(&format!(
            " | cost min {:.2} / mean {:.2} / max {:.2} | at zero: {}",
            stats.min, stats.mean, stats.max, stats.zero_count
        ));
    }
    out.push('\n');
    out
}

/// Human-readable polynomial, e.g. `1.500000 + 2.000000*lng - 0.250000*lat^2`.
pub fn format_polynomial(terms: &[PowerTerm], coefficients: &[f64]) -> String {
    let mut out = String::new();
    for (i, (term, &c)) in terms.iter().zip(coefficients).enumerate() {
        let monomial = format_monomial(term);
        let magnitude = format!("{:.6}", c.abs());
        let body = if monomial.is_empty() {
            magnitude
        } else {
            format!("{magnitude}*{monomial}")
        };
        if i == 0 {
            if c < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if c < 0.0 { " - " } else { " + " });
        }
        out.push_str(&body);
    }
    out
}

fn format_monomial(term: &PowerTerm) -> String {
    let factor = |name: &str, power: u32| match power {
        0 => None,
        1 => Some(name.to_string()),
        p => Some(format!("{name}^{p}")),
    };
    [factor("lat", term.lat_power), factor("lng", term.lng_power)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("*")
}
