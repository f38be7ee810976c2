//! ASCII heat map for terminal output.
//!
//! This is intentionally "dumb" (fixed-size character grid), optimized for:
//! - quick visual sanity checks of a fitted isograph
//! - deterministic output (helpful for golden tests)
//!
//! Rows are latitude (max at the top), columns are longitude (min at the
//! left). Each cell shows the nearest grid estimate, shaded by cost from
//! `' '` (cheapest) to `'@'` (most expensive).

use crate::domain::EstimatePoint;

const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Render a heat map of a resampled grid.
pub fn render_heatmap(points: &[EstimatePoint], width: usize, height: usize) -> String {
    let width = width.max(2);
    let height = height.max(2);

    let Some(grid) = CostGrid::from_points(points) else {
        return "Heat map: (no estimates)\n".to_string();
    };

    let (c_min, c_max) = grid.cost_range();
    let (lng_min, lng_max) = (grid.lngs[0], grid.lngs[grid.lngs.len() - 1]);
    let (lat_min, lat_max) = (grid.lats[0], grid.lats[grid.lats.len() - 1]);

    let mut out = String::new();
    out.push_str(&format!(
        "Heat map: lng=[{lng_min:.5}, {lng_max:.5}] | lat=[{lat_min:.5}, {lat_max:.5}] | cost=[{c_min:.2}, {c_max:.2}]\n"
    ));

    for r in 0..height {
        let v = 1.0 - r as f64 / (height as f64 - 1.0);
        let lat_idx = nearest(&grid.lats, lat_min + v * (lat_max - lat_min));
        let row: String = (0..width)
            .map(|c| {
                let u = c as f64 / (width as f64 - 1.0);
                let lng_idx = nearest(&grid.lngs, lng_min + u * (lng_max - lng_min));
                grid.cost(lat_idx, lng_idx)
                    .map(|cost| shade(cost, c_min, c_max))
                    .unwrap_or(' ')
            })
            .collect();
        out.push_str(&row);
        out.push('\n');
    }

    out
}

/// Estimates re-indexed by their (sorted, de-duplicated) axis values.
struct CostGrid {
    lats: Vec<f64>,
    lngs: Vec<f64>,
    costs: Vec<Option<f64>>,
}

impl CostGrid {
    fn from_points(points: &[EstimatePoint]) -> Option<Self> {
        let lats = sorted_unique(points.iter().map(|p| p.lat));
        let lngs = sorted_unique(points.iter().map(|p| p.lng));
        if lats.is_empty() || lngs.is_empty() {
            return None;
        }

        let mut costs = vec![None; lats.len() * lngs.len()];
        for p in points {
            let i = lats.binary_search_by(|v| v.total_cmp(&p.lat)).ok()?;
            let j = lngs.binary_search_by(|v| v.total_cmp(&p.lng)).ok()?;
            costs[i * lngs.len() + j] = Some(p.cost);
        }
        Some(Self { lats, lngs, costs })
    }

    fn cost(&self, lat_idx: usize, lng_idx: usize) -> Option<f64> {
        self.costs[lat_idx * self.lngs.len() + lng_idx]
    }

    fn cost_range(&self) -> (f64, f64) {
        self.costs.iter().flatten().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
            (lo.min(c), hi.max(c))
        })
    }
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.filter(|x| x.is_finite()).collect();
    v.sort_by(|a, b| a.total_cmp(b));
    v.dedup();
    v
}

fn nearest(axis: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &a) in axis.iter().enumerate() {
        let d = (a - value).abs();
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

fn shade(cost: f64, c_min: f64, c_max: f64) -> char {
    let span = c_max - c_min;
    let t = if span > 1e-12 {
        ((cost - c_min) / span).clamp(0.0, 1.0)
    } else {
        0.5
    };
    RAMP[(t * (RAMP.len() as f64 - 1.0)).round() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x2() -> Vec<EstimatePoint> {
        vec![
            EstimatePoint { lng: 0.0, lat: 0.0, cost: 0.0 },
            EstimatePoint { lng: 1.0, lat: 0.0, cost: 1.0 },
            EstimatePoint { lng: 0.0, lat: 1.0, cost: 2.0 },
            EstimatePoint { lng: 1.0, lat: 1.0, cost: 3.0 },
        ]
    }

    #[test]
    fn heatmap_golden_snapshot_small() {
        let txt = render_heatmap(&grid_2x2(), 4, 2);
        let expected = concat!(
            "Heat map: lng=[0.00000, 1.00000] | lat=[0.00000, 1.00000] | cost=[0.00, 3.00]\n",
            "**@@\n",
            "  --\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn point_order_does_not_matter() {
        let mut reversed = grid_2x2();
        reversed.reverse();
        assert_eq!(render_heatmap(&reversed, 8, 4), render_heatmap(&grid_2x2(), 8, 4));
    }

    #[test]
    fn flat_and_empty_grids() {
        let flat = vec![EstimatePoint { lng: 5.0, lat: 5.0, cost: 2.0 }];
        let txt = render_heatmap(&flat, 3, 2);
        assert!(txt.ends_with("+++\n+++\n"));

        assert_eq!(render_heatmap(&[], 10, 5), "Heat map: (no estimates)\n");
    }
}
