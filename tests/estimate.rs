//! End-to-end behaviour of `estimate` as seen by a calling service.

use std::time::{Duration, Instant};

use isograph::domain::{EstimatePoint, RawRow, SampleValue};
use isograph::math::power_set;
use isograph::{EstimateError, estimate, generate_isograph};

fn rows(data: &[[f64; 3]]) -> Vec<RawRow> {
    data.iter()
        .map(|r| r.iter().map(|&v| Some(SampleValue::Number(v))).collect())
        .collect()
}

/// A bumpy surface sampled on a jittered 7x7 patch, with some negative costs.
fn bumpy_samples() -> Vec<RawRow> {
    let mut data = Vec::new();
    for i in 0..7 {
        for j in 0..7 {
            let lat = 43.60 + 0.01 * i as f64 + 0.0007 * ((i * j) % 3) as f64;
            let lng = -79.40 + 0.012 * j as f64;
            let x = (lat - 43.63) * 100.0;
            let y = (lng + 79.36) * 100.0;
            let cost = 3.0 * x * x - 2.0 * x * y + y - 4.0 + (i as f64 * 1.7 + j as f64).sin();
            data.push([lat, lng, cost]);
        }
    }
    rows(&data)
}

#[test]
fn scenario_a_planar_corners_are_reproduced() {
    let samples = rows(&[[0.0, 0.0, 1.0], [0.0, 1.0, 2.0], [1.0, 0.0, 3.0], [1.0, 1.0, 4.0]]);
    let points = estimate(&samples, 1, 2).unwrap();

    assert_eq!(points.len(), 4);
    let mut corners: Vec<(f64, f64)> = points.iter().map(|p| (p.lng, p.lat)).collect();
    corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(corners, vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);

    for p in &points {
        let expected = 1.0 + p.lng + 2.0 * p.lat;
        assert!((p.cost - expected).abs() < 1e-9, "{p:?} expected {expected}");
    }
}

#[test]
fn scenario_b_rows_with_missing_values_are_ignored() {
    let clean = bumpy_samples();
    let mut dirty = clean.clone();
    dirty.insert(3, vec![Some(SampleValue::Number(43.0)), Some(SampleValue::Number(-79.0)), None]);
    dirty.push(vec![None, Some(SampleValue::Number(-79.0)), Some(SampleValue::Number(1e6))]);

    let a = estimate(&clean, 2, 6).unwrap();
    let b = estimate(&dirty, 2, 6).unwrap();
    assert!(b.iter().all(|p| p.cost.is_finite() && p.lat.is_finite() && p.lng.is_finite()));
    assert_eq!(a, b);
}

#[test]
fn scenario_c_invalid_parameters() {
    let samples = bumpy_samples();
    assert!(matches!(estimate(&samples, -1, 5), Err(EstimateError::InvalidInput(_))));
    assert!(matches!(estimate(&samples, 2, 0), Err(EstimateError::InvalidInput(_))));
    assert!(matches!(estimate(&samples, 2, -3), Err(EstimateError::InvalidInput(_))));
}

#[test]
fn scenario_d_all_rows_invalid_is_empty_dataset() {
    let samples: Vec<RawRow> = vec![
        vec![None, Some(SampleValue::Number(1.0)), Some(SampleValue::Number(2.0))],
        vec![Some(SampleValue::Number(1.0)), None, Some(SampleValue::Number(2.0))],
    ];
    assert_eq!(
        estimate(&samples, 1, 3).unwrap_err(),
        EstimateError::EmptyDataset { rows_read: 2 }
    );
}

#[test]
fn output_length_and_non_negative_costs() {
    let samples = bumpy_samples();
    for order in 0..=5 {
        for dim in 1..=7 {
            let points = estimate(&samples, order, dim).unwrap();
            assert_eq!(points.len(), (dim * dim) as usize);
            assert!(points.iter().all(|p| p.cost >= 0.0), "negative cost at order {order}");
        }
    }
}

#[test]
fn negative_fit_is_clipped_everywhere() {
    let samples = rows(&[[0.0, 0.0, -5.0], [1.0, 2.0, -1.0], [2.0, 1.0, -3.0]]);
    let points = estimate(&samples, 0, 4).unwrap();
    assert!(points.iter().all(|p| p.cost == 0.0));
}

#[test]
fn repeated_calls_are_identical() {
    let samples = bumpy_samples();
    let a = estimate(&samples, 3, 9).unwrap();
    let b = estimate(&samples, 3, 9).unwrap();
    let bits = |v: &[EstimatePoint]| -> Vec<[u64; 3]> {
        v.iter()
            .map(|p| [p.lng.to_bits(), p.lat.to_bits(), p.cost.to_bits()])
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn order_zero_is_the_mean_cost() {
    let data = [[1.0, 1.0, 2.0], [2.0, 3.0, 4.0], [5.0, 2.0, 9.0], [3.0, 3.0, 1.0]];
    let points = estimate(&rows(&data), 0, 3).unwrap();
    for p in points {
        assert!((p.cost - 4.0).abs() < 1e-12);
    }
}

#[test]
fn grid_spans_observed_extent() {
    let samples = bumpy_samples();
    let iso = generate_isograph(&samples, 2, 5).unwrap();

    let first = iso.points[0];
    let last = iso.points[iso.points.len() - 1];
    assert_eq!((first.lat, first.lng), (iso.lat_range.min, iso.lng_range.min));
    assert_eq!((last.lat, last.lng), (iso.lat_range.max, iso.lng_range.max));
    assert_eq!(iso.surface.terms, power_set(2).unwrap());
    assert_eq!(iso.surface.coefficients.len(), 6);
}

#[test]
fn single_sample_grid_sits_at_the_minimum() {
    let samples = rows(&[[1.0, 5.0, 2.0], [3.0, 4.0, 6.0], [2.0, 9.0, 4.0]]);
    let points = estimate(&samples, 1, 1).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!((points[0].lat, points[0].lng), (1.0, 4.0));
}

#[test]
fn underdetermined_fit_still_returns_a_surface() {
    // Three samples cannot pin down ten cubic terms.
    let samples = rows(&[[0.0, 0.0, 1.0], [1.0, 0.5, 2.0], [0.5, 1.0, 3.0]]);
    let iso = generate_isograph(&samples, 3, 4).unwrap();
    assert!(iso.quality.is_rank_deficient());
    assert_eq!(iso.points.len(), 16);
    assert!(iso.points.iter().all(|p| p.cost.is_finite() && p.cost >= 0.0));
}

#[test]
fn overflowing_coordinates_fail_fast_with_non_finite_fit() {
    // lat^2 overflows f64 at order 2; the solver must not be handed infinities.
    let samples = rows(&[[1e200, 0.0, 1.0], [2e200, 1.0, 2.0], [3e200, 2.0, 3.0], [0.0, 3.0, 4.0]]);
    let started = Instant::now();
    assert_eq!(estimate(&samples, 2, 2), Err(EstimateError::NonFiniteFit));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn oversized_order_is_invalid_input() {
    let samples = bumpy_samples();
    for order in [i64::from(i32::MAX), i64::from(i32::MAX) + 1, i64::from(u32::MAX), i64::MAX] {
        assert!(
            matches!(estimate(&samples, order, 1), Err(EstimateError::InvalidInput(_))),
            "order {order}"
        );
    }
}

#[test]
fn oversized_grid_is_invalid_input() {
    let samples = bumpy_samples();
    for dim in [1_i64 << 31, 1 << 32, i64::MAX] {
        assert!(
            matches!(estimate(&samples, 1, dim), Err(EstimateError::InvalidInput(_))),
            "dim_sample_count {dim}"
        );
    }
}
