//! Synthetic cost samples on rays around an origin.
//!
//! Samples are placed every `step_m` metres along `directions` evenly spaced
//! compass bearings (0° = north, clockwise). Offsets are converted to degrees
//! with a spherical-earth approximation, which is plenty for city-scale radii.
//!
//! Cost is a linear function of distance plus seeded Gaussian noise, so the
//! same config always produces the same samples.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{RawRow, SampleValue};
use crate::error::EstimateError;

/// Mean earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone)]
pub struct RadialConfig {
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub directions: usize,
    pub steps: usize,
    pub step_m: f64,
    pub base_cost: f64,
    pub cost_per_km: f64,
    pub noise_sd: f64,
    pub seed: u64,
}

/// Move `distance_m` metres from `origin` (lat, lng) along `bearing_deg`.
pub fn find_coordinate(origin: (f64, f64), distance_m: f64, bearing_deg: f64) -> (f64, f64) {
    let bearing = bearing_deg.to_radians();
    let north_m = distance_m.abs() * bearing.cos();
    let east_m = distance_m.abs() * bearing.sin();

    let (lat, lng) = origin;
    let d_lat = (north_m / EARTH_RADIUS_M).to_degrees();
    let d_lng = (east_m / EARTH_RADIUS_M).to_degrees() / lat.to_radians().cos();
    (lat + d_lat, lng + d_lng)
}

/// Generate `directions * steps` rows of `[lat, lng, cost]`.
///
/// Rows are ordered by direction, then by increasing distance.
pub fn radial_samples(config: &RadialConfig) -> Result<Vec<RawRow>, EstimateError> {
    if config.directions == 0 || config.steps == 0 {
        return Err(EstimateError::invalid("directions and steps must be >= 1"));
    }
    if !(config.step_m.is_finite() && config.step_m > 0.0) {
        return Err(EstimateError::invalid(format!(
            "step size must be > 0 metres, got {}",
            config.step_m
        )));
    }
    if !(config.origin_lat.is_finite() && config.origin_lat.abs() < 90.0 && config.origin_lng.is_finite()) {
        return Err(EstimateError::invalid(format!(
            "invalid origin ({}, {})",
            config.origin_lat, config.origin_lng
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise_sd)
        .map_err(|e| EstimateError::invalid(format!("noise distribution error: {e}")))?;

    let origin = (config.origin_lat, config.origin_lng);
    let mut rows = Vec::with_capacity(config.directions * config.steps);

    for d in 0..config.directions {
        let bearing = 360.0 / config.directions as f64 * d as f64;
        for s in 1..=config.steps {
            let distance_m = config.step_m * s as f64;
            let (lat, lng) = find_coordinate(origin, distance_m, bearing);
            let cost = config.base_cost + config.cost_per_km * distance_m / 1000.0 + noise.sample(&mut rng);
            rows.push(vec![
                Some(SampleValue::Number(lat)),
                Some(SampleValue::Number(lng)),
                Some(SampleValue::Number(cost.max(0.0))),
            ]);
        }
    }

    Ok(rows)
}
