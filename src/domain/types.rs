//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - decoded straight from an estimation request body
//! - used in-memory during fitting and resampling
//! - written back out as JSON/CSV and reloaded later for plotting

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Sample file format.
///
/// `Auto` picks CSV for `*.csv` paths and JSON otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Auto,
    /// A request body (`{"cost_samples": ..}`) or a bare array of rows.
    Json,
    /// Header `lat,lng,cost`; empty cells are missing values.
    Csv,
}

/// A single field of a raw sample row as it arrives on the wire.
///
/// Requests are loosely typed: numbers usually arrive as JSON numbers, but
/// numeric strings (`"41.2"`) are accepted too. `null` is modelled one level up
/// as `Option<SampleValue>::None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleValue {
    Number(f64),
    Text(String),
}

/// One `[lat, lng, cost]` record before cleaning. Any field may be missing.
pub type RawRow = Vec<Option<SampleValue>>;

/// Request body accepted by the estimation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub cost_samples: Vec<RawRow>,
    pub order: i64,
    pub dim_sample_count: i64,
}

/// Response body: the resampled surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub estimates: Vec<EstimatePoint>,
}

/// One resampled grid point. Serialized as `[lng, lat, cost]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct EstimatePoint {
    pub lng: f64,
    pub lat: f64,
    pub cost: f64,
}

impl From<[f64; 3]> for EstimatePoint {
    fn from([lng, lat, cost]: [f64; 3]) -> Self {
        Self { lng, lat, cost }
    }
}

impl From<EstimatePoint> for [f64; 3] {
    fn from(p: EstimatePoint) -> Self {
        [p.lng, p.lat, p.cost]
    }
}

/// Exponents of one basis term `lat^lat_power * lng^lng_power`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerTerm {
    pub lat_power: u32,
    pub lng_power: u32,
}

impl PowerTerm {
    pub fn degree(&self) -> u32 {
        self.lat_power + self.lng_power
    }
}

/// Closed interval of observed coordinate values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Range of a non-empty slice of finite values.
    pub fn of(values: &[f64]) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() && max.is_finite() {
            Some(Self { min, max })
        } else {
            None
        }
    }
}

/// A fitted polynomial surface.
///
/// `coefficients[i]` multiplies `terms[i]`; the two vectors always come from the
/// same power-set enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolySurface {
    pub order: u32,
    pub terms: Vec<PowerTerm>,
    pub coefficients: Vec<f64>,
}

/// Fit diagnostics reported alongside the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// Samples in the regression.
    pub n: usize,
    /// Basis terms (columns).
    pub term_count: usize,
    /// Numerical rank of the regression matrix.
    pub rank: usize,
    pub sse: f64,
    pub rmse: f64,
}

impl FitQuality {
    /// Fewer independent samples than terms; the coefficients are the
    /// minimum-norm solution and not unique.
    pub fn is_rank_deficient(&self) -> bool {
        self.rank < self.term_count
    }
}

/// Everything computed for one estimation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Isograph {
    /// Rows received before cleaning; `quality.n` rows survived.
    pub rows_read: usize,
    pub surface: PolySurface,
    pub quality: FitQuality,
    pub lat_range: AxisRange,
    pub lng_range: AxisRange,
    pub dim_sample_count: usize,
    pub points: Vec<EstimatePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_numbers_strings_and_nulls() {
        let body = r#"{
            "cost_samples": [[1.5, "2.5", null], [0, 1, 2]],
            "order": 2,
            "dim_sample_count": 10
        }"#;
        let req: EstimateRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.cost_samples.len(), 2);
        assert_eq!(req.cost_samples[0][0], Some(SampleValue::Number(1.5)));
        assert_eq!(req.cost_samples[0][1], Some(SampleValue::Text("2.5".to_string())));
        assert_eq!(req.cost_samples[0][2], None);
        assert_eq!(req.order, 2);
    }

    #[test]
    fn estimate_point_serializes_as_lng_lat_cost() {
        let resp = EstimateResponse {
            estimates: vec![EstimatePoint { lng: 1.0, lat: 2.0, cost: 3.0 }],
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"estimates":[[1.0,2.0,3.0]]}"#);
    }

    #[test]
    fn axis_range_of_empty_is_none() {
        assert!(AxisRange::of(&[]).is_none());
        let r = AxisRange::of(&[3.0, -1.0, 2.0]).unwrap();
        assert_eq!((r.min, r.max), (-1.0, 3.0));
    }
}
