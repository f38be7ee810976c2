//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - wire types (`EstimateRequest`, `EstimateResponse`, `EstimatePoint`)
//! - raw sample rows (`RawRow`, `SampleValue`)
//! - fit outputs (`PolySurface`, `FitQuality`, `Isograph`)

pub mod types;

pub use types::*;
