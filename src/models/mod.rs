//! Polynomial surface evaluation.
//!
//! Kept as small, pure functions so the fitter and the resampler share one
//! definition of "value of the surface at a point".

pub mod surface;

pub use surface::*;
