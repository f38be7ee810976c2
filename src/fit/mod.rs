//! Surface fitting and resampling.
//!
//! Responsibilities:
//!
//! - fit a bivariate polynomial by least squares (`fitter`)
//! - evaluate the fit on a regular grid with cost clipping (`grid`)
//! - tie both together behind `estimate` (`isograph`)

pub mod fitter;
pub mod grid;
pub mod isograph;

pub use fitter::*;
pub use grid::*;
pub use isograph::*;
