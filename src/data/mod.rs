//! Input data: cleaning raw request rows and generating synthetic samples.

pub mod prepare;
pub mod radial;

pub use prepare::*;
pub use radial::*;
