//! Input/output helpers.
//!
//! - sample ingest from JSON request bodies or CSV (`ingest`)
//! - estimate CSV export (`export`)
//! - estimate JSON read/write (`estimates`)

pub mod estimates;
pub mod export;
pub mod ingest;

pub use estimates::*;
pub use export::*;
pub use ingest::*;
