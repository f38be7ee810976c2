//! Read/write estimate JSON files.
//!
//! The file is exactly the service response body, `{"estimates": [[lng, lat, cost], ...]}`,
//! so saved runs and live responses can be plotted the same way.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::EstimateResponse;
use crate::error::AppError;

/// Serialize a response body to any writer.
pub fn write_estimates(writer: impl Write, response: &EstimateResponse, pretty: bool) -> Result<(), AppError> {
    let result = if pretty {
        serde_json::to_writer_pretty(writer, response)
    } else {
        serde_json::to_writer(writer, response)
    };
    result.map_err(|e| AppError::new(2, format!("Failed to write estimates JSON: {e}")))
}

/// Write a response body to a file.
pub fn write_estimates_json(path: &Path, response: &EstimateResponse, pretty: bool) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create estimates JSON '{}': {e}", path.display())))?;
    write_estimates(file, response, pretty)
}

/// Read a response body from a file.
pub fn read_estimates_json(path: &Path) -> Result<EstimateResponse, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open estimates JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid estimates JSON: {e}")))
}
