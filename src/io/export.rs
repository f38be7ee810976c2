//! Export resampled estimates to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or GIS tools.

use std::fs::File;
use std::path::Path;

use crate::domain::EstimatePoint;
use crate::error::AppError;

/// Write `lng,lat,cost` rows to a CSV file.
pub fn write_estimates_csv(path: &Path, points: &[EstimatePoint]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["lng", "lat", "cost"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for p in points {
        writer
            .write_record([p.lng.to_string(), p.lat.to_string(), p.cost.to_string()])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
