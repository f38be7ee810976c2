//! Sample cleaning.
//!
//! Turns loosely typed `[lat, lng, cost]` rows into three aligned `f64` columns.
//!
//! Rules:
//! - every field is converted first; a value that is present but cannot be
//!   read as a finite number fails the whole request
//! - a row with any missing field (`null` or NaN) is dropped entirely
//! - surviving rows keep their relative order

use tracing::debug;

use crate::domain::{AxisRange, RawRow, SampleValue};
use crate::error::EstimateError;

/// Cleaned sample columns. All three vectors have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleColumns {
    pub lat: Vec<f64>,
    pub lng: Vec<f64>,
    pub cost: Vec<f64>,
    pub rows_read: usize,
}

impl SampleColumns {
    pub fn len(&self) -> usize {
        self.cost.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cost.is_empty()
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.len()
    }

    pub fn lat_range(&self) -> Option<AxisRange> {
        AxisRange::of(&self.lat)
    }

    pub fn lng_range(&self) -> Option<AxisRange> {
        AxisRange::of(&self.lng)
    }
}

/// Clean raw rows into columns, failing on unreadable values or an empty result.
pub fn prepare_samples(rows: &[RawRow]) -> Result<SampleColumns, EstimateError> {
    let mut lat = Vec::with_capacity(rows.len());
    let mut lng = Vec::with_capacity(rows.len());
    let mut cost = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        if row.len() != 3 {
            return Err(EstimateError::invalid(format!(
                "sample row {idx} has {} fields; expected [lat, lng, cost]",
                row.len()
            )));
        }

        let mut values = [None; 3];
        for (slot, field) in values.iter_mut().zip(row.iter()) {
            *slot = convert_field(field.as_ref()).map_err(|message| {
                EstimateError::invalid(format!("sample row {idx}: {message}"))
            })?;
        }

        match values {
            [Some(a), Some(b), Some(c)] => {
                lat.push(a);
                lng.push(b);
                cost.push(c);
            }
            _ => debug!(row = idx, "dropping incomplete sample row"),
        }
    }

    if cost.is_empty() {
        return Err(EstimateError::EmptyDataset {
            rows_read: rows.len(),
        });
    }

    Ok(SampleColumns {
        lat,
        lng,
        cost,
        rows_read: rows.len(),
    })
}

/// `Ok(None)` means missing; `Err` means present but unusable.
fn convert_field(field: Option<&SampleValue>) -> Result<Option<f64>, String> {
    let v = match field {
        None => return Ok(None),
        Some(SampleValue::Number(v)) => *v,
        Some(SampleValue::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{s}' is not a number"))?,
    };

    if v.is_nan() {
        Ok(None)
    } else if v.is_infinite() {
        Err(format!("{v} is not a finite number"))
    } else {
        Ok(Some(v))
    }
}
