//! Sample ingest.
//!
//! Turns a JSON request body or a `lat,lng,cost` CSV into raw rows for the
//! estimator. Values are *not* converted here: empty CSV cells become missing
//! fields and everything else is handed over as text, so cleaning rules live in
//! exactly one place (`data::prepare`).

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;

use crate::domain::{InputFormat, RawRow, SampleValue};
use crate::error::AppError;

const LAT_HEADERS: &[&str] = &["lat", "latitude"];
const LNG_HEADERS: &[&str] = &["lng", "lon", "long", "longitude"];
const COST_HEADERS: &[&str] = &["cost"];

/// Rows plus whatever request parameters the input carried.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleInput {
    pub rows: Vec<RawRow>,
    pub order: Option<i64>,
    pub dim_sample_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Request {
        cost_samples: Vec<RawRow>,
        #[serde(default)]
        order: Option<i64>,
        #[serde(default)]
        dim_sample_count: Option<i64>,
    },
    Rows(Vec<RawRow>),
}

/// Load samples from `path` (`-` reads stdin).
pub fn load_samples(path: &Path, format: InputFormat) -> Result<SampleInput, AppError> {
    let format = resolve_format(path, format);
    let label = path.display().to_string();

    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AppError::new(2, format!("Failed to read samples from stdin: {e}")))?;
        return parse_input(text.as_bytes(), format, &label);
    }

    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open samples '{label}': {e}")))?;
    parse_input(file, format, &label)
}

fn parse_input(reader: impl Read, format: InputFormat, label: &str) -> Result<SampleInput, AppError> {
    match format {
        InputFormat::Csv => parse_csv_samples(reader, label),
        InputFormat::Json | InputFormat::Auto => parse_json_samples(reader, label),
    }
}

fn resolve_format(path: &Path, format: InputFormat) -> InputFormat {
    match format {
        InputFormat::Auto => {
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if is_csv { InputFormat::Csv } else { InputFormat::Json }
        }
        other => other,
    }
}

/// Parse a request body or a bare `[[lat, lng, cost], ...]` array.
pub fn parse_json_samples(reader: impl Read, label: &str) -> Result<SampleInput, AppError> {
    let input: JsonInput = serde_json::from_reader(reader)
        .map_err(|e| AppError::new(2, format!("Invalid sample JSON '{label}': {e}")))?;

    Ok(match input {
        JsonInput::Request {
            cost_samples,
            order,
            dim_sample_count,
        } => SampleInput {
            rows: cost_samples,
            order,
            dim_sample_count,
        },
        JsonInput::Rows(rows) => SampleInput {
            rows,
            order: None,
            dim_sample_count: None,
        },
    })
}

/// Parse a CSV with latitude, longitude and cost columns (any order).
pub fn parse_csv_samples(reader: impl Read, label: &str) -> Result<SampleInput, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers in '{label}': {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let lat_idx = find_column(&header_map, LAT_HEADERS)?;
    let lng_idx = find_column(&header_map, LNG_HEADERS)?;
    let cost_idx = find_column(&header_map, COST_HEADERS)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; CSV lines are 1-based.
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::new(2, format!("CSV parse error in '{label}' line {line}: {e}")))?;

        rows.push(vec![
            cell(&record, lat_idx),
            cell(&record, lng_idx),
            cell(&record, cost_idx),
        ]);
    }

    Ok(SampleInput {
        rows,
        order: None,
        dim_sample_count: None,
    })
}

fn cell(record: &StringRecord, idx: usize) -> Option<SampleValue> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .map(|s| SampleValue::Text(s.to_string()))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn find_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Result<usize, AppError> {
    aliases
        .iter()
        .find_map(|a| header_map.get(*a).copied())
        .ok_or_else(|| {
            AppError::new(
                2,
                format!("Missing required CSV column: `{}`", aliases.join("` / `")),
            )
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn json_request_body_with_parameters() {
        let body = r#"{"cost_samples": [[0, 0, 1], [0, 1, null]], "order": 1, "dim_sample_count": 2}"#;
        let input = parse_json_samples(body.as_bytes(), "test").unwrap();
        assert_eq!(input.rows.len(), 2);
        assert_eq!(input.rows[1][2], None);
        assert_eq!(input.order, Some(1));
        assert_eq!(input.dim_sample_count, Some(2));
    }

    #[test]
    fn json_bare_rows() {
        let input = parse_json_samples("[[1, 2, 3]]".as_bytes(), "test").unwrap();
        assert_eq!(input.rows, vec![vec![
            Some(SampleValue::Number(1.0)),
            Some(SampleValue::Number(2.0)),
            Some(SampleValue::Number(3.0)),
        ]]);
        assert_eq!(input.order, None);
    }

    #[test]
    fn json_schema_errors_exit_2() {
        let err = parse_json_samples(r#"{"order": 1}"#.as_bytes(), "test").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn csv_aliases_bom_and_empty_cells() {
        let csv = "\u{feff}Cost,Longitude,Latitude,note\n5,-79.4,43.6,a\n,-79.5,43.7,b\n";
        let input = parse_csv_samples(csv.as_bytes(), "test").unwrap();
        assert_eq!(input.rows.len(), 2);
        assert_eq!(input.rows[0], vec![
            Some(SampleValue::Text("43.6".to_string())),
            Some(SampleValue::Text("-79.4".to_string())),
            Some(SampleValue::Text("5".to_string())),
        ]);
        assert_eq!(input.rows[1][2], None);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let err = parse_csv_samples("lat,cost\n1,2\n".as_bytes(), "test").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("lng"));
    }

    #[test]
    fn load_samples_picks_csv_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "lat,lng,cost").unwrap();
        writeln!(f, "1,2,3").unwrap();
        drop(f);

        let input = load_samples(&path, InputFormat::Auto).unwrap();
        assert_eq!(input.rows.len(), 1);
    }
}
