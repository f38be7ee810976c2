//! Runtime settings from the environment.
//!
//! An optional `.env` file is loaded first, so local overrides can live next to
//! the working directory without exporting anything.

use crate::error::AppError;

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_MAX_ORDER: u32 = 12;
pub const DEFAULT_MAX_DIM_SAMPLE_COUNT: usize = 2000;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Largest polynomial order a request may ask for.
    pub max_order: u32,
    /// Largest grid size per axis a request may ask for.
    pub max_dim_sample_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_order: DEFAULT_MAX_ORDER,
            max_dim_sample_count: DEFAULT_MAX_DIM_SAMPLE_COUNT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (testable without touching
    /// the process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            log_filter: lookup("ISOGRAPH_LOG").unwrap_or(defaults.log_filter),
            max_order: parse_var(&lookup, "ISOGRAPH_MAX_ORDER")?.unwrap_or(defaults.max_order),
            max_dim_sample_count: parse_var(&lookup, "ISOGRAPH_MAX_DIM_SAMPLE_COUNT")?
                .unwrap_or(defaults.max_dim_sample_count),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, AppError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::new(2, format!("Invalid {key}='{raw}' in environment (.env)."))),
    }
}
