//! Error types.
//!
//! Two layers:
//!
//! - `EstimateError`: typed failures of the core `estimate` operation
//! - `AppError`: what the binary reports (message + process exit code)
//!
//! Exit codes:
//! - 2 invalid input, config, or IO
//! - 3 empty dataset after cleaning
//! - 4 numerical failure

use thiserror::Error;

/// Failures of the fit + resample core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// Malformed or out-of-range parameters, or unparseable sample values.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Every row was dropped during cleaning.
    #[error("no valid samples remain after cleaning ({rows_read} rows read)")]
    EmptyDataset { rows_read: usize },

    /// The solved coefficients (or the evaluated grid) overflowed.
    #[error("polynomial fit produced non-finite values")]
    NonFiniteFit,
}

impl EstimateError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        let exit_code = match err {
            EstimateError::InvalidInput(_) => 2,
            EstimateError::EmptyDataset { .. } => 3,
            EstimateError::NonFiniteFit => 4,
        };
        Self::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
