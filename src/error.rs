//! Error types.
//!
//! - `ScoreError`: typed failures of the pure scoring core.
//! - `AppError`: application-boundary error carrying a process exit code.
//!
//! Exit codes:
//! - 2: bad input, config, or file
//! - 3: no usable rows after ingest
//! - 4: upstream service failure
//! - 5: core validation failure

use thiserror::Error;

/// Failures reported by the scoring core.
///
/// Every core function either returns a fully computed value or one of these;
/// nothing is clamped or partially computed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("risk score {0} is outside [0, 1]")]
    RiskScoreOutOfRange(f64),

    #[error("{field} must be a finite non-negative amount, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("tenor must be a positive number of months")]
    ZeroTenor,

    #[error("cannot parse tenor from schedule label '{0}'")]
    InvalidTenorLabel(String),

    #[error("allocation target list is empty")]
    EmptyAllocation,

    #[error("allocation percentage for {product} must be within [0, {remaining}], got {value}")]
    InvalidPercentage {
        product: String,
        value: f64,
        remaining: f64,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
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

impl From<ScoreError> for AppError {
    fn from(err: ScoreError) -> Self {
        AppError::new(5, err.to_string())
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
