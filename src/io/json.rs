//! JSON inputs and outputs.
//!
//! Inputs:
//! - portfolio files: an array of `PortfolioInput`
//! - factor files: an array of `FeatureContribution`
//! - applicant financials: a single scoring-service request body
//!
//! Outputs are pretty-printed reports (`write_json`).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{ApplicantFinancials, FeatureContribution, PortfolioInput};
use crate::error::AppError;

pub fn read_portfolios(path: &Path) -> Result<Vec<PortfolioInput>, AppError> {
    let portfolios: Vec<PortfolioInput> = read_json(path, "portfolio")?;
    if portfolios.is_empty() {
        return Err(AppError::new(3, "Portfolio file contains no portfolios."));
    }
    Ok(portfolios)
}

pub fn read_factors(path: &Path) -> Result<Vec<FeatureContribution>, AppError> {
    read_json(path, "factor")
}

pub fn read_financials(path: &Path) -> Result<ApplicantFinancials, AppError> {
    read_json(path, "applicant financials")
}

/// Write any serializable report as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::new(2, format!("Failed to write JSON '{}': {e}", path.display())))
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open {what} JSON '{}': {e}", path.display())))?;
    parse_json(file, what)
}

fn parse_json<T: DeserializeOwned, R: Read>(reader: R, what: &str) -> Result<T, AppError> {
    serde_json::from_reader(reader).map_err(|e| AppError::new(2, format!("Invalid {what} JSON: {e}")))
}
