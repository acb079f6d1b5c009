//! CSV ingest of applicant books.
//!
//! Turns a heterogeneous applicant CSV into validated `Applicant` records.
//!
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **No derived values read from input**: `recommended_loan` columns are ignored

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{debug, warn};

use crate::domain::{Applicant, RiskScore};
use crate::error::AppError;

const REQUIRED_COLUMNS: [&str; 6] = ["id", "name", "age", "income", "risk_score", "repayment_schedule"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: valid applicants + row errors.
#[derive(Debug, Clone)]
pub struct IngestedApplicants {
    pub applicants: Vec<Applicant>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedApplicants {
    pub fn rows_used(&self) -> usize {
        self.applicants.len()
    }
}

/// Load an applicant CSV from disk.
pub fn load_applicants(path: &Path) -> Result<IngestedApplicants, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_applicants(file)
}

/// Parse an applicant CSV from any reader.
pub fn read_applicants<R: Read>(reader: R) -> Result<IngestedApplicants, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut applicants = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(applicant) => applicants.push(applicant),
            Err((id, message)) => {
                warn!("skipping CSV line {line}: {message}");
                row_errors.push(RowError { line, id, message });
            }
        }
    }

    if applicants.is_empty() {
        return Err(AppError::new(3, "No valid applicant rows in CSV."));
    }
    debug!("ingested {} of {rows_read} applicant rows", applicants.len());

    Ok(IngestedApplicants {
        applicants,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for col in REQUIRED_COLUMNS {
        if !header_map.contains_key(col) {
            return Err(AppError::new(2, format!("Missing required column: `{col}`")));
        }
    }
    Ok(())
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<Applicant, (Option<String>, String)> {
    let id = get_required(record, header_map, "id").map_err(|e| (None, e))?.to_string();
    let with_id = |e: String| (Some(id.clone()), e);

    let name = get_required(record, header_map, "name").map_err(with_id)?.to_string();

    let age = get_required(record, header_map, "age")
        .map_err(with_id)?
        .parse::<u32>()
        .map_err(|_| with_id("Invalid `age` value.".to_string()))?;

    let income = parse_f64(get_required(record, header_map, "income").map_err(with_id)?)
        .ok_or_else(|| with_id("Invalid `income` value.".to_string()))?;
    if income < 0.0 {
        return Err(with_id("Negative `income` value.".to_string()));
    }

    let raw_score = parse_f64(get_required(record, header_map, "risk_score").map_err(with_id)?)
        .ok_or_else(|| with_id("Invalid `risk_score` value.".to_string()))?;
    let risk_score = RiskScore::new(raw_score).map_err(|e| with_id(e.to_string()))?;

    let repayment_schedule = get_required(record, header_map, "repayment_schedule")
        .map_err(with_id)?
        .to_string();

    let credit_limit = get_optional(record, header_map, "credit_limit").and_then(parse_f64);
    let education = get_optional(record, header_map, "education").map(str::to_string);
    let marital_status = get_optional(record, header_map, "marital_status").map(str::to_string);
    let top_factors = get_optional(record, header_map, "top_factors")
        .map(split_factors)
        .unwrap_or_default();

    Ok(Applicant {
        id,
        name,
        age,
        income,
        risk_score,
        repayment_schedule,
        credit_limit,
        education,
        marital_status,
        top_factors,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    col: &str,
) -> Result<&'a str, String> {
    get_optional(record, header_map, col).ok_or_else(|| format!("Missing `{col}` value."))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, col: &str) -> Option<&'a str> {
    let idx = *header_map.get(col)?;
    let v = record.get(idx)?.trim();
    if v.is_empty() { None } else { Some(v) }
}

fn parse_f64(raw: &str) -> Option<f64> {
    // Allow thousands separators ("1,250,000") in quoted cells.
    let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != '_').collect();
    let v = cleaned.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Factors are `;`-separated inside a single cell.
fn split_factors(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
