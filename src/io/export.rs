//! Export scored applicants to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: plain numbers, no currency symbols or percent signs.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::ScoredApplicant;
use crate::error::AppError;

const HEADER: &str = "id,name,age,income,risk_score,tier,recommended_loan,tenor_months,monthly_installment,loan_readiness,scored_at";

/// Write scored applicants to a CSV file.
pub fn write_scored_csv(path: &Path, rows: &[ScoredApplicant], scored_at: DateTime<Utc>) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_scored(&mut file, rows, scored_at)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV '{}': {e}", path.display())))
}

fn write_scored<W: Write>(out: &mut W, rows: &[ScoredApplicant], scored_at: DateTime<Utc>) -> std::io::Result<()> {
    writeln!(out, "{HEADER}")?;
    let stamp = scored_at.to_rfc3339();
    for r in rows {
        let a = &r.applicant;
        writeln!(
            out,
            "{},{},{},{:.2},{:.4},{},{},{},{},{},{}",
            csv_field(&a.id),
            csv_field(&a.name),
            a.age,
            a.income,
            a.risk_score.value(),
            r.tier.name(),
            r.recommended_loan,
            r.tenor_months,
            r.monthly_installment,
            r.loan_readiness,
            stamp,
        )?;
    }
    Ok(())
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
