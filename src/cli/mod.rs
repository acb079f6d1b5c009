//! Command-line parsing for the loan scout.
//!
//! Parsing stays here; `app` turns parsed args into run configs and dispatches.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{SortDirection, SortField, TierFilter};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "scout", version, about = "Loan applicant risk scoring and portfolio advisory")]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score an applicant book (CSV), print tiers, loans and installments.
    Applicants(ApplicantsArgs),
    /// Normalize portfolio allocations and report concentration and liquidity alerts.
    Portfolio(PortfolioArgs),
    /// Rank feature contributions by absolute impact.
    Explain(ExplainArgs),
    /// Derive features, financial health and investment profile locally.
    Health(HealthArgs),
    /// Run a live assessment against the scoring services.
    Assess(AssessArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ApplicantsArgs {
    /// Applicant CSV (id, name, age, income, risk_score, repayment_schedule, ...).
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Only show one tier.
    #[arg(short = 't', long, value_enum, default_value_t = TierFilter::All)]
    pub tier: TierFilter,

    /// Sort column.
    #[arg(short = 's', long, value_enum, default_value_t = SortField::RiskScore)]
    pub sort: SortField,

    /// Sort direction.
    #[arg(short = 'd', long, value_enum, default_value_t = SortDirection::Asc)]
    pub direction: SortDirection,

    /// Show at most N applicants.
    #[arg(long, default_value_t = 50)]
    pub top: usize,

    /// Export every scored applicant to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export every scored applicant to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct PortfolioArgs {
    /// Portfolio JSON (an array of portfolio objects).
    #[arg(value_name = "JSON")]
    pub json: PathBuf,

    /// Concentration limit per product type, in percent.
    #[arg(long, default_value_t = 40.0)]
    pub threshold: f64,

    /// Band (percentage points) around target that counts as on target.
    #[arg(long, default_value_t = 2.0)]
    pub tolerance: f64,

    /// Export the computed reports to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct ExplainArgs {
    /// JSON array of {feature, contribution, description?}.
    #[arg(value_name = "JSON")]
    pub json: PathBuf,

    /// Show the N most influential factors.
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct HealthArgs {
    /// Applicant financials JSON (LIMIT_BAL, AGE, PAY_0, BILL_AMT1, ...).
    #[arg(value_name = "JSON")]
    pub json: PathBuf,

    /// Portfolio value used to price the model allocation (default: LIMIT_BAL).
    #[arg(long)]
    pub total_value: Option<f64>,
}

#[derive(Debug, Parser, Clone)]
pub struct AssessArgs {
    /// Applicant financials JSON sent to the scoring services.
    #[arg(value_name = "JSON")]
    pub json: PathBuf,

    /// Scoring service base URL (default: $SCOUT_API_BASE_URL, then localhost).
    #[arg(long)]
    pub api_url: Option<String>,

    /// Portfolio value used to price the recommended allocation (default: LIMIT_BAL).
    #[arg(long)]
    pub total_value: Option<f64>,
}
