//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - builds run configs from flags
//! - runs the matching pipeline
//! - prints reports and writes optional exports

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use log::info;

use crate::cli::{
    ApplicantsArgs, AssessArgs, Command, ExplainArgs, HealthArgs, PortfolioArgs,
};
use crate::data::ScoringClient;
use crate::domain::{ApplicantsConfig, PortfolioConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `scout` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Applicants(args) => handle_applicants(&args),
        Command::Portfolio(args) => handle_portfolio(&args),
        Command::Explain(args) => handle_explain(&args),
        Command::Health(args) => handle_health(&args),
        Command::Assess(args) => handle_assess(&args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .try_init();
}

fn handle_applicants(args: &ApplicantsArgs) -> Result<(), AppError> {
    let config = applicants_config_from_args(args);
    let run = pipeline::run_applicants(&config)?;

    println!("{}", crate::report::format_book_summary(&run));
    print!("{}", crate::report::format_applicant_table(&run.view));
    print!(
        "{}",
        crate::report::format_row_errors(&run.ingest.row_errors, &run.failures)
    );

    if config.export_csv.is_some() || config.export_json.is_some() {
        let scored_at = Utc::now();
        if let Some(path) = &config.export_csv {
            crate::io::export::write_scored_csv(path, &run.scored, scored_at)?;
            info!("wrote {} rows to {}", run.scored.len(), path.display());
        }
        if let Some(path) = &config.export_json {
            crate::io::json::write_json(path, &run.scored)?;
            info!("wrote {} rows to {}", run.scored.len(), path.display());
        }
    }

    Ok(())
}

fn handle_portfolio(args: &PortfolioArgs) -> Result<(), AppError> {
    let config = portfolio_config_from_args(args)?;
    let reports = pipeline::run_portfolio(&config)?;

    for report in &reports {
        print!("{}", crate::report::format_portfolio_report(report));
    }

    if let Some(path) = &config.export_json {
        crate::io::json::write_json(path, &reports)?;
    }
    Ok(())
}

fn handle_explain(args: &ExplainArgs) -> Result<(), AppError> {
    let factors = pipeline::run_explain(&args.json, args.top)?;
    println!("Top {} factors by impact:", factors.len());
    print!("{}", crate::report::format_ranked_factors(&factors));
    Ok(())
}

fn handle_health(args: &HealthArgs) -> Result<(), AppError> {
    let run = pipeline::run_health(&args.json, args.total_value)?;
    print!("{}", crate::report::format_health(&run));
    Ok(())
}

fn handle_assess(args: &AssessArgs) -> Result<(), AppError> {
    let fin = crate::io::json::read_financials(&args.json)?;
    let client = ScoringClient::from_env(args.api_url.as_deref());
    let assessment = pipeline::run_assessment(&client, &fin, args.total_value)?;
    print!("{}", crate::report::format_assessment(&assessment));
    Ok(())
}

pub fn applicants_config_from_args(args: &ApplicantsArgs) -> ApplicantsConfig {
    ApplicantsConfig {
        csv_path: args.csv.clone(),
        tier_filter: args.tier,
        sort_field: args.sort,
        sort_direction: args.direction,
        top_n: args.top,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

pub fn portfolio_config_from_args(args: &PortfolioArgs) -> Result<PortfolioConfig, AppError> {
    if !args.threshold.is_finite() || !(0.0..=100.0).contains(&args.threshold) {
        return Err(AppError::new(
            2,
            format!("--threshold must be within [0, 100], got {}", args.threshold),
        ));
    }
    if !args.tolerance.is_finite() || args.tolerance < 0.0 {
        return Err(AppError::new(
            2,
            format!("--tolerance must be non-negative, got {}", args.tolerance),
        ));
    }
    Ok(PortfolioConfig {
        json_path: args.json.clone(),
        concentration_threshold: args.threshold,
        rebalance_tolerance: args.tolerance,
        export_json: args.export.clone(),
    })
}

/// Rewrite argv so a bare CSV path means `scout applicants <CSV>`.
///
/// Rules:
/// - `scout book.csv ...`        -> `scout applicants book.csv ...`
/// - `scout -v book.csv ...`     -> `scout -v applicants book.csv ...`
/// - anything else               -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(pos) = argv.iter().skip(1).position(|a| !a.starts_with('-')).map(|i| i + 1) else {
        return argv;
    };

    let is_subcommand = matches!(
        argv[pos].as_str(),
        "applicants" | "portfolio" | "explain" | "health" | "assess" | "help"
    );
    if is_subcommand {
        return argv;
    }

    let looks_like_csv = PathBuf::from(&argv[pos])
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if looks_like_csv {
        argv.insert(pos, "applicants".to_string());
    }
    argv
}
