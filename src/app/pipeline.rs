//! Shared workflows behind each subcommand.
//!
//! Each `run_*` function does the I/O and core calls for one command and
//! returns plain data; printing and exports stay in `app`.

use std::path::Path;

use log::{debug, info};

use crate::advisory::{
    NormalizedProfile, derive_features, financial_health, investment_profile, normalized_profile,
};
use crate::data::{AssetRecommendationRequest, CreditScoreResponse, ScoringClient};
use crate::domain::{
    ApplicantFinancials, ApplicantsConfig, DerivedFeatures, FeatureContribution, FinancialHealth,
    PortfolioConfig, ScoredApplicant,
};
use crate::error::{AppError, ScoreError};
use crate::io::ingest::IngestedApplicants;
use crate::report::{BookSummary, PortfolioReport, ScoreFailure};
use crate::scoring::{label, loan_readiness, monthly_installment, rank, top};

/// All computed outputs of a single `scout applicants` run.
#[derive(Debug, Clone)]
pub struct ApplicantRun {
    pub ingest: IngestedApplicants,
    /// Every scorable applicant, in file order.
    pub scored: Vec<ScoredApplicant>,
    /// Filtered, sorted and truncated to `top_n`.
    pub view: Vec<ScoredApplicant>,
    pub failures: Vec<ScoreFailure>,
    /// Summary of the filtered book (before truncation).
    pub summary: BookSummary,
}

pub fn run_applicants(config: &ApplicantsConfig) -> Result<ApplicantRun, AppError> {
    let ingest = crate::io::ingest::load_applicants(&config.csv_path)?;
    let (scored, failures) = crate::report::score_book(&ingest.applicants);
    if scored.is_empty() {
        return Err(AppError::new(3, "No applicant could be scored."));
    }

    let mut filtered = crate::report::filter_by_tier(&scored, config.tier_filter);
    crate::report::sort_scored(&mut filtered, config.sort_field, config.sort_direction);
    let summary = crate::report::summarize_book(&filtered);
    let view: Vec<ScoredApplicant> = filtered.into_iter().take(config.top_n).collect();

    info!(
        "{} applicants scored, {} shown ({:?} by {:?} {:?})",
        scored.len(),
        view.len(),
        config.tier_filter,
        config.sort_field,
        config.sort_direction
    );

    Ok(ApplicantRun {
        ingest,
        scored,
        view,
        failures,
        summary,
    })
}

pub fn run_portfolio(config: &PortfolioConfig) -> Result<Vec<PortfolioReport>, AppError> {
    let inputs = crate::io::json::read_portfolios(&config.json_path)?;
    let mut reports = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let report = crate::report::assess_portfolio(input, config)
            .map_err(|e| AppError::new(5, format!("Portfolio {}: {e}", input.customer_id)))?;
        debug!(
            "portfolio {}: {} alerts",
            input.customer_id,
            report.concentration_alerts.len()
        );
        reports.push(report);
    }
    Ok(reports)
}

/// Load contributions and return the `top_n` with the largest magnitude.
pub fn run_explain(path: &Path, top_n: usize) -> Result<Vec<FeatureContribution>, AppError> {
    let factors = crate::io::json::read_factors(path)?;
    debug!("ranking {} contributions", factors.len());
    Ok(top(&factors, top_n))
}

/// Locally derived figures for one applicant; no service calls.
#[derive(Debug, Clone)]
pub struct HealthRun {
    pub features: DerivedFeatures,
    pub health: FinancialHealth,
    pub profile: NormalizedProfile,
}

/// `total_value` defaults to the applicant's credit limit.
pub fn run_health(path: &Path, total_value: Option<f64>) -> Result<HealthRun, AppError> {
    let fin = crate::io::json::read_financials(path)?;
    health_from_financials(&fin, total_value)
}

pub fn health_from_financials(fin: &ApplicantFinancials, total_value: Option<f64>) -> Result<HealthRun, AppError> {
    let features = derive_features(fin);
    let health = financial_health(&features);
    let profile = investment_profile(health.financial_health_score, fin.age);
    let profile = normalized_profile(profile, total_value.unwrap_or(fin.limit_bal))?;
    Ok(HealthRun {
        features,
        health,
        profile,
    })
}

/// A live assessment: service responses plus the figures derived from them.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub base_url: String,
    pub credit: CreditScoreResponse,
    pub health: FinancialHealth,
    /// Display label from the local tier of the returned probability of default.
    pub label: String,
    pub recommended_loan: u64,
    pub monthly_installment: u64,
    pub loan_readiness: u32,
    pub factors: Vec<FeatureContribution>,
    pub profile: NormalizedProfile,
}

/// Call all three services in turn and derive the local figures.
pub fn run_assessment(
    client: &ScoringClient,
    fin: &ApplicantFinancials,
    total_value: Option<f64>,
) -> Result<Assessment, AppError> {
    let credit = client.credit_score(fin)?;
    let health = client.financial_health(fin)?;
    let request = AssetRecommendationRequest::new(fin, &credit, &health);
    let recommendation = client.asset_recommendation(&request)?;

    let pd = credit.probability_of_default;
    let local_label = label(pd);
    if local_label.to_lowercase() != credit.risk_tier.name() {
        debug!(
            "service tier {} differs from local tier {local_label}",
            credit.risk_tier.name()
        );
    }

    let recommended_loan = whole_amount(credit.recommended_loan_amount)?;
    let installment = monthly_installment(recommended_loan, credit.recommended_tenor_months)?;
    let factors = rank(&credit.explainability.contributions());
    let profile = normalized_profile(recommendation, total_value.unwrap_or(fin.limit_bal))?;

    Ok(Assessment {
        base_url: client.base_url().to_string(),
        label: local_label,
        recommended_loan,
        monthly_installment: installment,
        loan_readiness: loan_readiness(pd),
        factors,
        profile,
        health,
        credit,
    })
}

fn whole_amount(v: f64) -> Result<u64, ScoreError> {
    if !v.is_finite() || v < 0.0 {
        return Err(ScoreError::InvalidAmount {
            field: "recommended_loan_amount",
            value: v,
        });
    }
    Ok(v.floor() as u64)
}
