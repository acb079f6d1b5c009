//! Book- and portfolio-level derivations.
//!
//! - `score_book`: run every applicant through the scoring core (parallel)
//! - `filter_by_tier`, `sort_scored`: plain view-state operations on a book
//! - `summarize_book`: tier counts, average risk, total recommended loan
//! - `assess_portfolio`: allocations, rebalancing, concentration and liquidity
//!
//! Formatting for the terminal lives in `format`.

use std::cmp::Ordering;

use chrono::NaiveDate;
use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::domain::{
    Applicant, AssetAllocation, ConcentrationAlert, LiquidityIndicator, PortfolioConfig,
    PortfolioInput, RebalancingSuggestion, RiskTier, ScoredApplicant, SortDirection, SortField,
    TierFilter,
};
use crate::error::ScoreError;
use crate::scoring::{
    concentration_alert, label, liquidity_indicator, loan_readiness, monthly_installment,
    normalize, parse_tenor_months, rebalancing_suggestions, recommended_loan, tier,
};

pub mod format;

pub use format::*;

/// An applicant that could not be scored, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreFailure {
    pub id: String,
    pub error: ScoreError,
}

/// Derive tier, label, loan, tenor, installment and readiness for one applicant.
pub fn score_applicant(applicant: &Applicant) -> Result<ScoredApplicant, ScoreError> {
    let score = applicant.risk_score;
    let recommended_loan = recommended_loan(applicant.income, score)?;
    let tenor_months = parse_tenor_months(&applicant.repayment_schedule)?;
    let monthly_installment = monthly_installment(recommended_loan, tenor_months)?;

    Ok(ScoredApplicant {
        applicant: applicant.clone(),
        tier: tier(score),
        label: label(score),
        recommended_loan,
        tenor_months,
        monthly_installment,
        loan_readiness: loan_readiness(score),
    })
}

/// Score a whole book in parallel. Output order follows input order.
pub fn score_book(applicants: &[Applicant]) -> (Vec<ScoredApplicant>, Vec<ScoreFailure>) {
    let results: Vec<(String, Result<ScoredApplicant, ScoreError>)> = applicants
        .par_iter()
        .map(|a| (a.id.clone(), score_applicant(a)))
        .collect();

    let mut scored = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (id, result) in results {
        match result {
            Ok(s) => scored.push(s),
            Err(error) => failures.push(ScoreFailure { id, error }),
        }
    }
    debug!("scored {} applicants, {} failures", scored.len(), failures.len());
    (scored, failures)
}

pub fn filter_by_tier(rows: &[ScoredApplicant], filter: TierFilter) -> Vec<ScoredApplicant> {
    match filter.tier() {
        None => rows.to_vec(),
        Some(t) => rows.iter().filter(|r| r.tier == t).cloned().collect(),
    }
}

/// Stable sort by one field; equal keys keep their input order in both directions.
pub fn sort_scored(rows: &mut [ScoredApplicant], field: SortField, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = compare_by(a, b, field);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

fn compare_by(a: &ScoredApplicant, b: &ScoredApplicant, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.applicant.name.cmp(&b.applicant.name),
        SortField::Age => a.applicant.age.cmp(&b.applicant.age),
        SortField::Income => cmp_f64(a.applicant.income, b.applicant.income),
        SortField::RiskScore => cmp_f64(a.applicant.risk_score.value(), b.applicant.risk_score.value()),
        SortField::RecommendedLoan => a.recommended_loan.cmp(&b.recommended_loan),
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl TierCounts {
    pub fn get(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Medium => self.medium,
            RiskTier::High => self.high,
        }
    }
}

/// Headline figures of an applicant book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub total: usize,
    pub tiers: TierCounts,
    /// Mean probability of default; `None` for an empty book.
    pub average_risk_score: Option<f64>,
    pub total_recommended_loan: u64,
}

impl BookSummary {
    /// Share of the book in `tier`, in percent.
    pub fn tier_share(&self, tier: RiskTier) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.tiers.get(tier) as f64 / self.total as f64 * 100.0)
    }
}

pub fn summarize_book(rows: &[ScoredApplicant]) -> BookSummary {
    let mut tiers = TierCounts::default();
    let mut risk_sum = 0.0;
    let mut total_recommended_loan = 0u64;

    for r in rows {
        match r.tier {
            RiskTier::Low => tiers.low += 1,
            RiskTier::Medium => tiers.medium += 1,
            RiskTier::High => tiers.high += 1,
        }
        risk_sum += r.applicant.risk_score.value();
        total_recommended_loan = total_recommended_loan.saturating_add(r.recommended_loan);
    }

    let average_risk_score = if rows.is_empty() {
        None
    } else {
        Some(risk_sum / rows.len() as f64)
    };

    BookSummary {
        total: rows.len(),
        tiers,
        average_risk_score,
        total_recommended_loan,
    }
}

/// Everything derived for one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    pub customer_id: String,
    pub customer_name: String,
    pub total_value: f64,
    pub allocations: Vec<AssetAllocation>,
    pub rebalancing: Vec<RebalancingSuggestion>,
    pub concentration_alerts: Vec<ConcentrationAlert>,
    pub liquidity: Option<LiquidityIndicator>,
    pub last_rebalanced: Option<NaiveDate>,
}

pub fn assess_portfolio(input: &PortfolioInput, config: &PortfolioConfig) -> Result<PortfolioReport, ScoreError> {
    let allocations = normalize(&input.targets, input.total_value)?;
    let rebalancing = rebalancing_suggestions(&allocations, input.total_value, config.rebalance_tolerance);

    let concentration_alerts = allocations
        .iter()
        .filter_map(|a| {
            concentration_alert(
                &input.customer_id,
                a.product_type,
                a.percentage,
                config.concentration_threshold,
            )
        })
        .collect();

    let liquidity = match (input.liquid_assets, input.total_assets) {
        (Some(liquid), Some(total)) => Some(liquidity_indicator(&input.customer_id, liquid, total)?),
        _ => None,
    };

    Ok(PortfolioReport {
        customer_id: input.customer_id.clone(),
        customer_name: input.customer_name.clone(),
        total_value: input.total_value,
        allocations,
        rebalancing,
        concentration_alerts,
        liquidity,
        last_rebalanced: input.last_rebalanced,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{
        AllocationTarget, LiquidityStatus, ProductType, RebalanceAction, RiskScore, Severity,
    };
    use std::path::PathBuf;

    pub(crate) fn applicant(id: &str, name: &str, income: f64, score: f64, schedule: &str) -> Applicant {
        Applicant {
            id: id.to_string(),
            name: name.to_string(),
            age: 30,
            income,
            risk_score: RiskScore::new(score).unwrap(),
            repayment_schedule: schedule.to_string(),
            credit_limit: None,
            education: None,
            marital_status: None,
            top_factors: vec![],
        }
    }

    #[test]
    fn scores_one_applicant() {
        let s = score_applicant(&applicant("1", "A", 1_000_000.0, 0.0, "6 months")).unwrap();
        assert_eq!(s.tier, RiskTier::Low);
        assert_eq!(s.label, "Low");
        assert_eq!(s.recommended_loan, 300_000);
        assert_eq!(s.tenor_months, 6);
        assert_eq!(s.monthly_installment, 50_000);
        assert_eq!(s.loan_readiness, 100);
    }

    #[test]
    fn book_keeps_order_and_collects_failures() {
        let book = vec![
            applicant("1", "A", 1_000_000.0, 0.1, "6 months"),
            applicant("2", "B", 1_000_000.0, 0.5, "whenever"),
            applicant("3", "C", 2_000_000.0, 0.9, "12 months"),
        ];
        let (scored, failures) = score_book(&book);
        let ids: Vec<&str> = scored.iter().map(|s| s.applicant.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, "2");
        assert!(matches!(failures[0].error, ScoreError::InvalidTenorLabel(_)));
    }

    #[test]
    fn filter_and_summary() {
        let book = vec![
            applicant("1", "A", 1_000_000.0, 0.1, "6 months"),
            applicant("2", "B", 1_000_000.0, 0.5, "6 months"),
            applicant("3", "C", 1_000_000.0, 0.7, "6 months"),
            applicant("4", "D", 1_000_000.0, 0.9, "6 months"),
        ];
        let (scored, _) = score_book(&book);

        assert_eq!(filter_by_tier(&scored, TierFilter::All).len(), 4);
        assert_eq!(filter_by_tier(&scored, TierFilter::High).len(), 2);

        let summary = summarize_book(&scored);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.tiers, TierCounts { low: 1, medium: 1, high: 2 });
        assert!((summary.average_risk_score.unwrap() - 0.55).abs() < 1e-12);
        assert_eq!(summary.tier_share(RiskTier::High), Some(50.0));
        let expected: u64 = scored.iter().map(|s| s.recommended_loan).sum();
        assert_eq!(summary.total_recommended_loan, expected);
    }

    #[test]
    fn empty_summary_has_no_average() {
        let summary = summarize_book(&[]);
        assert_eq!(summary.average_risk_score, None);
        assert_eq!(summary.tier_share(RiskTier::Low), None);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let book = vec![
            applicant("1", "Zainab", 500_000.0, 0.4, "6 months"),
            applicant("2", "Amaka", 900_000.0, 0.4, "6 months"),
            applicant("3", "Musa", 700_000.0, 0.8, "6 months"),
        ];
        let (mut scored, _) = score_book(&book);

        sort_scored(&mut scored, SortField::RiskScore, SortDirection::Desc);
        let ids: Vec<&str> = scored.iter().map(|s| s.applicant.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);

        sort_scored(&mut scored, SortField::Name, SortDirection::Asc);
        let names: Vec<&str> = scored.iter().map(|s| s.applicant.name.as_str()).collect();
        assert_eq!(names, vec!["Amaka", "Musa", "Zainab"]);

        sort_scored(&mut scored, SortField::Income, SortDirection::Desc);
        assert_eq!(scored[0].applicant.id, "2");
    }

    #[test]
    fn portfolio_report() {
        let input = PortfolioInput {
            customer_id: "cust-1".to_string(),
            customer_name: "Halima Bello".to_string(),
            total_value: 1_000_000.0,
            targets: vec![
                AllocationTarget::new(ProductType::Equities, 62.0),
                AllocationTarget::new(ProductType::FixedIncome, 20.0),
                AllocationTarget {
                    product_type: ProductType::MoneyMarket,
                    desired_percentage: 18.0,
                    target_percentage: Some(30.0),
                },
            ],
            liquid_assets: Some(150_000.0),
            total_assets: Some(1_000_000.0),
            last_rebalanced: None,
        };
        let config = PortfolioConfig {
            json_path: PathBuf::from("unused.json"),
            concentration_threshold: 40.0,
            rebalance_tolerance: 2.0,
            export_json: None,
        };

        let report = assess_portfolio(&input, &config).unwrap();
        assert_eq!(report.allocations.iter().map(|a| a.percentage).sum::<f64>(), 100.0);
        assert_eq!(report.concentration_alerts.len(), 1);
        assert_eq!(report.concentration_alerts[0].severity, Severity::High);
        assert_eq!(report.rebalancing[2].action, RebalanceAction::Increase);
        assert_eq!(report.liquidity.as_ref().unwrap().status, LiquidityStatus::Critical);
    }
}
