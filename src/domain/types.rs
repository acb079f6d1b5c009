//! Shared domain types.
//!
//! These types are deliberately plain values: they are created per request
//! (from a CSV row, a JSON file, or a scoring-service response), run through
//! the pure functions in `scoring` / `advisory`, and handed to the report or
//! export layer. None of them carries identity beyond the caller-supplied id.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// Estimated probability of default, guaranteed to lie in `[0, 1]`.
///
/// Construction rejects out-of-range and non-finite values instead of
/// clamping them, so upstream data-quality problems stay visible.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskScore(f64);

impl RiskScore {
    pub fn new(value: f64) -> Result<Self, ScoreError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreError::RiskScoreOutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RiskScore {
    type Error = ScoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        RiskScore::new(value)
    }
}

impl From<RiskScore> for f64 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

/// Qualitative risk bucket derived from a `RiskScore`.
///
/// The scoring service reports tiers in upper case (`"LOW"`); both spellings
/// are accepted on input, lower case is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    #[serde(alias = "LOW")]
    Low,
    #[serde(alias = "MEDIUM")]
    Medium,
    #[serde(alias = "HIGH")]
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Medium, RiskTier::High];

    pub fn name(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

/// Tier selection for book views. `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TierFilter {
    All,
    Low,
    Medium,
    High,
}

impl TierFilter {
    pub fn tier(self) -> Option<RiskTier> {
        match self {
            TierFilter::All => None,
            TierFilter::Low => Some(RiskTier::Low),
            TierFilter::Medium => Some(RiskTier::Medium),
            TierFilter::High => Some(RiskTier::High),
        }
    }
}

/// Investment product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ProductType {
    #[serde(rename = "Fixed Income")]
    FixedIncome,
    #[serde(rename = "Money Market")]
    MoneyMarket,
    #[serde(rename = "Equities")]
    Equities,
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Commodities")]
    Commodities,
}

impl ProductType {
    pub fn display_name(self) -> &'static str {
        match self {
            ProductType::FixedIncome => "Fixed Income",
            ProductType::MoneyMarket => "Money Market",
            ProductType::Equities => "Equities",
            ProductType::RealEstate => "Real Estate",
            ProductType::Commodities => "Commodities",
        }
    }
}

/// One caller-supplied allocation target, in processing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationTarget {
    pub product_type: ProductType,
    /// Desired share of the portfolio in percent. Ignored for the last entry,
    /// which always receives the remainder.
    pub desired_percentage: f64,
    /// Long-run target used for rebalancing. Defaults to the assigned percentage.
    #[serde(default)]
    pub target_percentage: Option<f64>,
}

impl AllocationTarget {
    pub fn new(product_type: ProductType, desired_percentage: f64) -> Self {
        Self {
            product_type,
            desired_percentage,
            target_percentage: None,
        }
    }
}

/// A normalized allocation line of a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAllocation {
    pub product_type: ProductType,
    pub percentage: f64,
    pub current_value: f64,
    pub target_percentage: f64,
}

/// A named contribution to a score, in `[-100, 100]` (negative lowers the score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub contribution: f64,
    #[serde(default)]
    pub description: String,
}

impl FeatureContribution {
    pub fn new(feature: impl Into<String>, contribution: f64) -> Self {
        Self {
            feature: feature.into(),
            contribution,
            description: String::new(),
        }
    }
}

/// Severity of a concentration alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Liquidity stress status of a customer's holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidityStatus {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationAlert {
    pub customer_id: String,
    pub product_type: ProductType,
    pub concentration: f64,
    pub threshold: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityIndicator {
    pub customer_id: String,
    pub liquid_assets: f64,
    pub total_assets: f64,
    pub liquidity_ratio: f64,
    pub status: LiquidityStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebalanceAction {
    Increase,
    Decrease,
    Hold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalancingSuggestion {
    pub product_type: ProductType,
    pub current_percentage: f64,
    pub target_percentage: f64,
    pub action: RebalanceAction,
    /// Monetary amount to move, always non-negative.
    pub amount: f64,
}

/// A loan applicant as read from an applicant book.
///
/// The recommended loan is never read from input; it is always derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Applicant {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub income: f64,
    pub risk_score: RiskScore,
    /// Free-form schedule label such as `"6 months"`.
    pub repayment_schedule: String,
    pub credit_limit: Option<f64>,
    pub education: Option<String>,
    pub marital_status: Option<String>,
    pub top_factors: Vec<String>,
}

/// An applicant with every derived figure attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredApplicant {
    #[serde(flatten)]
    pub applicant: Applicant,
    pub tier: RiskTier,
    pub label: String,
    pub recommended_loan: u64,
    pub tenor_months: u32,
    pub monthly_installment: u64,
    /// `round((1 - risk_score) * 100)`.
    pub loan_readiness: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Name,
    Age,
    Income,
    RiskScore,
    RecommendedLoan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Raw applicant financial fields, in the scoring service's wire naming.
///
/// `PAY_x` are repayment-delay codes (negative = paid early / on time);
/// `BILL_AMTx` and `PAY_AMTx` are the last six monthly statements and payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantFinancials {
    #[serde(rename = "LIMIT_BAL")]
    pub limit_bal: f64,
    #[serde(rename = "AGE")]
    pub age: u32,
    #[serde(rename = "SEX")]
    pub sex: u8,
    #[serde(rename = "EDUCATION")]
    pub education: u8,
    #[serde(rename = "MARRIAGE")]
    pub marriage: u8,
    #[serde(rename = "PAY_0")]
    pub pay_0: i32,
    #[serde(rename = "PAY_2")]
    pub pay_2: i32,
    #[serde(rename = "PAY_3")]
    pub pay_3: i32,
    #[serde(rename = "PAY_4")]
    pub pay_4: i32,
    #[serde(rename = "PAY_5")]
    pub pay_5: i32,
    #[serde(rename = "PAY_6")]
    pub pay_6: i32,
    #[serde(rename = "BILL_AMT1")]
    pub bill_amt1: f64,
    #[serde(rename = "BILL_AMT2")]
    pub bill_amt2: f64,
    #[serde(rename = "BILL_AMT3")]
    pub bill_amt3: f64,
    #[serde(rename = "BILL_AMT4")]
    pub bill_amt4: f64,
    #[serde(rename = "BILL_AMT5")]
    pub bill_amt5: f64,
    #[serde(rename = "BILL_AMT6")]
    pub bill_amt6: f64,
    #[serde(rename = "PAY_AMT1")]
    pub pay_amt1: f64,
    #[serde(rename = "PAY_AMT2")]
    pub pay_amt2: f64,
    #[serde(rename = "PAY_AMT3")]
    pub pay_amt3: f64,
    #[serde(rename = "PAY_AMT4")]
    pub pay_amt4: f64,
    #[serde(rename = "PAY_AMT5")]
    pub pay_amt5: f64,
    #[serde(rename = "PAY_AMT6")]
    pub pay_amt6: f64,
}

impl ApplicantFinancials {
    pub fn delay_codes(&self) -> [i32; 6] {
        [self.pay_0, self.pay_2, self.pay_3, self.pay_4, self.pay_5, self.pay_6]
    }

    pub fn bill_amounts(&self) -> [f64; 6] {
        [
            self.bill_amt1,
            self.bill_amt2,
            self.bill_amt3,
            self.bill_amt4,
            self.bill_amt5,
            self.bill_amt6,
        ]
    }

    pub fn pay_amounts(&self) -> [f64; 6] {
        [
            self.pay_amt1,
            self.pay_amt2,
            self.pay_amt3,
            self.pay_amt4,
            self.pay_amt5,
            self.pay_amt6,
        ]
    }
}

/// Behavioural features derived from `ApplicantFinancials`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    pub avg_bill_amt: f64,
    pub avg_pay_amt: f64,
    pub credit_utilization: f64,
    pub payment_consistency: f64,
    pub late_payment_count: u32,
    pub severe_delinquency: bool,
    pub cashflow_volatility: f64,
    pub ratio_volatility: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    Strong,
    Moderate,
    Fragile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealth {
    pub financial_health_score: f64,
    pub health_band: HealthBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvestmentHorizon {
    Long,
    Medium,
    Short,
}

/// The three named percentages used by the asset-recommendation service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceAllocation {
    pub money_market: f64,
    pub fixed_income: f64,
    pub equities: f64,
}

impl ServiceAllocation {
    pub fn total(&self) -> f64 {
        self.money_market + self.fixed_income + self.equities
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProfile {
    pub risk_tolerance: RiskTolerance,
    pub investment_horizon: InvestmentHorizon,
    pub portfolio_allocation: ServiceAllocation,
}

/// One portfolio as read from a portfolio JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioInput {
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: String,
    pub total_value: f64,
    pub targets: Vec<AllocationTarget>,
    #[serde(default)]
    pub liquid_assets: Option<f64>,
    #[serde(default)]
    pub total_assets: Option<f64>,
    #[serde(default)]
    pub last_rebalanced: Option<NaiveDate>,
}

/// Configuration of an applicant-book run.
///
/// Derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ApplicantsConfig {
    pub csv_path: PathBuf,
    pub tier_filter: TierFilter,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub top_n: usize,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Configuration of a portfolio run.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub json_path: PathBuf,
    /// Concentration limit (percent) for any single product type.
    pub concentration_threshold: f64,
    /// Percentage-point band inside which a rebalancing line is `hold`.
    pub rebalance_tolerance: f64,
    pub export_json: Option<PathBuf>,
}
