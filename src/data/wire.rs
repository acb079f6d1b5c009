//! Wire contracts of the external scoring and asset-recommendation services.
//!
//! Field names follow the services exactly (`LIMIT_BAL`, `probability_of_default`,
//! ...). Values that the core relies on are validated on receipt: a
//! `probability_of_default` outside `[0, 1]` fails deserialization.

use serde::{Deserialize, Serialize};

use crate::domain::{
    ApplicantFinancials, FeatureContribution, FinancialHealth, InvestmentProfile, RiskScore,
    RiskTier,
};

/// `POST /credit/score` and `POST /financial-health/score` request body.
pub type CreditScoreRequest = ApplicantFinancials;

/// `POST /financial-health/score` response body.
pub type FinancialHealthResponse = FinancialHealth;

/// `POST /asset-management/recommendation` response body.
pub type AssetRecommendationResponse = InvestmentProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorImpact {
    pub feature: String,
    pub impact: f64,
}

impl From<&FactorImpact> for FeatureContribution {
    fn from(f: &FactorImpact) -> Self {
        FeatureContribution::new(f.feature.clone(), f.impact)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Explainability {
    #[serde(default)]
    pub top_positive_factors: Vec<FactorImpact>,
    #[serde(default)]
    pub top_negative_factors: Vec<FactorImpact>,
}

impl Explainability {
    /// Both factor lists as contributions, positive drivers first.
    pub fn contributions(&self) -> Vec<FeatureContribution> {
        self.top_positive_factors
            .iter()
            .chain(self.top_negative_factors.iter())
            .map(FeatureContribution::from)
            .collect()
    }
}

/// `POST /credit/score` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditScoreResponse {
    pub credit_score: f64,
    pub probability_of_default: RiskScore,
    /// Tier as assigned by the service (its own thresholds).
    pub risk_tier: RiskTier,
    pub recommended_loan_amount: f64,
    pub recommended_tenor_months: u32,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub explainability: Explainability,
}

/// `POST /asset-management/recommendation` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecommendationRequest {
    pub financial_health_score: f64,
    pub credit_score: f64,
    /// Upper-case tier as the service expects it (`"LOW"`, `"MEDIUM"`, `"HIGH"`).
    pub risk_tier: String,
    #[serde(rename = "LIMIT_BAL")]
    pub limit_bal: f64,
    #[serde(rename = "AGE")]
    pub age: u32,
}

impl AssetRecommendationRequest {
    pub fn new(
        financials: &ApplicantFinancials,
        credit: &CreditScoreResponse,
        health: &FinancialHealth,
    ) -> Self {
        Self {
            financial_health_score: health.financial_health_score,
            credit_score: credit.credit_score,
            risk_tier: credit.risk_tier.name().to_ascii_uppercase(),
            limit_bal: financials.limit_bal,
            age: financials.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HealthBand, RiskTolerance};

    const CREDIT_JSON: &str = r#"{
        "credit_score": 81,
        "probability_of_default": 0.19,
        "risk_tier": "LOW",
        "recommended_loan_amount": 300000.0,
        "recommended_tenor_months": 36,
        "currency": "NGN",
        "explainability": {
            "top_positive_factors": [{"feature": "PAY_0", "impact": 0.42}],
            "top_negative_factors": [{"feature": "LIMIT_BAL", "impact": -0.8}]
        }
    }"#;

    #[test]
    fn parses_credit_response() {
        let resp: CreditScoreResponse = serde_json::from_str(CREDIT_JSON).unwrap();
        assert_eq!(resp.risk_tier, RiskTier::Low);
        assert_eq!(resp.probability_of_default.value(), 0.19);
        assert_eq!(resp.recommended_tenor_months, 36);
        let contributions = resp.explainability.contributions();
        assert_eq!(contributions.len(), 2);
        assert_eq!(contributions[1].feature, "LIMIT_BAL");
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let bad = CREDIT_JSON.replace("0.19", "1.19");
        assert!(serde_json::from_str::<CreditScoreResponse>(&bad).is_err());
    }

    #[test]
    fn parses_health_and_recommendation() {
        let health: FinancialHealthResponse =
            serde_json::from_str(r#"{"financial_health_score": 64.5, "health_band": "Moderate"}"#)
                .unwrap();
        assert_eq!(health.health_band, HealthBand::Moderate);

        let rec: AssetRecommendationResponse = serde_json::from_str(
            r#"{"risk_tolerance": "MEDIUM", "investment_horizon": "LONG",
                "portfolio_allocation": {"money_market": 40, "fixed_income": 40, "equities": 20}}"#,
        )
        .unwrap();
        assert_eq!(rec.risk_tolerance, RiskTolerance::Medium);
        assert_eq!(rec.portfolio_allocation.total(), 100.0);
    }
}
