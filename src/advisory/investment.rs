//! Investment profiling rules.
//!
//! The asset-recommendation service returns a tolerance, a horizon and three
//! named percentages. These rules reproduce that shape locally, and
//! `normalize_service_allocation` closes a service triple to exactly 100%.

use log::warn;
use serde::Serialize;

use crate::domain::{
    AllocationTarget, AssetAllocation, InvestmentHorizon, InvestmentProfile, ProductType,
    RiskTolerance, ServiceAllocation,
};
use crate::error::ScoreError;
use crate::scoring::normalize;

/// `>= 75` High, `>= 50` Medium, otherwise Low.
pub fn risk_tolerance(financial_health_score: f64) -> RiskTolerance {
    if financial_health_score >= 75.0 {
        RiskTolerance::High
    } else if financial_health_score >= 50.0 {
        RiskTolerance::Medium
    } else {
        RiskTolerance::Low
    }
}

/// Under 35 Long, under 50 Medium, otherwise Short.
pub fn investment_horizon(age: u32) -> InvestmentHorizon {
    if age < 35 {
        InvestmentHorizon::Long
    } else if age < 50 {
        InvestmentHorizon::Medium
    } else {
        InvestmentHorizon::Short
    }
}

/// Model allocation for a tolerance (money market / fixed income / equities).
pub fn recommended_allocation(tolerance: RiskTolerance) -> ServiceAllocation {
    let (money_market, fixed_income, equities) = match tolerance {
        RiskTolerance::Low => (70.0, 30.0, 0.0),
        RiskTolerance::Medium => (40.0, 40.0, 20.0),
        RiskTolerance::High => (20.0, 40.0, 40.0),
    };
    ServiceAllocation {
        money_market,
        fixed_income,
        equities,
    }
}

pub fn investment_profile(financial_health_score: f64, age: u32) -> InvestmentProfile {
    let tolerance = risk_tolerance(financial_health_score);
    InvestmentProfile {
        risk_tolerance: tolerance,
        investment_horizon: investment_horizon(age),
        portfolio_allocation: recommended_allocation(tolerance),
    }
}

/// Turn a service triple into allocations summing to exactly 100%.
///
/// Order is money market, fixed income, equities; equities absorbs any
/// remainder when the triple does not already close.
pub fn normalize_service_allocation(
    allocation: &ServiceAllocation,
    total_value: f64,
) -> Result<Vec<AssetAllocation>, ScoreError> {
    let total = allocation.total();
    if total != 100.0 {
        warn!("service allocation sums to {total}, equities absorbs the remainder");
    }
    let targets = [
        AllocationTarget::new(ProductType::MoneyMarket, allocation.money_market),
        AllocationTarget::new(ProductType::FixedIncome, allocation.fixed_income),
        AllocationTarget::new(ProductType::Equities, allocation.equities),
    ];
    normalize(&targets, total_value)
}

/// An investment profile together with its closed allocation lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedProfile {
    pub profile: InvestmentProfile,
    pub allocations: Vec<AssetAllocation>,
}

pub fn normalized_profile(profile: InvestmentProfile, total_value: f64) -> Result<NormalizedProfile, ScoreError> {
    let allocations = normalize_service_allocation(&profile.portfolio_allocation, total_value)?;
    Ok(NormalizedProfile { profile, allocations })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_bands() {
        assert_eq!(risk_tolerance(75.0), RiskTolerance::High);
        assert_eq!(risk_tolerance(74.9), RiskTolerance::Medium);
        assert_eq!(risk_tolerance(50.0), RiskTolerance::Medium);
        assert_eq!(risk_tolerance(10.0), RiskTolerance::Low);
    }

    #[test]
    fn horizon_bands() {
        assert_eq!(investment_horizon(22), InvestmentHorizon::Long);
        assert_eq!(investment_horizon(35), InvestmentHorizon::Medium);
        assert_eq!(investment_horizon(49), InvestmentHorizon::Medium);
        assert_eq!(investment_horizon(50), InvestmentHorizon::Short);
    }

    #[test]
    fn model_allocations_close_to_100() {
        for tol in [RiskTolerance::Low, RiskTolerance::Medium, RiskTolerance::High] {
            assert_eq!(recommended_allocation(tol).total(), 100.0);
        }
        let profile = investment_profile(60.0, 40);
        assert_eq!(profile.risk_tolerance, RiskTolerance::Medium);
        assert_eq!(profile.investment_horizon, InvestmentHorizon::Medium);
        assert_eq!(profile.portfolio_allocation.equities, 20.0);
    }

    #[test]
    fn service_triple_is_closed_by_equities() {
        let alloc = ServiceAllocation {
            money_market: 45.0,
            fixed_income: 40.0,
            equities: 20.0,
        };
        let out = normalize_service_allocation(&alloc, 1_000.0).unwrap();
        assert_eq!(out[2].product_type, ProductType::Equities);
        assert_eq!(out[2].percentage, 15.0);
        assert_eq!(out.iter().map(|a| a.percentage).sum::<f64>(), 100.0);
    }

    #[test]
    fn profile_serializes_like_the_service() {
        let json = serde_json::to_value(investment_profile(80.0, 30)).unwrap();
        assert_eq!(json["risk_tolerance"], "HIGH");
        assert_eq!(json["investment_horizon"], "LONG");
        assert_eq!(json["portfolio_allocation"]["money_market"], 20.0);
    }

    #[test]
    fn normalized_profile_values_each_line() {
        let p = normalized_profile(investment_profile(80.0, 30), 200_000.0).unwrap();
        assert_eq!(p.allocations.len(), 3);
        assert_eq!(p.allocations[0].product_type, ProductType::MoneyMarket);
        assert_eq!(p.allocations[0].current_value, 40_000.0);
    }
}
