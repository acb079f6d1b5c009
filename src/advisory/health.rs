//! Financial health scoring.

use crate::domain::{DerivedFeatures, FinancialHealth, HealthBand};

pub const LATE_PAYMENT_PENALTY: f64 = 10.0;
pub const UTILIZATION_PENALTY: f64 = 25.0;
pub const VOLATILITY_PENALTY: f64 = 20.0;
pub const CONSISTENCY_BONUS: f64 = 20.0;

/// Financial health on a 0..100 scale, rounded to two decimals.
///
/// `100 - 10*late - 25*utilization - 20*(volatility / avg_bill) + 20*consistency`,
/// clamped to `[0, 100]`. An average bill of 0 is treated as 1.
pub fn financial_health(features: &DerivedFeatures) -> FinancialHealth {
    let avg_bill = if features.avg_bill_amt == 0.0 {
        1.0
    } else {
        features.avg_bill_amt
    };

    let raw = 100.0
        - f64::from(features.late_payment_count) * LATE_PAYMENT_PENALTY
        - features.credit_utilization * UTILIZATION_PENALTY
        - (features.cashflow_volatility / avg_bill) * VOLATILITY_PENALTY
        + features.payment_consistency * CONSISTENCY_BONUS;

    let score = round2(raw.clamp(0.0, 100.0));

    FinancialHealth {
        financial_health_score: score,
        health_band: health_band(score),
    }
}

/// `>= 80` Strong, `>= 50` Moderate, otherwise Fragile.
pub fn health_band(score: f64) -> HealthBand {
    if score >= 80.0 {
        HealthBand::Strong
    } else if score >= 50.0 {
        HealthBand::Moderate
    } else {
        HealthBand::Fragile
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::features::derive_features;
    use crate::advisory::features::tests::financials;

    #[test]
    fn steady_payer_is_strong() {
        let features = derive_features(&financials(200_000.0, [0; 6], [50_000.0; 6], [10_000.0; 6]));
        let health = financial_health(&features);
        assert!((health.financial_health_score - 97.75).abs() < 1e-9);
        assert_eq!(health.health_band, HealthBand::Strong);
    }

    #[test]
    fn late_payer_is_fragile() {
        let features = derive_features(&financials(
            50_000.0,
            [2; 6],
            [48_000.0, 49_000.0, 50_000.0, 51_000.0, 52_000.0, 53_000.0],
            [0.0; 6],
        ));
        let health = financial_health(&features);
        // Six late months alone take the score to zero.
        assert_eq!(health.financial_health_score, 0.0);
        assert_eq!(health.health_band, HealthBand::Fragile);
    }

    #[test]
    fn score_is_clamped_at_100() {
        let features = DerivedFeatures {
            avg_bill_amt: 0.0,
            avg_pay_amt: 100.0,
            credit_utilization: 0.0,
            payment_consistency: 2.0,
            late_payment_count: 0,
            severe_delinquency: false,
            cashflow_volatility: 0.0,
            ratio_volatility: 0.0,
        };
        assert_eq!(financial_health(&features).financial_health_score, 100.0);
    }

    #[test]
    fn band_edges() {
        assert_eq!(health_band(80.0), HealthBand::Strong);
        assert_eq!(health_band(79.99), HealthBand::Moderate);
        assert_eq!(health_band(50.0), HealthBand::Moderate);
        assert_eq!(health_band(49.99), HealthBand::Fragile);
    }
}
