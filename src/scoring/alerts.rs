//! Concentration and liquidity classification.

use crate::domain::{
    ConcentrationAlert, LiquidityIndicator, LiquidityStatus, ProductType, Severity,
};
use crate::error::ScoreError;

/// Liquidity ratio above which holdings are healthy.
pub const LIQUIDITY_HEALTHY_ABOVE: f64 = 0.30;
/// Liquidity ratio above which holdings are only a warning.
pub const LIQUIDITY_WARNING_ABOVE: f64 = 0.15;

/// Excess over threshold (percentage points) where severity becomes medium.
pub const SEVERITY_MEDIUM_EXCESS: f64 = 10.0;
/// Excess over threshold (percentage points) where severity becomes high.
pub const SEVERITY_HIGH_EXCESS: f64 = 20.0;

/// Classify a liquidity ratio.
///
/// Strict `>` on both bands: exactly `0.30` is a warning, exactly `0.15` is
/// critical. A NaN ratio fails both comparisons and is critical.
pub fn liquidity_status(ratio: f64) -> LiquidityStatus {
    if ratio > LIQUIDITY_HEALTHY_ABOVE {
        LiquidityStatus::Healthy
    } else if ratio > LIQUIDITY_WARNING_ABOVE {
        LiquidityStatus::Warning
    } else {
        LiquidityStatus::Critical
    }
}

/// Liquid assets over total assets.
pub fn liquidity_ratio(liquid_assets: f64, total_assets: f64) -> Result<f64, ScoreError> {
    if !(liquid_assets.is_finite() && liquid_assets >= 0.0) {
        return Err(ScoreError::InvalidAmount {
            field: "liquid_assets",
            value: liquid_assets,
        });
    }
    if !(total_assets.is_finite() && total_assets > 0.0) {
        return Err(ScoreError::NonPositive {
            field: "total_assets",
            value: total_assets,
        });
    }
    Ok(liquid_assets / total_assets)
}

pub fn liquidity_indicator(
    customer_id: &str,
    liquid_assets: f64,
    total_assets: f64,
) -> Result<LiquidityIndicator, ScoreError> {
    let liquidity_ratio = liquidity_ratio(liquid_assets, total_assets)?;
    Ok(LiquidityIndicator {
        customer_id: customer_id.to_string(),
        liquid_assets,
        total_assets,
        liquidity_ratio,
        status: liquidity_status(liquidity_ratio),
    })
}

/// Severity of a concentration from its excess over the threshold.
///
/// `excess < 10 -> Low`, `excess < 20 -> Medium`, otherwise `High`
/// (percentage points, strict `<`). At or below the threshold the result is
/// `Low`; use `concentration_alert` to decide whether to raise an alert.
pub fn concentration_severity(concentration: f64, threshold: f64) -> Severity {
    let excess = concentration - threshold;
    if excess < SEVERITY_MEDIUM_EXCESS {
        Severity::Low
    } else if excess < SEVERITY_HIGH_EXCESS {
        Severity::Medium
    } else {
        Severity::High
    }
}

/// Raise an alert only when `concentration` is strictly above `threshold`.
pub fn concentration_alert(
    customer_id: &str,
    product_type: ProductType,
    concentration: f64,
    threshold: f64,
) -> Option<ConcentrationAlert> {
    if concentration > threshold {
        Some(ConcentrationAlert {
            customer_id: customer_id.to_string(),
            product_type,
            concentration,
            threshold,
            severity: concentration_severity(concentration, threshold),
        })
    } else {
        None
    }
}
