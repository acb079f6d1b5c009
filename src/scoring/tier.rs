//! Risk tiering.

use crate::domain::{RiskScore, RiskTier};
use crate::error::ScoreError;

/// Upper bound (exclusive) of the low tier.
pub const LOW_TIER_MAX: f64 = 0.33;
/// Upper bound (exclusive) of the medium tier.
pub const MEDIUM_TIER_MAX: f64 = 0.66;

/// Bucket a validated risk score.
///
/// Thresholds use strict `<`, so `0.33` is medium and `0.66` is high.
pub fn tier(score: RiskScore) -> RiskTier {
    let s = score.value();
    if s < LOW_TIER_MAX {
        RiskTier::Low
    } else if s < MEDIUM_TIER_MAX {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

/// Bucket a raw probability of default, rejecting values outside `[0, 1]`.
pub fn tier_of(raw: f64) -> Result<RiskTier, ScoreError> {
    Ok(tier(RiskScore::new(raw)?))
}

/// Human label for the score's tier: the tier name, capitalized.
pub fn label(score: RiskScore) -> String {
    tier_label(tier(score))
}

pub fn tier_label(tier: RiskTier) -> String {
    let name = tier.name();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
