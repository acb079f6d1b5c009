//! Ranking of explainability factors.

use std::cmp::Ordering;

use crate::domain::FeatureContribution;

/// Factors sorted by `|contribution|`, largest first.
///
/// The sort is stable, so equal magnitudes keep their input order. The input
/// is left untouched and nothing is truncated; use `top` for a prefix.
pub fn rank(factors: &[FeatureContribution]) -> Vec<FeatureContribution> {
    let mut ranked = factors.to_vec();
    ranked.sort_by(|a, b| by_magnitude_desc(a.contribution, b.contribution));
    ranked
}

/// The `n` highest-magnitude factors.
pub fn top(factors: &[FeatureContribution], n: usize) -> Vec<FeatureContribution> {
    let mut ranked = rank(factors);
    ranked.truncate(n);
    ranked
}

/// Positive and negative drivers, strongest first, each capped at `n`.
///
/// Zero contributions belong to neither side.
pub fn split_by_sign(
    factors: &[FeatureContribution],
    n: usize,
) -> (Vec<FeatureContribution>, Vec<FeatureContribution>) {
    let ranked = rank(factors);
    let positive = ranked
        .iter()
        .filter(|f| f.contribution > 0.0)
        .take(n)
        .cloned()
        .collect();
    let negative = ranked
        .iter()
        .filter(|f| f.contribution < 0.0)
        .take(n)
        .cloned()
        .collect();
    (positive, negative)
}

fn by_magnitude_desc(a: f64, b: f64) -> Ordering {
    b.abs().partial_cmp(&a.abs()).unwrap_or(Ordering::Equal)
}
