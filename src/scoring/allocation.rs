//! Portfolio allocation normalization and rebalancing.
//!
//! Normalization walks the targets in order and gives the final entry
//! whatever is left of 100%. Residual error from earlier entries is absorbed
//! by the last entry only; it is never spread proportionally.

use log::debug;

use crate::domain::{AllocationTarget, AssetAllocation, RebalanceAction, RebalancingSuggestion};
use crate::error::ScoreError;

/// Normalize ordered allocation targets so percentages sum to 100.
///
/// Every entry but the last takes its desired percentage out of a running
/// budget that starts at 100; the last entry receives the remainder. A single
/// entry therefore always receives 100%.
///
/// `current_value = total_value * percentage / 100`.
pub fn normalize(
    targets: &[AllocationTarget],
    total_value: f64,
) -> Result<Vec<AssetAllocation>, ScoreError> {
    let Some((last, head)) = targets.split_last() else {
        return Err(ScoreError::EmptyAllocation);
    };
    if !(total_value.is_finite() && total_value >= 0.0) {
        return Err(ScoreError::InvalidAmount {
            field: "total_value",
            value: total_value,
        });
    }

    let mut out = Vec::with_capacity(targets.len());
    let mut remaining = 100.0;

    for target in head {
        let pct = target.desired_percentage;
        if !(pct.is_finite() && pct >= 0.0 && pct <= remaining) {
            return Err(ScoreError::InvalidPercentage {
                product: target.product_type.display_name().to_string(),
                value: pct,
                remaining,
            });
        }
        remaining -= pct;
        out.push(allocation(target, pct, total_value));
    }

    if last.desired_percentage != remaining {
        debug!(
            "{} absorbs remainder {remaining} (desired {})",
            last.product_type.display_name(),
            last.desired_percentage
        );
    }
    out.push(allocation(last, remaining, total_value));

    Ok(out)
}

fn allocation(target: &AllocationTarget, pct: f64, total_value: f64) -> AssetAllocation {
    AssetAllocation {
        product_type: target.product_type,
        percentage: pct,
        current_value: current_value(total_value, pct),
        target_percentage: target.target_percentage.unwrap_or(pct),
    }
}

/// Monetary value of a percentage share of `total_value`.
pub fn current_value(total_value: f64, percentage: f64) -> f64 {
    total_value * (percentage / 100.0)
}

/// Split 100% across `n` products as evenly as whole percents allow.
///
/// Entry `i` takes `floor(remaining / (n - i))`; the last takes the remainder,
/// so `split_evenly(3) == [33, 33, 34]`.
pub fn split_evenly(n: usize) -> Result<Vec<u32>, ScoreError> {
    if n == 0 {
        return Err(ScoreError::EmptyAllocation);
    }
    let mut remaining: u32 = 100;
    let mut out = Vec::with_capacity(n);
    for idx in 0..n {
        let pct = if idx == n - 1 {
            remaining
        } else {
            remaining / (n - idx) as u32
        };
        remaining -= pct;
        out.push(pct);
    }
    Ok(out)
}

/// Suggest how to move each allocation toward its target percentage.
///
/// `delta = target - current`. Lines with `|delta| <= tolerance` are `Hold`;
/// otherwise the action follows the sign of `delta` and `amount` is the
/// monetary size of the move, `total_value * |delta| / 100`.
pub fn rebalancing_suggestions(
    allocations: &[AssetAllocation],
    total_value: f64,
    tolerance: f64,
) -> Vec<RebalancingSuggestion> {
    allocations
        .iter()
        .map(|a| {
            let delta = a.target_percentage - a.percentage;
            let action = if delta.abs() <= tolerance {
                RebalanceAction::Hold
            } else if delta > 0.0 {
                RebalanceAction::Increase
            } else {
                RebalanceAction::Decrease
            };
            let amount = match action {
                RebalanceAction::Hold => 0.0,
                _ => current_value(total_value, delta.abs()),
            };
            RebalancingSuggestion {
                product_type: a.product_type,
                current_percentage: a.percentage,
                target_percentage: a.target_percentage,
                action,
                amount,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductType;

    fn targets(pcts: &[f64]) -> Vec<AllocationTarget> {
        let kinds = [
            ProductType::FixedIncome,
            ProductType::MoneyMarket,
            ProductType::Equities,
            ProductType::RealEstate,
            ProductType::Commodities,
        ];
        pcts.iter()
            .zip(kinds.iter().cycle())
            .map(|(p, k)| AllocationTarget::new(*k, *p))
            .collect()
    }

    #[test]
    fn last_entry_absorbs_remainder() {
        let out = normalize(&targets(&[35.0, 25.0, 20.0, 99.0]), 1_000_000.0).unwrap();
        let pcts: Vec<f64> = out.iter().map(|a| a.percentage).collect();
        assert_eq!(pcts, vec![35.0, 25.0, 20.0, 20.0]);
        assert_eq!(pcts.iter().sum::<f64>(), 100.0);
        assert!((out[3].current_value - 200_000.0).abs() < 1e-9);
        assert_eq!(out[3].product_type, ProductType::RealEstate);
    }

    #[test]
    fn closure_holds_for_many_lists() {
        let lists: Vec<Vec<f64>> = vec![
            vec![10.0],
            vec![50.0, 10.0],
            vec![40.0, 30.0, 5.0],
            vec![12.0, 17.0, 11.0, 23.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ];
        for list in lists {
            let out = normalize(&targets(&list), 500.0).unwrap();
            let n = out.len();
            let head_sum: f64 = out[..n - 1].iter().map(|a| a.percentage).sum();
            assert_eq!(out[n - 1].percentage, 100.0 - head_sum);
            assert_eq!(out.iter().map(|a| a.percentage).sum::<f64>(), 100.0);
        }
    }

    #[test]
    fn single_entry_gets_everything() {
        let out = normalize(&targets(&[42.0]), 10.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].percentage, 100.0);
        assert_eq!(out[0].current_value, 10.0);
        assert_eq!(out[0].target_percentage, 100.0);
    }

    #[test]
    fn explicit_target_percentage_is_kept() {
        let mut t = targets(&[60.0, 40.0]);
        t[0].target_percentage = Some(55.0);
        let out = normalize(&t, 100.0).unwrap();
        assert_eq!(out[0].target_percentage, 55.0);
        assert_eq!(out[1].target_percentage, 40.0);
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(normalize(&[], 100.0), Err(ScoreError::EmptyAllocation));
    }

    #[test]
    fn overdrawn_budget_fails() {
        let err = normalize(&targets(&[70.0, 40.0, 10.0]), 100.0).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidPercentage { value, .. } if value == 40.0));
        assert!(normalize(&targets(&[-5.0, 10.0]), 100.0).is_err());
        assert!(normalize(&targets(&[50.0, 50.0]), -1.0).is_err());
    }

    #[test]
    fn normalize_is_idempotent() {
        let t = targets(&[30.0, 30.0, 10.0]);
        assert_eq!(normalize(&t, 750.0), normalize(&t, 750.0));
    }

    #[test]
    fn even_split() {
        assert_eq!(split_evenly(1).unwrap(), vec![100]);
        assert_eq!(split_evenly(3).unwrap(), vec![33, 33, 34]);
        assert_eq!(split_evenly(4).unwrap(), vec![25, 25, 25, 25]);
        assert_eq!(split_evenly(7).unwrap().iter().sum::<u32>(), 100);
        assert_eq!(split_evenly(0), Err(ScoreError::EmptyAllocation));
    }

    #[test]
    fn rebalancing_actions() {
        let allocations = vec![
            AssetAllocation {
                product_type: ProductType::Equities,
                percentage: 40.0,
                current_value: 400.0,
                target_percentage: 25.0,
            },
            AssetAllocation {
                product_type: ProductType::FixedIncome,
                percentage: 30.0,
                current_value: 300.0,
                target_percentage: 40.0,
            },
            AssetAllocation {
                product_type: ProductType::MoneyMarket,
                percentage: 30.0,
                current_value: 300.0,
                target_percentage: 31.0,
            },
        ];
        let out = rebalancing_suggestions(&allocations, 1_000.0, 2.0);
        assert_eq!(out[0].action, RebalanceAction::Decrease);
        assert!((out[0].amount - 150.0).abs() < 1e-9);
        assert_eq!(out[1].action, RebalanceAction::Increase);
        assert!((out[1].amount - 100.0).abs() < 1e-9);
        assert_eq!(out[2].action, RebalanceAction::Hold);
        assert_eq!(out[2].amount, 0.0);
    }
}
