//! Derived applicant features.
//!
//! All features are computed from the six-month statement, payment, and
//! delay-code history carried by `ApplicantFinancials`. Denominators that
//! would be zero are replaced by 1 rather than failing.

use crate::domain::{ApplicantFinancials, DerivedFeatures};

/// Utilization is clamped to this ceiling.
pub const MAX_CREDIT_UTILIZATION: f64 = 1.5;
/// Payment consistency is clamped to this ceiling.
pub const MAX_PAYMENT_CONSISTENCY: f64 = 2.0;
/// Delay code at or above which an applicant counts as severely delinquent.
pub const SEVERE_DELAY_CODE: i32 = 3;

pub fn derive_features(fin: &ApplicantFinancials) -> DerivedFeatures {
    let bills = fin.bill_amounts();
    let pays = fin.pay_amounts();
    let delays = fin.delay_codes();

    let avg_bill_amt = mean(&bills);
    let avg_pay_amt = mean(&pays);

    let limit = non_zero(fin.limit_bal);
    let credit_utilization = (avg_bill_amt / limit).clamp(0.0, MAX_CREDIT_UTILIZATION);

    let sum_bill: f64 = bills.iter().sum();
    let sum_pay: f64 = pays.iter().sum();
    let payment_consistency = (sum_pay / non_zero(sum_bill)).clamp(0.0, MAX_PAYMENT_CONSISTENCY);

    let late_payment_count = delays.iter().filter(|&&d| d > 0).count() as u32;
    let severe_delinquency = delays.iter().any(|&d| d >= SEVERE_DELAY_CODE);

    let cashflow_volatility = sample_std(&bills);

    let ratios: Vec<f64> = pays
        .iter()
        .zip(bills.iter())
        .map(|(p, b)| p / b.max(1.0))
        .collect();
    let ratio_volatility = sample_std(&ratios);

    DerivedFeatures {
        avg_bill_amt,
        avg_pay_amt,
        credit_utilization,
        payment_consistency,
        late_payment_count,
        severe_delinquency,
        cashflow_volatility,
        ratio_volatility,
    }
}

fn non_zero(v: f64) -> f64 {
    if v == 0.0 { 1.0 } else { v }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); 0 for fewer than two values.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0);
    var.sqrt()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn financials(limit: f64, delays: [i32; 6], bills: [f64; 6], pays: [f64; 6]) -> ApplicantFinancials {
        ApplicantFinancials {
            limit_bal: limit,
            age: 30,
            sex: 2,
            education: 2,
            marriage: 2,
            pay_0: delays[0],
            pay_2: delays[1],
            pay_3: delays[2],
            pay_4: delays[3],
            pay_5: delays[4],
            pay_6: delays[5],
            bill_amt1: bills[0],
            bill_amt2: bills[1],
            bill_amt3: bills[2],
            bill_amt4: bills[3],
            bill_amt5: bills[4],
            bill_amt6: bills[5],
            pay_amt1: pays[0],
            pay_amt2: pays[1],
            pay_amt3: pays[2],
            pay_amt4: pays[3],
            pay_amt5: pays[4],
            pay_amt6: pays[5],
        }
    }

    #[test]
    fn flat_history() {
        let f = derive_features(&financials(200_000.0, [0; 6], [50_000.0; 6], [10_000.0; 6]));
        assert!((f.avg_bill_amt - 50_000.0).abs() < 1e-9);
        assert!((f.avg_pay_amt - 10_000.0).abs() < 1e-9);
        assert!((f.credit_utilization - 0.25).abs() < 1e-12);
        assert!((f.payment_consistency - 0.2).abs() < 1e-12);
        assert_eq!(f.late_payment_count, 0);
        assert!(!f.severe_delinquency);
        assert!(f.cashflow_volatility.abs() < 1e-9);
        assert!(f.ratio_volatility.abs() < 1e-12);
    }

    #[test]
    fn delinquent_history() {
        let f = derive_features(&financials(
            50_000.0,
            [2, 2, 3, 0, -1, 2],
            [48_000.0, 49_000.0, 50_000.0, 51_000.0, 52_000.0, 53_000.0],
            [0.0; 6],
        ));
        assert_eq!(f.late_payment_count, 4);
        assert!(f.severe_delinquency);
        assert!((f.credit_utilization - 1.01).abs() < 1e-9);
        assert_eq!(f.payment_consistency, 0.0);
        // std of 48k..53k step 1k, n-1 denominator: sqrt(3.5) * 1000
        assert!((f.cashflow_volatility - 3.5f64.sqrt() * 1000.0).abs() < 1e-6);
    }

    #[test]
    fn clamps_and_zero_denominators() {
        let f = derive_features(&financials(0.0, [0; 6], [10.0; 6], [0.0; 6]));
        // limit 0 is treated as 1, so utilization is clamped.
        assert_eq!(f.credit_utilization, MAX_CREDIT_UTILIZATION);

        let f = derive_features(&financials(1_000.0, [0; 6], [0.0; 6], [500.0; 6]));
        assert_eq!(f.payment_consistency, MAX_PAYMENT_CONSISTENCY);
        // bills of 0 use max(bill, 1) for the monthly ratio.
        assert!(f.ratio_volatility.abs() < 1e-12);
    }
}
