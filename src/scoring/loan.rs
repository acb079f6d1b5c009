//! Loan ceiling and installment rules.

use crate::domain::RiskScore;
use crate::error::ScoreError;

/// Share of income that can be lent to a zero-risk applicant.
pub const INCOME_SHARE: f64 = 0.3;
/// How much of the income share a score of 1.0 takes away.
pub const RISK_HAIRCUT: f64 = 0.5;

/// Recommended loan ceiling: `floor(income * 0.3 * (1 - 0.5 * risk))`.
///
/// Decreasing in risk (30% of income at 0, 15% at 1) and increasing in
/// income. Always truncated to a whole currency unit.
pub fn recommended_loan(income: f64, risk: RiskScore) -> Result<u64, ScoreError> {
    if !(income.is_finite() && income >= 0.0) {
        return Err(ScoreError::InvalidAmount {
            field: "income",
            value: income,
        });
    }
    let base = income * INCOME_SHARE;
    let multiplier = 1.0 - risk.value() * RISK_HAIRCUT;
    Ok((base * multiplier).floor() as u64)
}

/// Monthly installment: `round(loan / tenor_months)`, halves rounding up.
pub fn monthly_installment(loan: u64, tenor_months: u32) -> Result<u64, ScoreError> {
    if tenor_months == 0 {
        return Err(ScoreError::ZeroTenor);
    }
    let tenor = u64::from(tenor_months);
    let rounded_up = (loan % tenor) * 2 >= tenor;
    Ok(loan / tenor + u64::from(rounded_up))
}

/// Parse the month count from a schedule label such as `"6 months"`.
///
/// Only the leading integer is read (`"12"` and `"12 months"` both give 12).
pub fn parse_tenor_months(label: &str) -> Result<u32, ScoreError> {
    let trimmed = label.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ScoreError::InvalidTenorLabel(label.to_string()));
    }
    let months: u32 = digits
        .parse()
        .map_err(|_| ScoreError::InvalidTenorLabel(label.to_string()))?;
    if months == 0 {
        return Err(ScoreError::ZeroTenor);
    }
    Ok(months)
}

/// Loan readiness in percent: `round((1 - risk) * 100)`.
pub fn loan_readiness(risk: RiskScore) -> u32 {
    ((1.0 - risk.value()) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: f64) -> RiskScore {
        RiskScore::new(v).unwrap()
    }

    #[test]
    fn loan_at_score_extremes() {
        assert_eq!(recommended_loan(1_000_000.0, score(0.0)), Ok(300_000));
        assert_eq!(recommended_loan(1_000_000.0, score(1.0)), Ok(150_000));
    }

    #[test]
    fn loan_floors_to_whole_units() {
        // 999 * 0.3 * 0.75 = 224.775
        assert_eq!(recommended_loan(999.0, score(0.5)), Ok(224));
        assert_eq!(recommended_loan(0.0, score(0.7)), Ok(0));
    }

    #[test]
    fn loan_is_monotone() {
        let income = 2_500_000.0;
        let mut prev = u64::MAX;
        for i in 0..=20 {
            let loan = recommended_loan(income, score(i as f64 / 20.0)).unwrap();
            assert!(loan <= prev, "loan must not increase with risk");
            prev = loan;
        }
        let low = recommended_loan(1_000_000.0, score(0.4)).unwrap();
        let high = recommended_loan(2_000_000.0, score(0.4)).unwrap();
        assert!(high > low);
    }

    #[test]
    fn loan_rejects_negative_income() {
        assert!(matches!(
            recommended_loan(-1.0, score(0.1)),
            Err(ScoreError::InvalidAmount { field: "income", .. })
        ));
        assert!(recommended_loan(f64::INFINITY, score(0.1)).is_err());
    }

    #[test]
    fn installment_divides_and_rounds() {
        assert_eq!(monthly_installment(300_000, 6), Ok(50_000));
        assert_eq!(monthly_installment(100, 3), Ok(33));
        assert_eq!(monthly_installment(101, 2), Ok(51));
        assert_eq!(monthly_installment(0, 12), Ok(0));
    }

    #[test]
    fn installment_rejects_zero_tenor() {
        assert_eq!(monthly_installment(300_000, 0), Err(ScoreError::ZeroTenor));
    }

    #[test]
    fn tenor_labels() {
        assert_eq!(parse_tenor_months("6 months"), Ok(6));
        assert_eq!(parse_tenor_months(" 18 months "), Ok(18));
        assert_eq!(parse_tenor_months("12"), Ok(12));
        assert_eq!(parse_tenor_months("0 months"), Err(ScoreError::ZeroTenor));
        assert!(matches!(
            parse_tenor_months("monthly"),
            Err(ScoreError::InvalidTenorLabel(_))
        ));
        assert!(parse_tenor_months("-3 months").is_err());
    }

    #[test]
    fn readiness_is_complement_percent() {
        assert_eq!(loan_readiness(score(0.0)), 100);
        assert_eq!(loan_readiness(score(0.25)), 75);
        assert_eq!(loan_readiness(score(1.0)), 0);
    }
}
