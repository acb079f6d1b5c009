//! Terminal output for every subcommand.
//!
//! All functions here build and return `String`s; printing happens in `app`.

use crate::advisory::NormalizedProfile;
use crate::app::pipeline::{ApplicantRun, Assessment, HealthRun};
use crate::domain::{FeatureContribution, RiskTier, ScoredApplicant, Severity};
use crate::io::ingest::RowError;
use crate::report::{BookSummary, PortfolioReport, ScoreFailure};
use crate::scoring::tier_label;

/// Format the applicant-book header: ingest stats and tier breakdown.
pub fn format_book_summary(run: &ApplicantRun) -> String {
    let summary: &BookSummary = &run.summary;
    let mut out = String::new();

    out.push_str("=== scout - Applicant Book ===\n");
    out.push_str(&format!(
        "Rows: read={} | used={} | skipped={} | unscorable={}\n",
        run.ingest.rows_read,
        run.ingest.rows_used(),
        run.ingest.row_errors.len(),
        run.failures.len(),
    ));

    let avg = summary
        .average_risk_score
        .map(|v| format!("{v:.3}"))
        .unwrap_or_else(|| "n/a".to_string());
    out.push_str(&format!(
        "Applicants: {} | avg risk score: {avg} | total recommended loan: {}\n",
        summary.total,
        fmt_amount(summary.total_recommended_loan),
    ));

    for tier in RiskTier::ALL {
        let share = summary
            .tier_share(tier)
            .map(|v| format!("{v:.1}%"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "  {:<12} {:>6} {:>8}\n",
            tier_label(tier),
            summary.tiers.get(tier),
            share
        ));
    }
    out.push('\n');

    out
}

/// Format the scored applicant table (already filtered, sorted and truncated).
pub fn format_applicant_table(rows: &[ScoredApplicant]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:<20} {:>4} {:>12} {:>6} {:<8} {:>12} {:>6} {:>12} {:>5}",
            "id", "name", "age", "income", "risk", "tier", "loan", "tenor", "installment", "ready"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<10} {:-<20} {:-<4} {:-<12} {:-<6} {:-<8} {:-<12} {:-<6} {:-<12} {:-<5}",
            "", "", "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in rows {
        let a = &r.applicant;
        out.push_str(
            format!(
                "{:<10} {:<20} {:>4} {:>12.0} {:>6.3} {:<8} {:>12} {:>6} {:>12} {:>5}",
                truncate(&a.id, 10),
                truncate(&a.name, 20),
                a.age,
                a.income,
                a.risk_score.value(),
                r.label,
                fmt_amount(r.recommended_loan),
                r.tenor_months,
                fmt_amount(r.monthly_installment),
                r.loan_readiness,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format skipped CSV rows and applicants that failed scoring.
pub fn format_row_errors(row_errors: &[RowError], failures: &[ScoreFailure]) -> String {
    let mut out = String::new();
    if row_errors.is_empty() && failures.is_empty() {
        return out;
    }

    out.push_str("\nSkipped rows:\n");
    for e in row_errors {
        let id = e.id.as_deref().unwrap_or("?");
        out.push_str(&format!("  line {:>5} [{id}] {}\n", e.line, e.message));
    }
    for f in failures {
        out.push_str(&format!("  applicant [{}] {}\n", f.id, f.error));
    }

    out
}

/// Format one portfolio: allocations, rebalancing, alerts and liquidity.
pub fn format_portfolio_report(report: &PortfolioReport) -> String {
    let mut out = String::new();

    let name = if report.customer_name.is_empty() {
        report.customer_id.as_str()
    } else {
        report.customer_name.as_str()
    };
    out.push_str(&format!("=== Portfolio: {name} ({}) ===\n", report.customer_id));
    out.push_str(&format!("Total value: {:.2}\n", report.total_value));
    if let Some(date) = report.last_rebalanced {
        out.push_str(&format!("Last rebalanced: {date}\n"));
    }

    out.push_str("\nAllocation:\n");
    for (a, s) in report.allocations.iter().zip(&report.rebalancing) {
        out.push_str(&format!(
            "  {:<14} {:>7.2}% {:>16.2}  target {:>6.2}%  {:<8} {:>14.2}\n",
            a.product_type.display_name(),
            a.percentage,
            a.current_value,
            s.target_percentage,
            format!("{:?}", s.action).to_lowercase(),
            s.amount,
        ));
    }

    if report.concentration_alerts.is_empty() {
        out.push_str("\nConcentration: ok\n");
    } else {
        out.push_str("\nConcentration alerts:\n");
        for alert in &report.concentration_alerts {
            out.push_str(&format!(
                "  [{}] {} at {:.2}% (limit {:.2}%)\n",
                severity_name(alert.severity),
                alert.product_type.display_name(),
                alert.concentration,
                alert.threshold,
            ));
        }
    }

    match &report.liquidity {
        Some(l) => out.push_str(&format!(
            "Liquidity: {:.1}% liquid ({:?})\n",
            l.liquidity_ratio * 100.0,
            l.status
        )),
        None => out.push_str("Liquidity: n/a\n"),
    }
    out.push('\n');

    out
}

/// Format contributions as a ranked list, largest magnitude first.
pub fn format_ranked_factors(factors: &[FeatureContribution]) -> String {
    let mut out = String::new();
    for (i, f) in factors.iter().enumerate() {
        let direction = if f.contribution < 0.0 { "lowers" } else { "raises" };
        out.push_str(&format!(
            "{:>3}. {:<28} {:>+8.2} ({direction} score)",
            i + 1,
            truncate(&f.feature, 28),
            f.contribution,
        ));
        if !f.description.is_empty() {
            out.push_str(&format!("  {}", f.description));
        }
        out.push('\n');
    }
    out
}

/// Format locally derived features, health and investment profile.
pub fn format_health(run: &HealthRun) -> String {
    let mut out = String::new();
    let f = &run.features;

    out.push_str("=== Financial Health ===\n");
    out.push_str(&format!(
        "Score: {:.2} ({:?})\n",
        run.health.financial_health_score, run.health.health_band
    ));
    out.push_str(&format!(
        "Utilization: {:.3} | Consistency: {:.3} | Late payments: {} | Severe delinquency: {}\n",
        f.credit_utilization,
        f.payment_consistency,
        f.late_payment_count,
        if f.severe_delinquency { "yes" } else { "no" },
    ));
    out.push_str(&format!(
        "Avg bill: {:.2} | Avg payment: {:.2} | Cashflow volatility: {:.2}\n",
        f.avg_bill_amt, f.avg_pay_amt, f.cashflow_volatility
    ));
    out.push('\n');
    out.push_str(&format_profile(&run.profile));

    out
}

/// Format a live assessment from the scoring services.
pub fn format_assessment(a: &Assessment) -> String {
    let mut out = String::new();
    let credit = &a.credit;

    out.push_str(&format!("=== Assessment ({}) ===\n", a.base_url));
    out.push_str(&format!(
        "Credit score: {:.0} | PD: {:.4} | tier: {} (service: {})\n",
        credit.credit_score,
        credit.probability_of_default.value(),
        a.label,
        tier_label(credit.risk_tier),
    ));
    out.push_str(&format!(
        "Recommended loan: {} {} over {} months | installment: {} | readiness: {}\n",
        fmt_amount(a.recommended_loan),
        credit.currency.as_deref().unwrap_or(""),
        credit.recommended_tenor_months,
        fmt_amount(a.monthly_installment),
        a.loan_readiness,
    ));
    out.push_str(&format!(
        "Financial health: {:.2} ({:?})\n",
        a.health.financial_health_score, a.health.health_band
    ));

    out.push_str("\nTop factors:\n");
    out.push_str(&format_ranked_factors(&a.factors));
    out.push('\n');
    out.push_str(&format_profile(&a.profile));

    out
}

fn format_profile(p: &NormalizedProfile) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Risk tolerance: {:?} | Horizon: {:?}\n",
        p.profile.risk_tolerance, p.profile.investment_horizon
    ));
    for a in &p.allocations {
        out.push_str(&format!(
            "  {:<14} {:>7.2}% {:>16.2}\n",
            a.product_type.display_name(),
            a.percentage,
            a.current_value
        ));
    }
    out
}

fn severity_name(s: Severity) -> &'static str {
    match s {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "high",
    }
}

/// Thousands-separated whole amount.
fn fmt_amount(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
