//! Formatted terminal output: summary header, payment table, tier table.
//!
//! We keep formatting code in one place so:
//! - the calculators stay clean and testable
//! - output changes are localized (the tests below pin exact strings)

use crate::domain::{Estimate, EstimateConfig, RateTable};
use crate::payment::format_usd;

/// Format the run summary (inputs + applied rate).
pub fn format_summary(estimate: &Estimate, config: &EstimateConfig) -> String {
    let mut out = String::new();

    out.push_str("=== loan - Monthly Payment Estimate ===\n");
    out.push_str(&format!("Loan amount: {}\n", format_usd(estimate.principal)));
    out.push_str(&format!(
        "Credit score: {} ({})\n",
        estimate.credit_score,
        estimate.tier_label()
    ));
    out.push_str(&format!("Rate: {:.2}% APR\n", estimate.rate));
    let source = config
        .tiers_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    out.push_str(&format!("Tiers: {source}\n"));
    out.push('\n');

    out
}

/// Format the two-column Months / Payment table.
pub fn format_payment_table(estimate: &Estimate) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8} {:>14}\n", "Months", "Payment"));
    out.push_str(&format!("{:-<8} {:-<14}\n", "", ""));
    for row in &estimate.rows {
        out.push_str(&format!("{:<8} {:>14}\n", row.term_months, row.formatted));
    }
    out
}

/// Format the tier table, lowest band first.
pub fn format_tier_table(table: &RateTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12} {:<14} {:>7}\n", "Score", "Tier", "Rate"));
    out.push_str(&format!("{:-<12} {:-<14} {:-<7}\n", "", "", ""));

    let tiers = table.tiers();
    if let Some(first) = tiers.first() {
        out.push_str(&format!(
            "{:<12} {:<14} {:>6.2}%\n",
            format!("< {}", first.threshold),
            crate::domain::BELOW_FLOOR_LABEL,
            table.below_floor_rate()
        ));
    }
    for (i, tier) in tiers.iter().enumerate() {
        let band = match tiers.get(i + 1) {
            Some(next) => format!("{}-{}", tier.threshold, next.threshold),
            None => format!(">= {}", tier.threshold),
        };
        out.push_str(&format!("{:<12} {:<14} {:>6.2}%\n", band, tier.label, tier.rate));
    }
    out
}

/// Format a one-line rate answer (for `loan rate`).
pub fn format_rate_line(score: f64, rate: f64, label: &str) -> String {
    format!("{score} -> {rate:.2}% ({label})")
}
