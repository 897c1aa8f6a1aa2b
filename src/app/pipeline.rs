//! Shared "estimate pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! credit score -> rate lookup (once) -> payment per term (in input order)
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{Estimate, EstimateConfig, LoanQuery, PaymentResult, RateTable, ZeroRatePolicy};
use crate::payment::{format_usd, monthly_payment};
use crate::rates::{interest_rate, qualifying_tier};

/// Build the payment table for one (principal, credit score) pair.
///
/// One row per entry of `terms`, in the same order. Duplicated terms produce
/// duplicated rows.
pub fn estimate(
    principal: f64,
    credit_score: f64,
    terms: &[u32],
    table: &RateTable,
    zero_rate: ZeroRatePolicy,
) -> Estimate {
    let rate = interest_rate(credit_score, table);
    let tier = qualifying_tier(credit_score, table).map(|t| t.label.clone());

    let rows = terms
        .iter()
        .map(|&term_months| {
            let query = LoanQuery {
                principal,
                credit_score,
                term_months,
            };
            payment_row(&query, rate, zero_rate)
        })
        .collect();

    tracing::debug!(principal, credit_score, rate, terms = terms.len(), "computed estimate");

    Estimate {
        principal,
        credit_score,
        rate,
        tier,
        rows,
    }
}

/// Run the pipeline for a full configuration.
pub fn run_estimate(config: &EstimateConfig) -> Estimate {
    estimate(
        config.principal,
        f64::from(config.credit_score),
        &config.terms,
        &config.table,
        config.zero_rate,
    )
}

/// Price a single query at a rate that has already been looked up.
pub fn payment_row(query: &LoanQuery, rate: f64, zero_rate: ZeroRatePolicy) -> PaymentResult {
    let monthly = monthly_payment(query.principal, rate, query.term_months, zero_rate);
    PaymentResult {
        term_months: query.term_months,
        monthly_payment: monthly,
        formatted: format_usd(monthly),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_TERMS;

    fn default_estimate(principal: f64, score: f64) -> Estimate {
        estimate(
            principal,
            score,
            &DEFAULT_TERMS,
            &RateTable::default(),
            ZeroRatePolicy::StraightLine,
        )
    }

    #[test]
    fn rows_follow_term_order_and_decrease() {
        let est = default_estimate(15_000.0, 600.0);
        let terms: Vec<u32> = est.rows.iter().map(|r| r.term_months).collect();
        assert_eq!(terms, DEFAULT_TERMS);
        for pair in est.rows.windows(2) {
            assert!(pair[1].monthly_payment < pair[0].monthly_payment);
            assert_ne!(pair[1].formatted, pair[0].formatted);
        }
        assert_eq!(est.rate, 7.1);
        assert_eq!(est.tier.as_deref(), Some("Fair"));
        assert_eq!(est.rows[2].formatted, "$297.73");
    }

    #[test]
    fn below_floor_estimate_has_no_tier() {
        let est = default_estimate(15_000.0, 500.0);
        assert_eq!(est.rate, 10.0);
        assert!(est.tier.is_none());
        assert_eq!(est.rows[0].formatted, "$484.01");
    }

    #[test]
    fn custom_term_order_is_preserved() {
        let est = estimate(
            10_000.0,
            700.0,
            &[84, 36, 60],
            &RateTable::default(),
            ZeroRatePolicy::StraightLine,
        );
        let terms: Vec<u32> = est.rows.iter().map(|r| r.term_months).collect();
        assert_eq!(terms, [84, 36, 60]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let config = EstimateConfig::default();
        assert_eq!(run_estimate(&config), run_estimate(&config));
    }

    #[test]
    fn empty_terms_give_empty_table() {
        let est = estimate(1.0, 700.0, &[], &RateTable::default(), ZeroRatePolicy::StraightLine);
        assert!(est.rows.is_empty());
        assert_eq!(est.rate, 6.5);
    }
}
