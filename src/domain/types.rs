//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the calculators and the TUI
//! - loaded from a tier JSON file
//! - exported to JSON/CSV

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Lowest credit score the inputs accept.
pub const CREDIT_SCORE_MIN: u16 = 300;
/// Highest credit score the inputs accept.
pub const CREDIT_SCORE_MAX: u16 = 850;
/// Slider step for the credit score control.
pub const CREDIT_SCORE_STEP: u16 = 10;
/// Credit score the UI starts from.
pub const DEFAULT_CREDIT_SCORE: u16 = 600;
/// Loan amount the UI starts from.
pub const DEFAULT_LOAN_AMOUNT: f64 = 15_000.0;

/// Loan durations (months) shown in the payment table, in display order.
pub const DEFAULT_TERMS: [u32; 5] = [36, 48, 60, 72, 84];

/// Rate charged to scores below the lowest tier threshold.
pub const DEFAULT_BELOW_FLOOR_RATE: f64 = 10.0;

/// Label shown for scores below the lowest tier threshold.
pub const BELOW_FLOOR_LABEL: &str = "Below Fair";

/// Built-in tier table: `(threshold, label, rate %)`, ascending by threshold.
pub const DEFAULT_TIERS: [(f64, &str, f64); 4] = [
    (580.0, "Fair", 7.1),
    (670.0, "Good", 6.5),
    (740.0, "Very Good", 6.0),
    (800.0, "Excellent", 5.5),
];

/// A credit-score band.
///
/// `threshold` is an exclusive upper bound: a score qualifies for this tier's
/// rate once it reaches the threshold, and keeps it until the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    pub threshold: f64,
    pub label: String,
    /// Annual rate in percent (e.g. `7.1`).
    pub rate: f64,
}

impl RateTier {
    pub fn new(threshold: f64, label: impl Into<String>, rate: f64) -> Self {
        Self {
            threshold,
            label: label.into(),
            rate,
        }
    }
}

/// An ordered, validated tier table.
///
/// Invariants (checked by [`RateTable::new`]):
/// - at least one tier
/// - thresholds strictly increasing
/// - every threshold and rate finite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    tiers: Vec<RateTier>,
    below_floor_rate: f64,
}

impl RateTable {
    pub fn new(tiers: Vec<RateTier>, below_floor_rate: f64) -> Result<Self, AppError> {
        if tiers.is_empty() {
            return Err(AppError::input("tier table must contain at least one tier"));
        }
        if !below_floor_rate.is_finite() {
            return Err(AppError::input(format!(
                "below-floor rate must be finite (got {below_floor_rate})"
            )));
        }
        for tier in &tiers {
            if !(tier.threshold.is_finite() && tier.rate.is_finite()) {
                return Err(AppError::input(format!(
                    "tier '{}' has a non-finite threshold or rate",
                    tier.label
                )));
            }
        }
        for pair in tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(AppError::input(format!(
                    "tier thresholds must be strictly increasing ('{}' at {} follows '{}' at {})",
                    pair[1].label, pair[1].threshold, pair[0].label, pair[0].threshold
                )));
            }
        }
        Ok(Self {
            tiers,
            below_floor_rate,
        })
    }

    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }

    pub fn below_floor_rate(&self) -> f64 {
        self.below_floor_rate
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_TIERS
                .iter()
                .map(|&(threshold, label, rate)| RateTier::new(threshold, label, rate))
                .collect(),
            below_floor_rate: DEFAULT_BELOW_FLOOR_RATE,
        }
    }
}

/// How the payment calculator treats a 0% rate.
///
/// The amortization factor is `0 / 0` when the monthly rate is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroRatePolicy {
    /// Repay the principal in equal slices: `principal / term`.
    #[default]
    StraightLine,
    /// Keep the raw formula result (NaN).
    Indeterminate,
}

/// A single payment question: how much per month for this amount, score and term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanQuery {
    pub principal: f64,
    pub credit_score: f64,
    pub term_months: u32,
}

/// One row of the payment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub term_months: u32,
    pub monthly_payment: f64,
    /// US-dollar display string (e.g. `$297.73`).
    pub formatted: String,
}

/// The full payment table for one (principal, credit score) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub principal: f64,
    pub credit_score: f64,
    /// Annual rate (percent) applied to every row.
    pub rate: f64,
    /// Label of the tier that supplied the rate (`None` below the lowest tier).
    pub tier: Option<String>,
    pub rows: Vec<PaymentResult>,
}

impl Estimate {
    pub fn tier_label(&self) -> &str {
        self.tier.as_deref().unwrap_or(BELOW_FLOOR_LABEL)
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `.env`).
#[derive(Debug, Clone)]
pub struct EstimateConfig {
    pub principal: f64,
    pub credit_score: u16,
    pub terms: Vec<u32>,
    pub table: RateTable,
    /// Where `table` came from (`None` means the built-in table).
    pub tiers_path: Option<PathBuf>,
    pub zero_rate: ZeroRatePolicy,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            principal: DEFAULT_LOAN_AMOUNT,
            credit_score: DEFAULT_CREDIT_SCORE,
            terms: DEFAULT_TERMS.to_vec(),
            table: RateTable::default(),
            tiers_path: None,
            zero_rate: ZeroRatePolicy::default(),
            export_csv: None,
            export_json: None,
        }
    }
}

/// A saved estimate (JSON export).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateFile {
    pub tool: String,
    pub generated_at: chrono::DateTime<chrono::Local>,
    #[serde(flatten)]
    pub estimate: Estimate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_builtin_tiers() {
        let table = RateTable::default();
        let labels: Vec<&str> = table.tiers().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["Fair", "Good", "Very Good", "Excellent"]);
        assert_eq!(table.below_floor_rate(), 10.0);
        assert!(RateTable::new(table.tiers().to_vec(), 10.0).is_ok());
    }

    #[test]
    fn rejects_non_increasing_thresholds() {
        let tiers = vec![RateTier::new(600.0, "A", 7.0), RateTier::new(600.0, "B", 6.0)];
        let err = RateTable::new(tiers, 10.0).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.message().contains("strictly increasing"), "{err}");
    }

    #[test]
    fn rejects_empty_and_non_finite_tables() {
        let cases = [
            RateTable::new(Vec::new(), 10.0),
            RateTable::new(vec![RateTier::new(f64::NAN, "A", 7.0)], 10.0),
            RateTable::new(vec![RateTier::new(600.0, "A", 7.0)], f64::INFINITY),
        ];
        for result in cases {
            let err = result.unwrap_err();
            assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        }
    }

    #[test]
    fn estimate_falls_back_to_below_floor_label() {
        let estimate = Estimate {
            principal: 1.0,
            credit_score: 500.0,
            rate: 10.0,
            tier: None,
            rows: Vec::new(),
        };
        assert_eq!(estimate.tier_label(), BELOW_FLOOR_LABEL);
    }
}
