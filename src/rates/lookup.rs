//! Credit score → annual interest rate.
//!
//! The lookup scans the ascending tier table for the first threshold the score
//! has *not* reached yet:
//!
//! - no such tier (score at or above the top threshold): the last tier's rate
//! - the very first tier (score below every threshold): the table's
//!   below-floor rate, which is not any tier's own rate
//! - otherwise: the rate of the tier just before the match

use crate::domain::{RateTable, RateTier};

/// Where a score lands in the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierMatch {
    /// Below the lowest threshold.
    BelowFloor,
    /// Qualifies for the tier at this index.
    Tier(usize),
}

/// Locate `score` in `table`.
///
/// A NaN score never compares below a threshold, so it lands on the last tier.
pub fn locate(score: f64, table: &RateTable) -> TierMatch {
    let tiers = table.tiers();
    match tiers.iter().position(|tier| score < tier.threshold) {
        Some(0) => TierMatch::BelowFloor,
        Some(idx) => TierMatch::Tier(idx - 1),
        None => TierMatch::Tier(tiers.len() - 1),
    }
}

/// Annual interest rate (percent) for a credit score.
pub fn interest_rate(score: f64, table: &RateTable) -> f64 {
    let rate = match locate(score, table) {
        TierMatch::BelowFloor => table.below_floor_rate(),
        TierMatch::Tier(idx) => table.tiers()[idx].rate,
    };
    tracing::trace!(score, rate, "rate lookup");
    rate
}

/// The tier whose rate [`interest_rate`] applies, or `None` below the floor.
pub fn qualifying_tier(score: f64, table: &RateTable) -> Option<&RateTier> {
    match locate(score, table) {
        TierMatch::BelowFloor => None,
        TierMatch::Tier(idx) => table.tiers().get(idx),
    }
}
