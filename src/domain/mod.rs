//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the credit tier table (`RateTier`, `RateTable`, `DEFAULT_TIERS`)
//! - per-query values (`LoanQuery`, `PaymentResult`, `Estimate`)
//! - run configuration (`EstimateConfig`, `ZeroRatePolicy`)

pub mod types;

pub use types::*;
