//! `loan-estimator` library crate.
//!
//! The binary (`loan`) is a thin wrapper around this library so that:
//!
//! - the rate lookup and payment math are testable without spawning processes
//! - the CLI and the TUI share one estimate pipeline

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod payment;
pub mod rates;
pub mod report;
pub mod tui;
