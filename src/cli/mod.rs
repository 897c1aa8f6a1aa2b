//! Command-line parsing for the loan payment estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the calculators.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    CREDIT_SCORE_MAX, CREDIT_SCORE_MIN, DEFAULT_CREDIT_SCORE, DEFAULT_LOAN_AMOUNT, DEFAULT_TERMS,
    ZeroRatePolicy,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "loan", version, about = "Monthly loan payment estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the monthly payment table for a loan amount and credit score.
    Table(EstimateArgs),
    /// Print the interest rate a credit score qualifies for.
    Rate(RateArgs),
    /// Print the credit tier table (optionally writing it as JSON).
    Tiers(TiersArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same estimate pipeline as `loan table`, but lets you edit
    /// the amount and slide the credit score while the table updates.
    Tui(EstimateArgs),
}

/// Inputs shared by `table` and `tui`.
#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// Loan amount in dollars.
    #[arg(short = 'a', long, default_value_t = DEFAULT_LOAN_AMOUNT, allow_negative_numbers = true)]
    pub amount: f64,

    /// Credit score (300-850).
    #[arg(
        short = 's',
        long = "score",
        default_value_t = DEFAULT_CREDIT_SCORE,
        value_parser = clap::value_parser!(u16).range(i64::from(CREDIT_SCORE_MIN)..=i64::from(CREDIT_SCORE_MAX)),
    )]
    pub credit_score: u16,

    /// Loan durations in months, comma-separated, in display order.
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_TERMS,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    pub terms: Vec<u32>,

    /// Tier table JSON (defaults to $LOAN_TIERS_FILE, then the built-in table).
    #[arg(long, value_name = "JSON")]
    pub tiers: Option<PathBuf>,

    /// How to price a 0% rate.
    #[arg(long, value_enum, default_value_t = ZeroRatePolicy::StraightLine)]
    pub zero_rate: ZeroRatePolicy,

    /// Export the payment table to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Export the estimate (inputs + rows) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for a single rate lookup.
#[derive(Debug, Parser)]
pub struct RateArgs {
    /// Credit score to look up (any number; out-of-range scores are not rejected).
    #[arg(short = 's', long = "score", allow_negative_numbers = true)]
    pub credit_score: f64,

    /// Tier table JSON.
    #[arg(long, value_name = "JSON")]
    pub tiers: Option<PathBuf>,
}

/// Options for printing the tier table.
#[derive(Debug, Parser)]
pub struct TiersArgs {
    /// Tier table JSON.
    #[arg(long, value_name = "JSON")]
    pub tiers: Option<PathBuf>,

    /// Write the active table as JSON (a starting point for a custom table).
    #[arg(long, value_name = "JSON")]
    pub write: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn table_defaults() {
        let cli = parse(&["loan", "table"]).unwrap();
        let Command::Table(args) = cli.command else {
            panic!("expected table");
        };
        assert_eq!(args.amount, DEFAULT_LOAN_AMOUNT);
        assert_eq!(args.credit_score, DEFAULT_CREDIT_SCORE);
        assert_eq!(args.terms, DEFAULT_TERMS);
        assert_eq!(args.zero_rate, ZeroRatePolicy::StraightLine);
        assert!(args.tiers.is_none());
    }

    #[test]
    fn table_with_terms_and_negative_amount() {
        let cli = parse(&["loan", "table", "-a", "-500", "-s", "720", "--terms", "12,24"]).unwrap();
        let Command::Table(args) = cli.command else {
            panic!("expected table");
        };
        assert_eq!(args.amount, -500.0);
        assert_eq!(args.credit_score, 720);
        assert_eq!(args.terms, [12, 24]);
    }

    #[test]
    fn score_outside_slider_range_is_rejected() {
        assert!(parse(&["loan", "table", "-s", "299"]).is_err());
        assert!(parse(&["loan", "table", "-s", "851"]).is_err());
        assert!(parse(&["loan", "table", "-s", "850"]).is_ok());
    }

    #[test]
    fn zero_term_is_rejected() {
        assert!(parse(&["loan", "table", "--terms", "36,0"]).is_err());
    }

    #[test]
    fn rate_accepts_any_score() {
        let cli = parse(&["loan", "rate", "-s", "-10"]).unwrap();
        let Command::Rate(args) = cli.command else {
            panic!("expected rate");
        };
        assert_eq!(args.credit_score, -10.0);
    }

    #[test]
    fn zero_rate_policy_flag() {
        let cli = parse(&["loan", "tui", "--zero-rate", "indeterminate"]).unwrap();
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert_eq!(args.zero_rate, ZeroRatePolicy::Indeterminate);
    }
}
