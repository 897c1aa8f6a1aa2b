//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging and loads `.env`
//! - parses CLI arguments
//! - resolves the tier table (flag, `$LOAN_TIERS_FILE`, or built-in)
//! - runs the estimate pipeline
//! - prints reports and writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, EstimateArgs, RateArgs, TiersArgs};
use crate::domain::{EstimateConfig, RateTable};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming a default tier JSON file.
pub const TIERS_FILE_ENV: &str = "LOAN_TIERS_FILE";

/// Entry point for the `loan` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    // We want `loan` and `loan -a 20000` to behave like `loan tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Table(args) => handle_table(args),
        Command::Rate(args) => handle_rate(args),
        Command::Tiers(args) => handle_tiers(args),
        Command::Tui(args) => handle_tui(args),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_table(args: EstimateArgs) -> Result<(), AppError> {
    let config = estimate_config_from_args(&args, env_tiers_path())?;
    let estimate = pipeline::run_estimate(&config);

    println!("{}", crate::report::format_summary(&estimate, &config));
    println!("{}", crate::report::format_payment_table(&estimate));

    if let Some(path) = &config.export_csv {
        crate::io::write_estimate_csv(path, &estimate)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::write_estimate_json(path, &estimate)?;
    }

    Ok(())
}

fn handle_rate(args: RateArgs) -> Result<(), AppError> {
    let table = load_table(resolve_tiers_path(args.tiers.as_deref(), env_tiers_path()).as_deref())?;
    let rate = crate::rates::interest_rate(args.credit_score, &table);
    let label = crate::rates::qualifying_tier(args.credit_score, &table)
        .map(|t| t.label.as_str())
        .unwrap_or(crate::domain::BELOW_FLOOR_LABEL);

    println!("{}", crate::report::format_rate_line(args.credit_score, rate, label));
    Ok(())
}

fn handle_tiers(args: TiersArgs) -> Result<(), AppError> {
    let table = load_table(resolve_tiers_path(args.tiers.as_deref(), env_tiers_path()).as_deref())?;
    print!("{}", crate::report::format_tier_table(&table));

    if let Some(path) = &args.write {
        crate::io::write_tiers_json(path, &table)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn handle_tui(args: EstimateArgs) -> Result<(), AppError> {
    let config = estimate_config_from_args(&args, env_tiers_path())?;
    crate::tui::run(config)
}

/// Build the pipeline configuration from CLI flags.
///
/// `env_tiers` is the value of `$LOAN_TIERS_FILE`, used when `--tiers` is absent.
pub fn estimate_config_from_args(
    args: &EstimateArgs,
    env_tiers: Option<PathBuf>,
) -> Result<EstimateConfig, AppError> {
    let tiers_path = resolve_tiers_path(args.tiers.as_deref(), env_tiers);
    let table = load_table(tiers_path.as_deref())?;

    Ok(EstimateConfig {
        principal: args.amount,
        credit_score: args.credit_score,
        terms: args.terms.clone(),
        table,
        tiers_path,
        zero_rate: args.zero_rate,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
    })
}

fn env_tiers_path() -> Option<PathBuf> {
    std::env::var_os(TIERS_FILE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn resolve_tiers_path(flag: Option<&Path>, env: Option<PathBuf>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or(env)
}

fn load_table(path: Option<&Path>) -> Result<RateTable, AppError> {
    match path {
        Some(path) => crate::io::read_tiers_json(path),
        None => Ok(RateTable::default()),
    }
}

/// Rewrite argv so `loan` defaults to `loan tui`.
///
/// Rules:
/// - `loan`                      -> `loan tui`
/// - `loan -a 20000 ...`         -> `loan tui -a 20000 ...`
/// - `loan --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "table" | "rate" | "tiers" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["loan"])), argv(&["loan", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["loan", "-a", "20000"])),
            argv(&["loan", "tui", "-a", "20000"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for parts in [
            &["loan", "table", "-s", "700"][..],
            &["loan", "--help"][..],
            &["loan", "-V"][..],
            &["loan", "tiers"][..],
        ] {
            assert_eq!(rewrite_args(argv(parts)), argv(parts));
        }
    }

    #[test]
    fn flag_tiers_path_beats_env() {
        let flag = PathBuf::from("flag.json");
        let env = Some(PathBuf::from("env.json"));
        assert_eq!(resolve_tiers_path(Some(flag.as_path()), env.clone()), Some(flag));
        assert_eq!(resolve_tiers_path(None, env.clone()), env);
        assert_eq!(resolve_tiers_path(None, None), None);
    }

    #[test]
    fn config_from_default_args_uses_builtin_table() {
        let cli = crate::cli::Cli::try_parse_from(["loan", "table", "-a", "20000"]).unwrap();
        let Command::Table(args) = cli.command else {
            panic!("expected table");
        };
        let config = estimate_config_from_args(&args, None).unwrap();
        assert_eq!(config.principal, 20_000.0);
        assert_eq!(config.table, RateTable::default());
        assert!(config.tiers_path.is_none());
    }

    #[test]
    fn missing_env_tier_file_is_an_input_error() {
        let cli = crate::cli::Cli::try_parse_from(["loan", "table"]).unwrap();
        let Command::Table(args) = cli.command else {
            panic!("expected table");
        };
        let err = estimate_config_from_args(&args, Some(PathBuf::from("/nonexistent/tiers.json")))
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
