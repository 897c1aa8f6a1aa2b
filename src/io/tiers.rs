//! Read/write tier table JSON files.
//!
//! A tier file replaces the built-in table at load time:
//!
//! ```json
//! {
//!   "below_floor_rate": 10.0,
//!   "tiers": [
//!     { "threshold": 580, "label": "Fair", "rate": 7.1 },
//!     { "threshold": 670, "label": "Good", "rate": 6.5 }
//!   ]
//! }
//! ```
//!
//! `below_floor_rate` is optional. The table is validated before use.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_BELOW_FLOOR_RATE, RateTable, RateTier};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TierFile {
    #[serde(default = "default_below_floor_rate")]
    below_floor_rate: f64,
    tiers: Vec<RateTier>,
}

fn default_below_floor_rate() -> f64 {
    DEFAULT_BELOW_FLOOR_RATE
}

/// Read and validate a tier JSON file.
pub fn read_tiers_json(path: &Path) -> Result<RateTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open tier file '{}': {e}", path.display())))?;
    let raw: TierFile = serde_json::from_reader(file).map_err(|e| {
        AppError::input(format!("Invalid tier file '{}': {e}", path.display()))
    })?;
    let table = RateTable::new(raw.tiers, raw.below_floor_rate)
        .map_err(|e| AppError::input(format!("Invalid tier file '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), tiers = table.tiers().len(), "loaded tier table");
    Ok(table)
}

/// Write a tier table as JSON (e.g. to seed a custom file from the defaults).
pub fn write_tiers_json(path: &Path, table: &RateTable) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create tier file '{}': {e}", path.display())))?;
    let raw = TierFile {
        below_floor_rate: table.below_floor_rate(),
        tiers: table.tiers().to_vec(),
    };
    serde_json::to_writer_pretty(file, &raw)
        .map_err(|e| AppError::input(format!("Failed to write tier file: {e}")))?;
    Ok(())
}
