//! Export an estimate to CSV or JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Estimate, EstimateFile};
use crate::error::AppError;

/// Write one CSV row per term.
pub fn write_estimate_csv(path: &Path, estimate: &Estimate) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(
        file,
        "term_months,monthly_payment,formatted_payment,annual_rate,principal,credit_score"
    )
    .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for row in &estimate.rows {
        writeln!(
            file,
            "{},{:.6},\"{}\",{},{},{}",
            row.term_months,
            row.monthly_payment,
            row.formatted,
            estimate.rate,
            estimate.principal,
            estimate.credit_score,
        )
        .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    tracing::info!(path = %path.display(), rows = estimate.rows.len(), "wrote CSV export");
    Ok(())
}

/// Write the estimate plus run metadata as pretty JSON.
pub fn write_estimate_json(path: &Path, estimate: &Estimate) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let doc = EstimateFile {
        tool: "loan".to_string(),
        generated_at: chrono::Local::now(),
        estimate: estimate.clone(),
    };
    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::input(format!("Failed to write export JSON: {e}")))?;

    tracing::info!(path = %path.display(), "wrote JSON export");
    Ok(())
}
