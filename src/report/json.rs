use super::types::Report;
use crate::error::{ReportError, Result};

/// Render the aggregated report as pretty JSON
pub fn generate(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| ReportError::json("report", e))
}
