pub mod model;

pub use model::*;

use crate::error::{ReportError, Result};
use std::path::Path;

/// Load a finished run exported as JSON
pub fn load_run(path: &Path) -> Result<RunResult> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    let run: RunResult = serde_json::from_str(&content)
        .map_err(|e| ReportError::json(path.display().to_string(), e))?;

    log::debug!(
        "Loaded run '{}' with {} executions",
        run.collection.name,
        run.run.executions.len()
    );
    Ok(run)
}
