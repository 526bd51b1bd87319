use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Reporter options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReporterOptions {
    /// Template used instead of the built-in one
    #[serde(default)]
    pub custom_template_path: Option<PathBuf>,

    /// Where the rendered report is written. The default file name in the
    /// working directory is used when unset.
    #[serde(default)]
    pub custom_export_path: Option<PathBuf>,
}

impl ReporterOptions {
    /// Load options from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| ReportError::Options(e.to_string()))
    }

    /// Values set in `other` win over ours
    pub fn merged_with(mut self, other: ReporterOptions) -> Self {
        if other.custom_template_path.is_some() {
            self.custom_template_path = other.custom_template_path;
        }
        if other.custom_export_path.is_some() {
            self.custom_export_path = other.custom_export_path;
        }
        self
    }
}
