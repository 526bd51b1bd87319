pub mod html;
pub mod json;
pub mod junit;
pub mod types;

pub use html::HtmlRenderer;
pub use types::{Report, ReportSummary};

use std::fmt;
use std::str::FromStr;

/// Output format of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
    Junit,
}

impl ReportFormat {
    pub fn artifact_name(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html-enhanced-reporter",
            ReportFormat::Json => "json-reporter",
            ReportFormat::Junit => "junit-reporter",
        }
    }

    pub fn default_filename(&self) -> &'static str {
        match self {
            ReportFormat::Html => "run-report.html",
            ReportFormat::Json => "run-report.json",
            ReportFormat::Junit => "run-report.xml",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            "junit" | "xml" => Ok(ReportFormat::Junit),
            other => Err(format!("Unknown format: {}", other)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Junit => "junit",
        })
    }
}
