use crate::aggregate::{aggregate, ExecutionGroup};
use crate::run::{CollectionInfo, RunResult, RunStats, VariableScope};
use crate::utils::format::{file_size, pretty_ms};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregated report handed to the renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub timestamp: String,
    pub version: String,
    pub groups: Vec<ExecutionGroup>,
    pub summary: ReportSummary,
}

impl Report {
    pub fn build(run: &RunResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: timestamp.to_rfc2822(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            groups: aggregate(&run.run.executions),
            summary: ReportSummary::from_run(run),
        }
    }

    /// Distinct items across all groups
    pub fn item_count(&self) -> usize {
        let mut ids: Vec<&str> = self
            .groups
            .iter()
            .flat_map(|g| g.executions.iter().map(|e| e.item.id.as_str()))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

/// Run-level statistics shown above the groups
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub stats: RunStats,
    pub collection: CollectionInfo,
    pub globals: Option<VariableScope>,
    pub environment: Option<VariableScope>,
    pub failures: usize,
    pub response_total: String,
    pub response_average: String,
    pub duration: String,
}

impl ReportSummary {
    pub fn from_run(run: &RunResult) -> Self {
        let timings = &run.run.timings;
        Self {
            stats: run.run.stats.clone(),
            collection: run.collection.clone(),
            globals: run.globals.clone(),
            environment: run.environment.clone(),
            failures: run.run.failures.len(),
            response_total: file_size(run.run.transfers.response_total as f64),
            response_average: pretty_ms(timings.response_average),
            duration: pretty_ms(timings.duration_ms()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::{Run, RunFailure, RunTimings, RunTransfers};

    #[test]
    fn test_summary_strings() {
        let run = RunResult {
            run: Run {
                timings: RunTimings {
                    response_average: 42.7,
                    started: 1_000.0,
                    completed: 3_500.0,
                    ..RunTimings::default()
                },
                transfers: RunTransfers {
                    response_total: 1536,
                },
                failures: vec![RunFailure {
                    error: serde_json::json!({ "message": "boom" }),
                    at: None,
                }],
                ..Run::default()
            },
            ..RunResult::default()
        };

        let summary = ReportSummary::from_run(&run);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.response_total, "1.5KB");
        assert_eq!(summary.response_average, "42ms");
        assert_eq!(summary.duration, "2.5s");
        assert!(summary.globals.is_none());
    }

    #[test]
    fn test_build_is_deterministic_for_fixed_timestamp() {
        let run = RunResult::default();
        let at = Utc::now();
        assert_eq!(Report::build(&run, at), Report::build(&run, at));
    }
}
