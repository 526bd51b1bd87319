//! Two-pass aggregation of a finished run.
//!
//! The reducer folds the flat execution list into per-item samples, metric
//! sums and assertion tallies. The grouping pass then walks the list again in
//! run order, finalizes each item once and collects items into groups of
//! consecutive executions sharing a parent.

pub mod body;
pub mod grouping;
pub mod metrics;
pub mod reducer;
pub mod tally;

#[cfg(test)]
pub(crate) mod test_support;

pub use body::format_body;
pub use grouping::{group, ExecutionGroup, ItemAggregate, ParentSummary};
pub use metrics::{Mean, MetricAccumulator};
pub use reducer::{reduce, ReducedRun};
pub use tally::{AssertionCounts, AssertionTally, TestCounts};

use crate::run::Execution;

/// Run both passes over the executions of a run
pub fn aggregate(executions: &[Execution]) -> Vec<ExecutionGroup> {
    let reduced = reduce(executions);
    group(executions, &reduced)
}
