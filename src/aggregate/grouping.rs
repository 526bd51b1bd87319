use super::body::format_body;
use super::metrics::Mean;
use super::reducer::{ItemSample, ReducedRun, RequestSample, ResponseSample};
use super::tally::{AssertionCounts, TestCounts};
use crate::run::{Container, Execution};
use crate::utils::format::full_name;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Everything the report shows for one request item, merged over all of its
/// executions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAggregate {
    pub item: ItemSample,
    pub request: RequestSample,
    pub response: Option<ResponseSample>,
    pub assertions: Vec<AssertionCounts>,
    pub cumulative_tests: TestCounts,
    pub mean: Mean,
    pub body_formatted: String,
}

impl ItemAggregate {
    fn finalize(item_id: &str, reduced: &ReducedRun) -> Option<Self> {
        let sample = reduced.samples.get(item_id)?;
        let tally = reduced.tally.item(item_id);
        let body = sample.response.as_ref().and_then(|r| r.body.as_deref());

        Some(Self {
            item: sample.item.clone(),
            request: sample.request.clone(),
            response: sample.response.clone(),
            assertions: tally.map(|t| t.assertions()).unwrap_or_default(),
            cumulative_tests: tally.map(|t| t.totals()).unwrap_or_default(),
            mean: reduced.metrics.finalize(item_id),
            body_formatted: format_body(body),
        })
    }
}

/// Container heading a group: its id and full display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentSummary {
    pub id: String,
    pub name: String,
}

impl ParentSummary {
    /// Items without a parent fall under an anonymous root
    pub fn of(container: Option<&Container>) -> Self {
        match container {
            Some(container) => Self {
                id: container.id.clone(),
                name: full_name(container),
            },
            None => Self {
                id: String::new(),
                name: String::new(),
            },
        }
    }
}

/// A maximal run of consecutive executions sharing the same parent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionGroup {
    pub parent: ParentSummary,
    pub executions: Vec<Arc<ItemAggregate>>,
}

/// Second pass: walk the executions in run order and collect finalized items
/// into parent groups.
///
/// Only the trailing group is compared against, so a parent that reappears
/// after a different one opens a new group.
pub fn group(executions: &[Execution], reduced: &ReducedRun) -> Vec<ExecutionGroup> {
    let mut finalized: HashMap<&str, Arc<ItemAggregate>> = HashMap::new();
    let mut groups: Vec<ExecutionGroup> = Vec::new();

    for execution in executions {
        let item_id = execution.item.id.as_str();

        let aggregate = match finalized.get(item_id) {
            Some(aggregate) => Arc::clone(aggregate),
            None => {
                let Some(aggregate) = ItemAggregate::finalize(item_id, reduced) else {
                    log::warn!("Item '{}' was not seen by the reducer, skipping", item_id);
                    continue;
                };
                let aggregate = Arc::new(aggregate);
                finalized.insert(item_id, Arc::clone(&aggregate));
                aggregate
            }
        };

        let parent = ParentSummary::of(execution.item.parent());
        match groups.last_mut() {
            Some(previous) if previous.parent.id == parent.id => {
                previous.executions.push(aggregate);
            }
            _ => groups.push(ExecutionGroup {
                parent,
                executions: vec![aggregate],
            }),
        }
    }

    log::debug!(
        "Grouped {} executions into {} groups",
        executions.len(),
        groups.len()
    );
    groups
}
