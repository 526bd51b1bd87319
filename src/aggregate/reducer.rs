use super::metrics::MetricAccumulator;
use super::tally::{AssertionOutcome, AssertionTally};
use crate::run::{Execution, Header, Item, Request, Response};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSample {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSample {
    pub method: String,
    pub url: String,
    pub headers: Vec<Header>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSample {
    pub code: u16,
    pub status: String,
    pub response_time: Option<f64>,
    pub response_size: Option<f64>,
    pub headers: Vec<Header>,

    /// Raw body, rendered into markup by the grouping pass
    #[serde(skip)]
    pub body: Option<Vec<u8>>,
}

/// Snapshot of the first execution seen for an item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSample {
    pub item: ItemSample,
    pub request: RequestSample,
    pub response: Option<ResponseSample>,
}

impl ExecutionSample {
    /// Keep only the item, request and response of an execution, flattened
    /// into plain data
    pub fn pick(execution: &Execution) -> Self {
        Self {
            item: ItemSample::from(&execution.item),
            request: RequestSample::from(&execution.request),
            response: execution.response.as_ref().map(ResponseSample::from),
        }
    }
}

impl From<&Item> for ItemSample {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
        }
    }
}

impl From<&Request> for RequestSample {
    fn from(request: &Request) -> Self {
        Self {
            method: request.method.clone(),
            url: request.url.to_string(),
            headers: request.header.clone(),
        }
    }
}

impl From<&Response> for ResponseSample {
    fn from(response: &Response) -> Self {
        Self {
            code: response.code,
            status: response.status.clone(),
            response_time: response.response_time,
            response_size: response.response_size,
            headers: response.header.clone(),
            body: response.stream.as_ref().map(|s| s.as_bytes().to_vec()),
        }
    }
}

/// Per-item state built by the first pass over the executions
#[derive(Debug, Default)]
pub struct ReducedRun {
    /// First sample of every item, in first-seen order
    pub samples: IndexMap<String, ExecutionSample>,
    pub metrics: MetricAccumulator,
    pub tally: AssertionTally,
}

/// Fold the executions into per-item samples, metric sums and assertion
/// tallies in a single pass
pub fn reduce(executions: &[Execution]) -> ReducedRun {
    let mut reduced = ReducedRun::default();

    for execution in executions {
        let item_id = execution.item.id.as_str();

        if !reduced.samples.contains_key(item_id) {
            reduced
                .samples
                .insert(item_id.to_string(), ExecutionSample::pick(execution));
            reduced.tally.seed(item_id);
            reduced.metrics.seed(item_id);
        }

        let response = execution.response.as_ref();
        reduced.metrics.record(
            item_id,
            response.and_then(|r| r.response_time),
            response.and_then(|r| r.response_size),
        );

        for assertion in &execution.assertions {
            reduced.tally.record(
                item_id,
                &assertion.assertion,
                AssertionOutcome::from_failed(assertion.is_failed()),
            );
        }
    }

    log::debug!(
        "Reduced {} executions into {} items",
        executions.len(),
        reduced.samples.len()
    );
    reduced
}
