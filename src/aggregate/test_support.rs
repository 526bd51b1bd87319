use crate::run::{AssertionResult, Container, Execution, Item, Request, Response, ResponseStream};

/// Execution of item `item_id` inside folder `parent_id`, which sits directly
/// under the collection root
pub fn execution(id: &str, item_id: &str, parent_id: &str, time: Option<u64>) -> Execution {
    let root = Container {
        id: "collection".to_string(),
        name: "Collection".to_string(),
        parent: None,
    };

    Execution {
        id: id.to_string(),
        item: Item {
            id: item_id.to_string(),
            name: format!("Request {}", item_id),
            parent: Some(Container {
                id: parent_id.to_string(),
                name: format!("Folder {}", parent_id),
                parent: Some(Box::new(root)),
            }),
        },
        request: Request::default(),
        response: Some(Response {
            code: 200,
            status: "OK".to_string(),
            response_time: time.map(|t| t as f64),
            ..Response::default()
        }),
        assertions: Vec::new(),
    }
}

pub fn with_body(mut execution: Execution, body: &str) -> Execution {
    if let Some(response) = execution.response.as_mut() {
        response.stream = Some(ResponseStream::Text(body.to_string()));
    }
    execution
}

pub fn assertion(name: &str, failed: bool) -> AssertionResult {
    AssertionResult {
        assertion: name.to_string(),
        error: failed.then(|| serde_json::json!({ "message": "assertion failed" })),
    }
}
