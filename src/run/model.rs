use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a finished collection run hands to the reporter
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    #[serde(default)]
    pub collection: CollectionInfo,

    #[serde(default)]
    pub run: Run,

    #[serde(default)]
    pub globals: Option<VariableScope>,

    #[serde(default)]
    pub environment: Option<VariableScope>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,
}

/// Snapshot of a variable scope (globals or environment) at the end of the run
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariableScope {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub values: Vec<Variable>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub key: String,

    #[serde(default)]
    pub value: serde_json::Value,

    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    #[serde(default)]
    pub stats: RunStats,

    #[serde(default)]
    pub timings: RunTimings,

    #[serde(default)]
    pub transfers: RunTransfers,

    #[serde(default)]
    pub failures: Vec<RunFailure>,

    #[serde(default)]
    pub executions: Vec<Execution>,
}

/// Counter triple used by every run statistic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatCounter {
    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub pending: u64,

    #[serde(default)]
    pub failed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    #[serde(default)]
    pub iterations: StatCounter,
    #[serde(default)]
    pub items: StatCounter,
    #[serde(default)]
    pub scripts: StatCounter,
    #[serde(default)]
    pub prerequests: StatCounter,
    #[serde(default)]
    pub requests: StatCounter,
    #[serde(default)]
    pub tests: StatCounter,
    #[serde(default)]
    pub assertions: StatCounter,
    #[serde(default)]
    pub test_scripts: StatCounter,
    #[serde(default)]
    pub prerequest_scripts: StatCounter,
}

/// Run timings, all in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunTimings {
    #[serde(default)]
    pub response_average: f64,

    #[serde(default)]
    pub response_min: f64,

    #[serde(default)]
    pub response_max: f64,

    #[serde(default)]
    pub started: f64,

    #[serde(default)]
    pub completed: f64,
}

impl RunTimings {
    pub fn duration_ms(&self) -> f64 {
        (self.completed - self.started).max(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunTransfers {
    #[serde(default)]
    pub response_total: u64,
}

/// A failure recorded by the runner; only counted by the report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFailure {
    #[serde(default)]
    pub error: serde_json::Value,

    #[serde(default)]
    pub at: Option<String>,
}

/// One observed request/response cycle. `id` identifies the request
/// instance, not the item, and repeats across iterations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    #[serde(default)]
    pub id: String,

    pub item: Item,

    #[serde(default)]
    pub request: Request,

    #[serde(default)]
    pub response: Option<Response>,

    #[serde(default)]
    pub assertions: Vec<AssertionResult>,
}

/// The request definition an execution belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub parent: Option<Container>,
}

impl Item {
    pub fn parent(&self) -> Option<&Container> {
        self.parent.as_ref()
    }
}

/// A folder (or the collection itself) in the collection hierarchy.
/// The chain of `parent` links ends at the collection root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub parent: Option<Box<Container>>,
}

impl Container {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Name used for display, falling back to the id for unnamed containers
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub method: String,

    #[serde(default)]
    pub url: RequestUrl,

    #[serde(default)]
    pub header: Vec<Header>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestUrl {
    Raw(String),
    Structured(UrlParts),
}

impl Default for RequestUrl {
    fn default() -> Self {
        RequestUrl::Raw(String::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrlParts {
    #[serde(default)]
    pub raw: Option<String>,

    #[serde(default)]
    pub protocol: Option<String>,

    #[serde(default)]
    pub host: Vec<String>,

    #[serde(default)]
    pub port: Option<String>,

    #[serde(default)]
    pub path: Vec<String>,

    #[serde(default)]
    pub query: Vec<QueryParam>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryParam {
    pub key: String,

    #[serde(default)]
    pub value: Option<String>,
}

impl fmt::Display for RequestUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestUrl::Raw(raw) => f.write_str(raw),
            RequestUrl::Structured(parts) => {
                if let Some(raw) = &parts.raw {
                    return f.write_str(raw);
                }
                if let Some(protocol) = &parts.protocol {
                    write!(f, "{}://", protocol)?;
                }
                f.write_str(&parts.host.join("."))?;
                if let Some(port) = &parts.port {
                    write!(f, ":{}", port)?;
                }
                if !parts.path.is_empty() {
                    write!(f, "/{}", parts.path.join("/"))?;
                }
                for (i, param) in parts.query.iter().enumerate() {
                    f.write_str(if i == 0 { "?" } else { "&" })?;
                    f.write_str(&param.key)?;
                    if let Some(value) = &param.value {
                        write!(f, "={}", value)?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub key: String,

    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default)]
    pub code: u16,

    #[serde(default)]
    pub status: String,

    /// Milliseconds
    #[serde(default)]
    pub response_time: Option<f64>,

    /// Bytes
    #[serde(default)]
    pub response_size: Option<f64>,

    #[serde(default)]
    pub header: Vec<Header>,

    #[serde(default)]
    pub stream: Option<ResponseStream>,
}

/// Raw response body as exported by the runner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ResponseStream {
    /// `{"type": "Buffer", "data": [..]}`
    Buffer {
        #[serde(rename = "type")]
        kind: String,
        data: Vec<u8>,
    },
    Text(String),
}

impl ResponseStream {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ResponseStream::Buffer { data, .. } => data,
            ResponseStream::Text(text) => text.as_bytes(),
        }
    }
}

/// Outcome of one named check against a response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResult {
    pub assertion: String,

    /// Present whenever the check failed, even as an explicit `null`
    #[serde(
        default,
        deserialize_with = "deserialize_error",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<serde_json::Value>,
}

impl AssertionResult {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

fn deserialize_error<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}
