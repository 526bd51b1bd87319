use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of report generation.
///
/// Malformed response bodies and unreadable streams are not errors; they are
/// absorbed by the body formatter.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("failed to write JUnit XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid reporter options: {0}")]
    Options(String),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            what: what.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
