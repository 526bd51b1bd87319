use super::types::Report;
use crate::error::{ReportError, Result};
use crate::utils::format::{file_size, pretty_ms};
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera, Value};

const TEMPLATE_NAME: &str = "report.html";
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/report.html.tera");

/// Compiled HTML report template
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    /// Compile the built-in template, or `custom` when given
    pub fn load(custom: Option<&Path>) -> Result<Self> {
        let source = match custom {
            Some(path) => {
                log::debug!("Using custom template {}", path.display());
                std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?
            }
            None => DEFAULT_TEMPLATE.to_string(),
        };
        Self::from_source(&source)
    }

    pub fn from_source(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.register_filter("prettyms", prettyms_filter);
        tera.register_filter("filesize", filesize_filter);
        tera.add_raw_template(TEMPLATE_NAME, source)?;
        Ok(Self { tera })
    }

    pub fn render(&self, report: &Report) -> Result<String> {
        let context = Context::from_serialize(report)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

fn number_arg(value: &Value, filter: &str) -> tera::Result<f64> {
    match value {
        Value::Null => Ok(0.0),
        other => other
            .as_f64()
            .ok_or_else(|| tera::Error::msg(format!("`{}` expects a number", filter))),
    }
}

fn prettyms_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(pretty_ms(number_arg(value, "prettyms")?)))
}

fn filesize_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(file_size(number_arg(value, "filesize")?)))
}
