use crate::error::{ReportError, Result};
use crate::report::{json, junit, HtmlRenderer, Report, ReportFormat};
use crate::run::{load_run, RunResult};
use crate::utils::ReporterOptions;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Generate a report for an exported run and write it out
pub async fn generate_report(
    run_path: &Path,
    format: ReportFormat,
    options: ReporterOptions,
) -> Result<PathBuf> {
    let reporter = Reporter::with_format(options, format)?;
    let run = load_run(run_path)?;
    reporter.on_run_complete(&run)?.write()
}

/// A rendered report waiting to be written by the export collector
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub name: String,
    pub default_filename: String,
    pub path: Option<PathBuf>,
    pub content: String,
}

impl ExportArtifact {
    /// Where `write` puts the content
    pub fn target(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.default_filename))
    }

    /// Write the content, creating missing parent directories
    pub fn write(&self) -> Result<PathBuf> {
        let target = self.target();
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
        }
        std::fs::write(&target, &self.content).map_err(|e| ReportError::io(&target, e))?;

        log::info!("{} written to {}", self.name, target.display());
        Ok(target)
    }
}

enum Renderer {
    Html(HtmlRenderer),
    Json,
    Junit,
}

/// Turns a finished run into a report artifact.
///
/// The template is loaded and compiled up front, so a broken template fails
/// before any run data is looked at.
pub struct Reporter {
    options: ReporterOptions,
    format: ReportFormat,
    renderer: Renderer,
}

impl Reporter {
    pub fn new(options: ReporterOptions) -> Result<Self> {
        Self::with_format(options, ReportFormat::Html)
    }

    pub fn with_format(options: ReporterOptions, format: ReportFormat) -> Result<Self> {
        let renderer = match format {
            ReportFormat::Html => {
                Renderer::Html(HtmlRenderer::load(options.custom_template_path.as_deref())?)
            }
            ReportFormat::Json => Renderer::Json,
            ReportFormat::Junit => Renderer::Junit,
        };

        if format != ReportFormat::Html && options.custom_template_path.is_some() {
            log::warn!("Custom template is ignored for {} reports", format);
        }

        Ok(Self {
            options,
            format,
            renderer,
        })
    }

    /// Called once when the run has finished
    pub fn on_run_complete(&self, run: &RunResult) -> Result<ExportArtifact> {
        self.export(run, Utc::now())
    }

    pub fn export(&self, run: &RunResult, timestamp: DateTime<Utc>) -> Result<ExportArtifact> {
        let report = Report::build(run, timestamp);
        log::debug!(
            "Built report with {} groups over {} items",
            report.groups.len(),
            report.item_count()
        );

        Ok(ExportArtifact {
            name: self.format.artifact_name().to_string(),
            default_filename: self.format.default_filename().to_string(),
            path: self.options.custom_export_path.clone(),
            content: self.render(&report)?,
        })
    }

    pub fn render(&self, report: &Report) -> Result<String> {
        match &self.renderer {
            Renderer::Html(html) => html.render(report),
            Renderer::Json => json::generate(report),
            Renderer::Junit => junit::generate_junit_xml(report),
        }
    }
}
