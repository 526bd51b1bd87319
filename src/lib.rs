pub mod aggregate;
pub mod error;
pub mod report;
pub mod reporter;
pub mod run;
pub mod utils;

// Re-export common items
pub use aggregate::aggregate;
pub use error::ReportError;
pub use report::{Report, ReportFormat};
pub use reporter::{generate_report, ExportArtifact, Reporter};
pub use run::load_run;
pub use utils::ReporterOptions;
