use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use run_report::report::ReportFormat;
use run_report::run::RunResult;
use run_report::utils::format::{file_size, pretty_ms};
use run_report::{aggregate, load_run, ReporterOptions};

#[derive(Parser)]
#[command(name = "run-report")]
#[command(version)]
#[command(about = "Aggregated reports for API collection runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a report from an exported run
    Generate {
        /// Path to the run JSON
        run: PathBuf,

        /// Output format (html, json, junit)
        #[arg(short, long, default_value = "html")]
        format: ReportFormat,

        /// Custom template (html only)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Where to write the report
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// JSON file with reporter options (customTemplatePath, customExportPath)
        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Print per-folder request timings and assertion counts
    Summary {
        /// Path to the run JSON
        run: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            run,
            format,
            template,
            export,
            options,
        } => {
            let file_options = match options {
                Some(path) => ReporterOptions::load(&path)
                    .with_context(|| format!("Failed to load options from {}", path.display()))?,
                None => ReporterOptions::default(),
            };
            let options = file_options.merged_with(ReporterOptions {
                custom_template_path: template,
                custom_export_path: export,
            });

            println!(
                "{} Generating {} report from: {}",
                "📊".to_string().blue(),
                format.to_string().cyan(),
                run.display()
            );

            let written = run_report::generate_report(&run, format, options)
                .await
                .context("Report generation failed")?;

            println!(
                "{} Report saved to: {}",
                "✓".green().bold(),
                written.display().to_string().cyan()
            );
        }

        Commands::Summary { run } => {
            let result = load_run(&run)
                .with_context(|| format!("Failed to load run from {}", run.display()))?;
            print_summary(&result);
        }
    }

    Ok(())
}

fn print_summary(result: &RunResult) {
    println!(
        "{} {}",
        "▶".green().bold(),
        result.collection.name.bold()
    );

    for group in aggregate(&result.run.executions) {
        let heading = if group.parent.name.is_empty() {
            "(root)".to_string()
        } else {
            group.parent.name.clone()
        };
        println!("\n  {}", heading.cyan().bold());

        for execution in &group.executions {
            let tests = &execution.cumulative_tests;
            let status = if tests.failed > 0 {
                "✗".red()
            } else {
                "✓".green()
            };
            println!(
                "    {} {} {} {}",
                status,
                execution.item.name,
                pretty_ms(execution.mean.time).dimmed(),
                file_size(execution.mean.size).dimmed()
            );
            if tests.total() > 0 {
                println!(
                    "      {} passed, {} failed",
                    tests.passed.to_string().green(),
                    tests.failed.to_string().red()
                );
            }
        }
    }

    let timings = &result.run.timings;
    println!(
        "\n  Duration: {}  Average response: {}  Failures: {}",
        pretty_ms(timings.duration_ms()).yellow(),
        pretty_ms(timings.response_average).yellow(),
        result.run.failures.len().to_string().red()
    );
}
