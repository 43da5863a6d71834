//! Scan command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::ScanConfig;
use crate::executors::CommandExecutor;
use crate::progress::ProgressReporter;
use crate::reports;
use crate::scanner::ProjectScanner;

pub struct ScanExecutor;

impl CommandExecutor for ScanExecutor {
    type Config = ScanConfig;

    fn execute(config: Self::Config) -> Result<()> {
        // Create a progress reporter if we're in an interactive terminal
        let mut progress = if console::Term::stderr().is_term() {
            Some(ProgressReporter::new())
        } else {
            None
        };

        if let Some(p) = progress.as_mut() {
            p.start_scan(&config.path);
        }

        let scanner = ProjectScanner::new();
        let mut projects = scanner.scan_directory_with_progress(
            &config.path,
            config.depth,
            config.parallel,
            progress.as_ref(),
        );

        if !config.project_types.is_empty() {
            projects.retain(|project| config.project_types.contains(&project.project_type()));
        }

        if let Some(p) = progress.as_mut() {
            p.finish_scan(projects.len());
        }

        if projects.is_empty() {
            eprintln!("{} No projects found", style("ℹ").blue());
            return Ok(());
        }

        match config.format {
            OutputFormat::Human => {
                let listing = reports::human::render_projects(&projects)
                    .into_diagnostic()
                    .wrap_err("Failed to render project listing")?;
                print!("{listing}");
            }
            OutputFormat::Json => {
                let listing = reports::json::projects_json(&projects)
                    .into_diagnostic()
                    .wrap_err("Failed to serialize project listing")?;
                println!("{listing}");
            }
        }

        Ok(())
    }
}
