//! Info command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::InfoConfig;
use crate::executors::CommandExecutor;
use crate::reports;
use crate::scanner::ProjectScanner;

pub struct InfoExecutor;

impl CommandExecutor for InfoExecutor {
    type Config = InfoConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let scanner = ProjectScanner::new();

        let Some(project) = scanner.scan_single_project(&config.path) else {
            eprintln!(
                "{} '{}' is not a recognized project",
                style("ℹ").blue(),
                config.path.display()
            );
            return Ok(());
        };

        match config.format {
            OutputFormat::Human => {
                let details = reports::human::render_project_details(&project)
                    .into_diagnostic()
                    .wrap_err("Failed to render project details")?;
                print!("{details}");
            }
            OutputFormat::Json => {
                let details = reports::json::project_json(&project)
                    .into_diagnostic()
                    .wrap_err("Failed to serialize project details")?;
                println!("{details}");
            }
        }

        Ok(())
    }
}
