//! Globals command executor

use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::GlobalsConfig;
use crate::executors::CommandExecutor;
use crate::global_scanner::GlobalScanner;
use crate::progress::ProgressReporter;
use crate::reports;

pub struct GlobalsExecutor;

impl CommandExecutor for GlobalsExecutor {
    type Config = GlobalsConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let mut progress = if console::Term::stderr().is_term() {
            Some(ProgressReporter::new())
        } else {
            None
        };

        if let Some(p) = progress.as_mut() {
            p.start_global_scan();
        }

        let mut scanner = GlobalScanner::new();
        let mut dependencies = match config.manager {
            Some(manager) => scanner.scan_by_package_manager(manager),
            None => scanner.scan_all_with_progress(progress.as_ref()),
        };

        if let Some(p) = progress.as_mut() {
            p.finish_global_scan(dependencies.len());
        }

        // Largest first; names break ties so repeated runs agree
        dependencies.sort_by(|a, b| {
            b.size_bytes
                .cmp(&a.size_bytes)
                .then_with(|| a.name.cmp(&b.name))
        });

        match config.format {
            OutputFormat::Human => {
                let listing = reports::human::render_global_dependencies(
                    &dependencies,
                    scanner.detected_package_managers(),
                    config.limit,
                )
                .into_diagnostic()
                .wrap_err("Failed to render global dependency listing")?;
                print!("{listing}");
            }
            OutputFormat::Json => {
                let listing = reports::json::global_json(
                    &dependencies,
                    scanner.detected_package_managers(),
                )
                .into_diagnostic()
                .wrap_err("Failed to serialize global dependency listing")?;
                println!("{listing}");
            }
        }

        Ok(())
    }
}
