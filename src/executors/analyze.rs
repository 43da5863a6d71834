//! Analyze command executor

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::analyzer::DependencyAnalyzer;
use crate::cli::OutputFormat;
use crate::config::AnalyzeConfig;
use crate::executors::CommandExecutor;
use crate::progress::ProgressReporter;
use crate::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator};
use crate::scanner::ProjectScanner;

pub struct AnalyzeExecutor;

impl CommandExecutor for AnalyzeExecutor {
    type Config = AnalyzeConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let mut progress = if console::Term::stderr().is_term() {
            Some(ProgressReporter::new())
        } else {
            None
        };

        if let Some(p) = progress.as_mut() {
            p.start_scan(&config.path);
        }

        let scanner = ProjectScanner::new();
        let projects = scanner.scan_directory_with_progress(
            &config.path,
            config.depth,
            config.parallel,
            progress.as_ref(),
        );

        if let Some(p) = progress.as_mut() {
            p.finish_scan(projects.len());
        }

        if projects.is_empty() {
            eprintln!("{} No projects found to analyze", style("ℹ").blue());
            return Ok(());
        }

        if let Some(p) = progress.as_mut() {
            p.start_analysis();
        }

        let analyzer = DependencyAnalyzer::new();
        let report = analyzer.analyze_projects(&projects);

        if let Some(p) = progress.as_ref() {
            p.finish_analysis(report.summary.total_dependencies);
        }

        let rendered = match config.format {
            OutputFormat::Human => {
                HumanReportGenerator::new(config.limit).generate_report(&report)
            }
            OutputFormat::Json => JsonReportGenerator::new().generate_report(&report),
        };

        match rendered {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                return Err(e)
                    .into_diagnostic()
                    .wrap_err("Failed to generate analysis report");
            }
        }

        Ok(())
    }
}
