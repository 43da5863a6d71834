//! Human-readable console report generation

use std::collections::BTreeSet;
use std::fmt::Write;

use console::style;

use super::ReportGenerator;
use crate::core::{AnalysisReport, DependencyInfo, PackageManagerType, ProjectInfo};
use crate::error::DepscopeError;
use crate::utils::string::{format_size, pluralize};

pub struct HumanReportGenerator {
    limit: Option<usize>,
}

impl HumanReportGenerator {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    fn cap(&self, total: usize) -> usize {
        self.limit.unwrap_or(total).min(total)
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, report: &AnalysisReport) -> Result<String, DepscopeError> {
        let mut output = String::new();

        writeln!(output, "\n{} Summary", style("📈").green())?;
        writeln!(
            output,
            "  {} {} {}",
            style("•").dim(),
            style(report.summary.total_projects).bold(),
            pluralize("project", report.summary.total_projects)
        )?;
        writeln!(
            output,
            "  {} {} dependency {}",
            style("•").dim(),
            style(report.summary.total_dependencies).bold(),
            pluralize("occurrence", report.summary.total_dependencies)
        )?;
        writeln!(
            output,
            "  {} {} on disk",
            style("•").dim(),
            style(format_size(report.summary.total_size_bytes)).bold()
        )?;

        if !report.largest_dependencies.is_empty() {
            let shown = self.cap(report.largest_dependencies.len());
            writeln!(output, "\n{} Largest dependencies", style("🔥").yellow())?;
            for dep in &report.largest_dependencies[..shown] {
                writeln!(
                    output,
                    "  {:<40} {:>10}  {}",
                    dep.name,
                    format_size(dep.size_bytes),
                    style(&dep.project).dim()
                )?;
            }
            if shown < report.largest_dependencies.len() {
                writeln!(
                    output,
                    "  {} Showing {} of {} entries. Use --limit to see more.",
                    style("ℹ").blue(),
                    shown,
                    report.largest_dependencies.len()
                )?;
            }
        }

        if !report.duplicate_dependencies.is_empty() {
            writeln!(
                output,
                "\n{} Duplicate dependencies ({} {})",
                style("🔄").yellow(),
                report.duplicate_dependencies.len(),
                pluralize("group", report.duplicate_dependencies.len())
            )?;
            let shown = self.cap(report.duplicate_dependencies.len());
            for dup in &report.duplicate_dependencies[..shown] {
                writeln!(
                    output,
                    "  {:<40} {} {}, {} {}, {} total, {} reclaimable",
                    style(&dup.name).bold(),
                    dup.project_count,
                    pluralize("project", dup.project_count),
                    dup.version_count,
                    pluralize("version", dup.version_count),
                    format_size(dup.total_size_bytes),
                    style(format_size(dup.potential_savings)).green()
                )?;
            }
        }

        if !report.cleanup_suggestions.is_empty() {
            writeln!(output, "\n{} Cleanup suggestions", style("💡").yellow())?;
            for suggestion in &report.cleanup_suggestions {
                writeln!(
                    output,
                    "  {} {}: {}",
                    style("•").dim(),
                    style(&suggestion.title).bold(),
                    suggestion.description
                )?;
            }
        } else if report.summary.total_projects > 0 {
            writeln!(
                output,
                "\n{} Nothing to clean up - dependency footprints look tidy.",
                style("✅").green()
            )?;
        }

        Ok(output)
    }
}

/// Listing of scanned projects, sorted by path for stable output
pub fn render_projects(projects: &[ProjectInfo]) -> Result<String, DepscopeError> {
    let mut output = String::new();

    let mut sorted: Vec<&ProjectInfo> = projects.iter().collect();
    sorted.sort_by(|a, b| a.path().cmp(b.path()));

    writeln!(
        output,
        "\n{:<24} {:<8} {:>6} {:>10}  PATH",
        "NAME", "TYPE", "DEPS", "SIZE"
    )?;
    for project in sorted {
        writeln!(
            output,
            "{:<24} {:<8} {:>6} {:>10}  {}",
            project.name(),
            project.project_type().to_string(),
            project.dependencies().len(),
            format_size(project.total_size_bytes()),
            style(project.path().display()).dim()
        )?;
    }

    Ok(output)
}

/// Detail view for a single project
pub fn render_project_details(project: &ProjectInfo) -> Result<String, DepscopeError> {
    let mut output = String::new();

    writeln!(
        output,
        "\n{} {}",
        style("📋").blue(),
        style(project.name()).bold()
    )?;
    writeln!(output, "  type:     {}", project.project_type())?;
    writeln!(output, "  path:     {}", project.path().display())?;
    writeln!(output, "  manifest: {}", project.manifest_path().display())?;
    writeln!(
        output,
        "  size:     {}",
        format_size(project.total_size_bytes())
    )?;
    for (key, value) in project.metadata() {
        writeln!(output, "  {key}: {value}")?;
    }

    if project.dependencies().is_empty() {
        writeln!(output, "\n  No dependencies declared.")?;
        return Ok(output);
    }

    writeln!(
        output,
        "\n  {:<32} {:<16} {:<12} {:>10}",
        "NAME", "VERSION", "TYPE", "SIZE"
    )?;
    for dep in project.dependencies() {
        writeln!(
            output,
            "  {:<32} {:<16} {:<12} {:>10}",
            dep.name,
            dep.installed_version.as_deref().unwrap_or(&dep.version),
            dep.dependency_type.to_string(),
            format_size(dep.size_bytes)
        )?;
    }

    Ok(output)
}

/// Listing of globally installed dependencies with the detected managers
pub fn render_global_dependencies(
    dependencies: &[DependencyInfo],
    detected: &BTreeSet<PackageManagerType>,
    limit: Option<usize>,
) -> Result<String, DepscopeError> {
    let mut output = String::new();

    if detected.is_empty() {
        writeln!(
            output,
            "\n{} No package managers detected on this machine.",
            style("ℹ").blue()
        )?;
        return Ok(output);
    }

    let manager_names: Vec<&str> = detected.iter().map(|manager| manager.as_str()).collect();
    writeln!(
        output,
        "\n{} Detected package managers: {}",
        style("📦").blue(),
        style(manager_names.join(", ")).bold()
    )?;

    let shown = limit.unwrap_or(dependencies.len()).min(dependencies.len());
    writeln!(
        output,
        "\n{:<32} {:<14} {:<8} {:>10}  PATH",
        "NAME", "VERSION", "MANAGER", "SIZE"
    )?;
    for dep in &dependencies[..shown] {
        let manager = dep
            .package_manager
            .map(|manager| manager.as_str())
            .unwrap_or("unknown");
        let path = dep
            .install_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        writeln!(
            output,
            "{:<32} {:<14} {:<8} {:>10}  {}",
            dep.name,
            dep.version,
            manager,
            format_size(dep.size_bytes),
            style(path).dim()
        )?;
    }

    if shown < dependencies.len() {
        writeln!(
            output,
            "{} Showing {} of {} entries. Use --limit to see more.",
            style("ℹ").blue(),
            shown,
            dependencies.len()
        )?;
    }

    Ok(output)
}
