//! JSON format report generation

use std::collections::BTreeSet;

use serde_json::json;

use super::ReportGenerator;
use crate::core::{AnalysisReport, DependencyInfo, PackageManagerType, ProjectInfo};
use crate::error::DepscopeError;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, report: &AnalysisReport) -> Result<String, DepscopeError> {
        // The report's lists are already deterministically ordered by the
        // analyzer, so a direct serialization stays reproducible
        serde_json::to_string_pretty(report).map_err(DepscopeError::Json)
    }
}

/// Scanned projects as JSON, sorted by path: scan order is unspecified and
/// must not leak into the output
pub fn projects_json(projects: &[ProjectInfo]) -> Result<String, DepscopeError> {
    let mut sorted: Vec<&ProjectInfo> = projects.iter().collect();
    sorted.sort_by(|a, b| a.path().cmp(b.path()));

    serde_json::to_string_pretty(&sorted).map_err(DepscopeError::Json)
}

/// A single project as JSON
pub fn project_json(project: &ProjectInfo) -> Result<String, DepscopeError> {
    serde_json::to_string_pretty(project).map_err(DepscopeError::Json)
}

/// Global dependencies plus the managers detected during the scan
pub fn global_json(
    dependencies: &[DependencyInfo],
    detected: &BTreeSet<PackageManagerType>,
) -> Result<String, DepscopeError> {
    let payload = json!({
        "detected_managers": detected,
        "dependencies": dependencies,
    });

    serde_json::to_string_pretty(&payload).map_err(DepscopeError::Json)
}
