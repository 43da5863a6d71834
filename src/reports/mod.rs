//! Report generation modules for different output formats
//!
//! This module contains report generators for the analysis report plus
//! rendering helpers for project listings and global-dependency listings:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use

pub mod human;
pub mod json;

use crate::core::AnalysisReport;
use crate::error::DepscopeError;

/// Common trait for analysis report generators
pub trait ReportGenerator {
    /// Generate a report from dependency analysis results
    fn generate_report(&self, report: &AnalysisReport) -> Result<String, DepscopeError>;
}

// Re-export for convenience
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
