//! # Dependency Analysis Module
//!
//! This module aggregates a set of scanned projects into an
//! [`AnalysisReport`](crate::core::AnalysisReport): totals, a size ranking,
//! duplicate-dependency groups, and ranked cleanup suggestions.
//!
//! ## Key Components
//!
//! - **DependencyAnalyzer**: Pure aggregation over `[ProjectInfo]`
//! - **DuplicateDetector**: Groups dependency names that appear in two or
//!   more distinct projects
//!
//! The analysis performs no I/O and is deterministic: identical input yields
//! an identical report, including tie-break ordering.
//!
//! ## Example
//!
//! ```
//! use depscope::analyzer::DependencyAnalyzer;
//!
//! let analyzer = DependencyAnalyzer::new();
//! let report = analyzer.analyze_projects(&[]);
//!
//! assert_eq!(report.summary.total_projects, 0);
//! assert!(report.duplicate_dependencies.is_empty());
//! ```

mod duplicate_detector;

pub use duplicate_detector::DuplicateDetector;

// Re-export the main analyzer types
mod analyzer_impl;
pub use analyzer_impl::*;
