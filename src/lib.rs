//! # Depscope - Inventory Dependencies Across Language Ecosystems
//!
//! Depscope discovers projects under a directory tree, parses each project's
//! manifest into a normalized dependency model, measures on-disk footprints,
//! and aggregates the results into cross-project analytics. It can also
//! interrogate the host's package managers for globally installed packages.
//! It never resolves, installs, or removes anything.
//!
//! ## Main Components
//!
//! - **Parsers**: One manifest parser per ecosystem (Node.js, Java, Python,
//!   Rust, Go) behind an ordered registry
//! - **Scanner**: Depth-bounded traversal that treats every recognized
//!   project as a boundary
//! - **Analyzer**: Deterministic aggregation into totals, size rankings,
//!   duplicate groups, and cleanup suggestions
//! - **Global scanner**: Per-manager subprocess orchestration with failure
//!   containment
//!
//! ## Usage
//!
//! ### Example: Scanning and Analyzing a Directory Tree
//!
//! ```no_run
//! use std::path::Path;
//!
//! use depscope::analyzer::DependencyAnalyzer;
//! use depscope::scanner::ProjectScanner;
//! use depscope::utils::string::format_size;
//!
//! # fn main() -> miette::Result<()> {
//! // Step 1: Discover every project below a root
//! let scanner = ProjectScanner::new();
//! let projects = scanner.scan_directory(Path::new("/path/to/workspaces"), 5, true);
//!
//! println!("Found {} projects", projects.len());
//!
//! // Step 2: Aggregate them into an analysis report
//! let analyzer = DependencyAnalyzer::new();
//! let report = analyzer.analyze_projects(&projects);
//!
//! println!(
//!     "{} dependency occurrences occupying {}",
//!     report.summary.total_dependencies,
//!     format_size(report.summary.total_size_bytes)
//! );
//!
//! // Step 3: Act on the duplicate groups
//! for dup in &report.duplicate_dependencies {
//!     println!(
//!         "{} appears in {} projects; deduplicating would free {}",
//!         dup.name,
//!         dup.project_count,
//!         format_size(dup.potential_savings)
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Inspecting a Single Project
//!
//! ```no_run
//! use std::path::Path;
//!
//! use depscope::scanner::ProjectScanner;
//!
//! let scanner = ProjectScanner::new();
//! if let Some(project) = scanner.scan_single_project(Path::new("/path/to/app")) {
//!     println!("{} is a {} project", project.name(), project.project_type());
//!     for dep in project.dependencies() {
//!         println!("  {} {} ({})", dep.name, dep.version, dep.dependency_type);
//!     }
//! }
//! ```
//!
//! ### Example: Globally Installed Packages
//!
//! ```no_run
//! use depscope::global_scanner::GlobalScanner;
//!
//! let mut scanner = GlobalScanner::new();
//! let dependencies = scanner.scan_all_global_dependencies();
//!
//! // Managers that are absent or misbehaving simply contribute nothing
//! for manager in scanner.detected_package_managers() {
//!     let count = dependencies
//!         .iter()
//!         .filter(|dep| dep.package_manager == Some(*manager))
//!         .count();
//!     println!("{manager}: {count} packages");
//! }
//! ```

// Private modules
mod constants;
mod progress;

// Public modules
pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod executors;
pub mod global_scanner;
pub mod parsers;
pub mod reports;
pub mod scanner;
pub mod utils;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    execute_command(cli.command)
}
