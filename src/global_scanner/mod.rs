//! # Global Dependency Module
//!
//! This module interrogates the host's package managers for globally
//! installed packages by invoking each manager's own CLI and normalizing its
//! output into [`DependencyInfo`](crate::core::DependencyInfo) records.
//!
//! ## Per-manager protocol
//!
//! 1. Availability probe: the manager's version command must exit 0
//! 2. Inventory command: structured listing, decoded per dialect (npm emits
//!    one JSON object keyed by package name, pip a JSON array, yarn
//!    newline-delimited JSON events, brew a JSON array of records)
//! 3. Normalization: records are tagged with the manager and, where the
//!    manager reports an installation root, given an install path and size
//!
//! ## Failure containment
//!
//! Every manager is fully independent: a missing executable, non-zero exit,
//! timeout, or undecodable payload costs that one manager its contribution
//! and nothing else. An absent manager is an empty result, not an error.
//!
//! ## Example
//!
//! ```no_run
//! use depscope::global_scanner::GlobalScanner;
//!
//! let mut scanner = GlobalScanner::new();
//! let dependencies = scanner.scan_all_global_dependencies();
//! println!(
//!     "{} packages from {:?}",
//!     dependencies.len(),
//!     scanner.detected_package_managers()
//! );
//! ```

mod decoders;
mod process;

mod scanner_impl;

pub use scanner_impl::*;
