//! Configuration constants for depscope
//!
//! This module contains all configurable constants used throughout the
//! application. These values can be overridden through environment variables or
//! configuration files.

use std::time::Duration;

/// Directory scan configuration
pub mod scan {
    /// Default traversal depth below the scan root
    pub const DEFAULT_MAX_DEPTH: usize = 5;

    /// Directory names never descended into. Vendored-dependency trees and
    /// build output are measured through their owning project, not re-scanned
    /// as nested projects.
    pub const PRUNED_DIRS: &[&str] = &[
        ".git",
        ".hg",
        ".svn",
        "node_modules",
        "target",
        "__pycache__",
        ".venv",
        "venv",
        ".tox",
        "build",
        "dist",
    ];
}

/// Analysis configuration
pub mod analysis {
    /// A singleton dependency at or above this size earns a cleanup
    /// suggestion of its own (100 MiB).
    pub const LARGE_DEPENDENCY_THRESHOLD: u64 = 100 * 1024 * 1024;
}

/// Subprocess configuration
pub mod process {
    use super::*;

    /// Upper bound for any single package-manager invocation. A manager
    /// that exceeds it is treated as unavailable; the other managers are
    /// unaffected.
    pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

    /// Poll interval while waiting for a child process to exit
    pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);
}

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the telescope animation
    pub const SPINNER_FRAMES: &[&str] = &["🔭 ", "🔭·", "🔭∘", "🔭○", "🔭◎", "🔭●", "🔭◉", "🔭✶"];
}

/// Output formatting configuration
pub mod output {
    /// Default output format when not specified
    pub const DEFAULT_FORMAT: &str = "human";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_constants() {
        assert_eq!(scan::DEFAULT_MAX_DEPTH, 5);
        assert!(scan::PRUNED_DIRS.contains(&"node_modules"));
        assert!(scan::PRUNED_DIRS.contains(&".git"));
    }

    #[test]
    fn test_process_constants() {
        assert_eq!(process::COMMAND_TIMEOUT, Duration::from_secs(30));
        assert!(process::WAIT_POLL_INTERVAL < process::COMMAND_TIMEOUT);
    }

    #[test]
    fn test_progress_constants() {
        assert_eq!(progress::TICK_INTERVAL, Duration::from_millis(100));
        assert_eq!(progress::SPINNER_FRAMES.len(), 8);
    }

    #[test]
    fn test_output_constants() {
        assert_eq!(output::DEFAULT_FORMAT, "human");
    }
}
