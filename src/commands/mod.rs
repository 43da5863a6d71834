//! Command implementations for the depscope CLI
//!
//! This module contains the implementations for each CLI command:
//! - scan: Survey a directory tree for projects
//! - analyze: Cross-project dependency analytics
//! - info: Detailed information for a single project
//! - globals: Globally installed dependencies

pub mod analyze;
pub mod globals;
pub mod info;
pub mod scan;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Scan { .. } => scan::execute_scan_command(command),
        Commands::Analyze { .. } => analyze::execute_analyze_command(command),
        Commands::Info { .. } => info::execute_info_command(command),
        Commands::Globals { .. } => globals::execute_globals_command(command),
    }
}
