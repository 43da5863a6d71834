//! Scan command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::ScanConfig;
use crate::error::DepscopeError;

impl FromCommand for ScanConfig {
    fn from_command(command: Commands) -> Result<Self, DepscopeError> {
        match command {
            Commands::Scan {
                scan,
                format,
                project_types,
            } => ScanConfig::builder()
                .with_path(scan.path.clone())
                .with_depth(scan.depth)
                .with_parallel(scan.parallel())
                .with_project_types(project_types)
                .with_format(format.format)
                .build(),
            _ => Err(DepscopeError::ConfigurationError {
                message: "Invalid command type for ScanConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(ScanConfig);

/// Execute the scan command for discovering projects
pub fn execute_scan_command(command: Commands) -> Result<()> {
    let config = ScanConfig::from_command(command)
        .wrap_err("Failed to parse scan command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::scan::ScanExecutor;
    ScanExecutor::execute(config)
}
