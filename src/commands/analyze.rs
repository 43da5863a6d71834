//! Analyze command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::AnalyzeConfig;
use crate::error::DepscopeError;

impl FromCommand for AnalyzeConfig {
    fn from_command(command: Commands) -> Result<Self, DepscopeError> {
        match command {
            Commands::Analyze {
                scan,
                format,
                limit,
            } => AnalyzeConfig::builder()
                .with_path(scan.path.clone())
                .with_depth(scan.depth)
                .with_parallel(scan.parallel())
                .with_limit(limit.limit)
                .with_format(format.format)
                .build(),
            _ => Err(DepscopeError::ConfigurationError {
                message: "Invalid command type for AnalyzeConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(AnalyzeConfig);

/// Execute the analyze command for cross-project dependency analytics
pub fn execute_analyze_command(command: Commands) -> Result<()> {
    let config = AnalyzeConfig::from_command(command)
        .wrap_err("Failed to parse analyze command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::analyze::AnalyzeExecutor;
    AnalyzeExecutor::execute(config)
}
