//! Info command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::InfoConfig;
use crate::error::DepscopeError;

impl FromCommand for InfoConfig {
    fn from_command(command: Commands) -> Result<Self, DepscopeError> {
        match command {
            Commands::Info { path, format } => InfoConfig::builder()
                .with_path(path)
                .with_format(format.format)
                .build(),
            _ => Err(DepscopeError::ConfigurationError {
                message: "Invalid command type for InfoConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(InfoConfig);

/// Execute the info command for a single project
pub fn execute_info_command(command: Commands) -> Result<()> {
    let config = InfoConfig::from_command(command)
        .wrap_err("Failed to parse info command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::info::InfoExecutor;
    InfoExecutor::execute(config)
}
