//! Globals command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::GlobalsConfig;
use crate::error::DepscopeError;

impl FromCommand for GlobalsConfig {
    fn from_command(command: Commands) -> Result<Self, DepscopeError> {
        match command {
            Commands::Globals {
                manager,
                format,
                limit,
            } => GlobalsConfig::builder()
                .with_manager(manager)
                .with_limit(limit.limit)
                .with_format(format.format)
                .build(),
            _ => Err(DepscopeError::ConfigurationError {
                message: "Invalid command type for GlobalsConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(GlobalsConfig);

/// Execute the globals command for globally installed dependencies
pub fn execute_globals_command(command: Commands) -> Result<()> {
    let config = GlobalsConfig::from_command(command)
        .wrap_err("Failed to parse globals command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::globals::GlobalsExecutor;
    GlobalsExecutor::execute(config)
}
