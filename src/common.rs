//! Common functionality shared across commands

use std::path::PathBuf;

use clap::Args;

use crate::constants::scan::DEFAULT_MAX_DEPTH;

/// Scan arguments shared by the scan and analyze commands
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Directory to scan (defaults to the current directory)
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Traversal depth below the scan root
    #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH, env = "DEPSCOPE_DEPTH")]
    pub depth: usize,

    /// Disable parallel parsing of independent subtrees
    #[arg(long = "no-parallel", env = "DEPSCOPE_NO_PARALLEL")]
    pub no_parallel: bool,
}

impl ScanArgs {
    pub fn parallel(&self) -> bool {
        !self.no_parallel
    }
}

/// Common output format arguments
#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "DEPSCOPE_FORMAT")]
    pub format: crate::cli::OutputFormat,
}

/// Common row-limit arguments
#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    /// Maximum number of rows to display (shows all by default)
    #[arg(short, long, env = "DEPSCOPE_LIMIT")]
    pub limit: Option<usize>,
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::DepscopeError>;
}

/// Trait for configurations that can be created from CLI commands
/// This trait simplifies command-to-config conversions
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands) -> Result<Self, crate::error::DepscopeError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::DepscopeError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}
