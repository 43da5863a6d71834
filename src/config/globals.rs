//! Globals command configuration

use crate::cli::OutputFormat;
use crate::core::PackageManagerType;

/// Configuration for the globals command
#[derive(Debug, Clone)]
pub struct GlobalsConfig {
    /// Query a single manager instead of all of them
    pub manager: Option<PackageManagerType>,
    /// Maximum number of rows to display (None = all)
    pub limit: Option<usize>,
    /// Output format for the listing
    pub format: OutputFormat,
}

impl GlobalsConfig {
    pub fn builder() -> GlobalsConfigBuilder {
        GlobalsConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct GlobalsConfigBuilder {
    manager: Option<Option<PackageManagerType>>,
    limit: Option<Option<usize>>,
    format: Option<OutputFormat>,
}

impl GlobalsConfigBuilder {
    pub fn with_manager(mut self, manager: Option<PackageManagerType>) -> Self {
        self.manager = Some(manager);
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl crate::common::ConfigBuilder for GlobalsConfigBuilder {
    type Config = GlobalsConfig;

    fn build(self) -> Result<Self::Config, crate::error::DepscopeError> {
        Ok(GlobalsConfig {
            manager: self.manager.ok_or_else(|| {
                crate::error::DepscopeError::ConfigurationError {
                    message: "Missing required field: manager".to_string(),
                }
            })?,
            limit: self.limit.ok_or_else(|| {
                crate::error::DepscopeError::ConfigurationError {
                    message: "Missing required field: limit".to_string(),
                }
            })?,
            format: self.format.ok_or_else(|| {
                crate::error::DepscopeError::ConfigurationError {
                    message: "Missing required field: format".to_string(),
                }
            })?,
        })
    }
}
