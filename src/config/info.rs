//! Info command configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;

/// Configuration for the info command
#[derive(Debug, Clone)]
pub struct InfoConfig {
    /// Project directory to inspect
    pub path: PathBuf,
    /// Output format for the detail view
    pub format: OutputFormat,
}

impl InfoConfig {
    pub fn builder() -> InfoConfigBuilder {
        InfoConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct InfoConfigBuilder {
    path: Option<PathBuf>,
    format: Option<OutputFormat>,
}

impl InfoConfigBuilder {
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl crate::common::ConfigBuilder for InfoConfigBuilder {
    type Config = InfoConfig;

    fn build(self) -> Result<Self::Config, crate::error::DepscopeError> {
        Ok(InfoConfig {
            path: self.path.ok_or_else(|| {
                crate::error::DepscopeError::ConfigurationError {
                    message: "Missing required field: path".to_string(),
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
