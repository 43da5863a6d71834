//! Analyze command configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;

/// Configuration for the analyze command
///
/// This struct contains all options for scanning a tree and aggregating
/// its projects into an analysis report.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Directory to scan
    pub path: PathBuf,
    /// Traversal depth below the scan root
    pub depth: usize,
    /// Parse independent subtrees in parallel
    pub parallel: bool,
    /// Maximum number of rows per report section (None = all)
    pub limit: Option<usize>,
    /// Output format for the report
    pub format: OutputFormat,
}

impl AnalyzeConfig {
    pub fn builder() -> AnalyzeConfigBuilder {
        AnalyzeConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct AnalyzeConfigBuilder {
    path: Option<PathBuf>,
    depth: Option<usize>,
    parallel: Option<bool>,
    limit: Option<Option<usize>>,
    format: Option<OutputFormat>,
}

impl AnalyzeConfigBuilder {
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
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

impl crate::common::ConfigBuilder for AnalyzeConfigBuilder {
    type Config = AnalyzeConfig;

    fn build(self) -> Result<Self::Config, crate::error::DepscopeError> {
        Ok(AnalyzeConfig {
            path: self.path.ok_or_else(|| {
                crate::error::DepscopeError::ConfigurationError {
                    message: "Missing required field: path".to_string(),
                }
            })?,
            depth: self.depth.ok_or_else(|| {
                crate::error::DepscopeError::ConfigurationError {
                    message: "Missing required field: depth".to_string(),
                }
            })?,
            parallel: self.parallel.ok_or_else(|| {
                crate::error::DepscopeError::ConfigurationError {
                    message: "Missing required field: parallel".to_string(),
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
