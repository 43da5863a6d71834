//! Scan command configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::core::ProjectType;

/// Configuration for the scan command
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to scan
    pub path: PathBuf,
    /// Traversal depth below the scan root
    pub depth: usize,
    /// Parse independent subtrees in parallel
    pub parallel: bool,
    /// Restrict output to these project types (empty = all)
    pub project_types: Vec<ProjectType>,
    /// Output format for the listing
    pub format: OutputFormat,
}

impl ScanConfig {
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct ScanConfigBuilder {
    path: Option<PathBuf>,
    depth: Option<usize>,
    parallel: Option<bool>,
    project_types: Option<Vec<ProjectType>>,
    format: Option<OutputFormat>,
}

impl ScanConfigBuilder {
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

    pub fn with_project_types(mut self, project_types: Vec<ProjectType>) -> Self {
        self.project_types = Some(project_types);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl crate::common::ConfigBuilder for ScanConfigBuilder {
    type Config = ScanConfig;

    fn build(self) -> Result<Self::Config, crate::error::DepscopeError> {
        Ok(ScanConfig {
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
            project_types: self.project_types.ok_or_else(|| {
                crate::error::DepscopeError::ConfigurationError {
                    message: "Missing required field: project_types".to_string(),
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
