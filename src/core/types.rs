//! Core type definitions
//!
//! This module contains the basic data structures used throughout the
//! application, with minimal logic - focusing on data representation.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Ecosystem a project belongs to, keyed by its manifest kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    NodeJs,
    Java,
    Python,
    Rust,
    Go,
    Unknown,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::NodeJs => "nodejs",
            ProjectType::Java => "java",
            ProjectType::Python => "python",
            ProjectType::Rust => "rust",
            ProjectType::Go => "go",
            ProjectType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nodejs" | "node" => Ok(ProjectType::NodeJs),
            "java" => Ok(ProjectType::Java),
            "python" => Ok(ProjectType::Python),
            "rust" => Ok(ProjectType::Rust),
            "go" | "golang" => Ok(ProjectType::Go),
            other => Err(format!("unknown project type '{other}'")),
        }
    }
}

/// Declared role of a dependency within its project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    Production,
    Development,
}

impl std::fmt::Display for DependencyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyType::Production => write!(f, "production"),
            DependencyType::Development => write!(f, "development"),
        }
    }
}

/// System-wide package manager owning globally installed packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerType {
    Npm,
    Yarn,
    Pip,
    Brew,
    Cargo,
    Unknown,
}

impl PackageManagerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManagerType::Npm => "npm",
            PackageManagerType::Yarn => "yarn",
            PackageManagerType::Pip => "pip",
            PackageManagerType::Brew => "brew",
            PackageManagerType::Cargo => "cargo",
            PackageManagerType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PackageManagerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PackageManagerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(PackageManagerType::Npm),
            "yarn" => Ok(PackageManagerType::Yarn),
            "pip" => Ok(PackageManagerType::Pip),
            "brew" | "homebrew" => Ok(PackageManagerType::Brew),
            "cargo" => Ok(PackageManagerType::Cargo),
            other => Err(format!("unknown package manager '{other}'")),
        }
    }
}

/// One declared (or globally installed) dependency, normalized across
/// ecosystems. Identity within a project is (name, version); for global
/// records it is (name, package_manager).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyInfo {
    pub name: String,
    pub version: String,
    pub installed_version: Option<String>,
    pub dependency_type: DependencyType,
    /// Set for global records only; project-local dependencies are owned by
    /// the project, not a system-wide manager
    pub package_manager: Option<PackageManagerType>,
    pub size_bytes: u64,
    pub install_path: Option<PathBuf>,
    pub description: Option<String>,
}

impl DependencyInfo {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        dependency_type: DependencyType,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            installed_version: None,
            dependency_type,
            package_manager: None,
            size_bytes: 0,
            install_path: None,
            description: None,
        }
    }
}

/// A directory recognized as an independent dependency-graph root.
/// Immutable after construction; `total_size_bytes` always equals the sum
/// of the dependency sizes because it is computed by the builder.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    name: String,
    project_type: ProjectType,
    path: PathBuf,
    manifest_path: PathBuf,
    dependencies: Vec<DependencyInfo>,
    total_size_bytes: u64,
    metadata: BTreeMap<String, String>,
}

impl ProjectInfo {
    pub fn builder() -> ProjectInfoBuilder {
        ProjectInfoBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn manifest_path(&self) -> &PathBuf {
        &self.manifest_path
    }

    pub fn dependencies(&self) -> &[DependencyInfo] {
        &self.dependencies
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.total_size_bytes
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum ProjectInfoBuilderError {
    #[error("Project name is required")]
    #[diagnostic(
        code(depscope::core::missing_project_name),
        help("Provide a name for the project using with_name()")
    )]
    MissingName,

    #[error("Project type is required")]
    #[diagnostic(
        code(depscope::core::missing_project_type),
        help("Provide a type for the project using with_project_type()")
    )]
    MissingProjectType,

    #[error("Project path is required")]
    #[diagnostic(
        code(depscope::core::missing_project_path),
        help("Provide a path for the project using with_path()")
    )]
    MissingPath,

    #[error("Project manifest path is required")]
    #[diagnostic(
        code(depscope::core::missing_manifest_path),
        help("Provide a manifest path using with_manifest_path()")
    )]
    MissingManifestPath,
}

#[derive(Default)]
pub struct ProjectInfoBuilder {
    name: Option<String>,
    project_type: Option<ProjectType>,
    path: Option<PathBuf>,
    manifest_path: Option<PathBuf>,
    dependencies: Vec<DependencyInfo>,
    metadata: BTreeMap<String, String>,
}

impl ProjectInfoBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = Some(project_type);
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<DependencyInfo>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn add_dependency(mut self, dependency: DependencyInfo) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<ProjectInfo, ProjectInfoBuilderError> {
        let total_size_bytes = self.dependencies.iter().map(|d| d.size_bytes).sum();

        Ok(ProjectInfo {
            name: self.name.ok_or(ProjectInfoBuilderError::MissingName)?,
            project_type: self
                .project_type
                .ok_or(ProjectInfoBuilderError::MissingProjectType)?,
            path: self.path.ok_or(ProjectInfoBuilderError::MissingPath)?,
            manifest_path: self
                .manifest_path
                .ok_or(ProjectInfoBuilderError::MissingManifestPath)?,
            dependencies: self.dependencies,
            total_size_bytes,
            metadata: self.metadata,
        })
    }
}

/// Aggregate counters for an analysis run
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisSummary {
    pub total_projects: usize,
    /// Every occurrence across every project counted separately
    pub total_dependencies: usize,
    pub total_size_bytes: u64,
}

/// One dependency occurrence in the size ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LargestDependency {
    pub name: String,
    pub project: String,
    pub size_bytes: u64,
}

/// A dependency name present in two or more distinct projects
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateDependency {
    pub name: String,
    pub project_count: usize,
    pub version_count: usize,
    pub total_size_bytes: u64,
    /// Reclaimable space assuming the largest copy is retained
    pub potential_savings: u64,
    pub projects: Vec<PathBuf>,
}

/// Advisory cleanup action, ranked by estimated savings
#[derive(Debug, Clone, Serialize)]
pub struct CleanupSuggestion {
    pub title: String,
    pub description: String,
    pub potential_savings: u64,
}

/// Result of analyzing a set of projects. Derived fresh per call and never
/// persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub largest_dependencies: Vec<LargestDependency>,
    pub duplicate_dependencies: Vec<DuplicateDependency>,
    pub cleanup_suggestions: Vec<CleanupSuggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_round_trip() {
        assert_eq!("nodejs".parse::<ProjectType>().unwrap(), ProjectType::NodeJs);
        assert_eq!("rust".parse::<ProjectType>().unwrap(), ProjectType::Rust);
        assert_eq!(ProjectType::Python.to_string(), "python");
        assert!("cobol".parse::<ProjectType>().is_err());
    }

    #[test]
    fn test_package_manager_round_trip() {
        assert_eq!(
            "brew".parse::<PackageManagerType>().unwrap(),
            PackageManagerType::Brew
        );
        assert_eq!(PackageManagerType::Npm.to_string(), "npm");
        assert!("apt".parse::<PackageManagerType>().is_err());
    }

    #[test]
    fn test_project_info_builder_computes_total_size() {
        let mut dep_a = DependencyInfo::new("a", "1.0.0", DependencyType::Production);
        dep_a.size_bytes = 100;
        let mut dep_b = DependencyInfo::new("b", "2.0.0", DependencyType::Development);
        dep_b.size_bytes = 40;

        let project = ProjectInfo::builder()
            .with_name("demo")
            .with_project_type(ProjectType::NodeJs)
            .with_path("/tmp/demo")
            .with_manifest_path("/tmp/demo/package.json")
            .with_dependencies(vec![dep_a, dep_b])
            .build()
            .unwrap();

        assert_eq!(project.total_size_bytes(), 140);
        assert_eq!(project.dependencies().len(), 2);
    }

    #[test]
    fn test_project_info_builder_missing_fields() {
        let err = ProjectInfo::builder().build().unwrap_err();
        assert!(matches!(err, ProjectInfoBuilderError::MissingName));

        let err = ProjectInfo::builder()
            .with_name("demo")
            .build()
            .unwrap_err();
        assert!(matches!(err, ProjectInfoBuilderError::MissingProjectType));
    }

    #[test]
    fn test_metadata_entries_are_ordered() {
        let project = ProjectInfo::builder()
            .with_name("demo")
            .with_project_type(ProjectType::Java)
            .with_path("/tmp/demo")
            .with_manifest_path("/tmp/demo/pom.xml")
            .with_metadata_entry("has_wrapper", "true")
            .with_metadata_entry("build_tool", "maven")
            .build()
            .unwrap();

        let keys: Vec<_> = project.metadata().keys().collect();
        assert_eq!(keys, vec!["build_tool", "has_wrapper"]);
    }
}
