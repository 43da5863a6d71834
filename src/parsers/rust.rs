//! Rust project parsing (Cargo.toml)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, NamedSource, Result, SourceSpan};
use serde::Deserialize;

use super::{ManifestParser, canonical_dir, directory_name};
use crate::core::{DependencyInfo, DependencyType, ProjectInfo, ProjectType};
use crate::error::DepscopeError;
use crate::utils::fs::dir_size;

const MANIFEST: &str = "Cargo.toml";

#[derive(Debug, Clone, Deserialize)]
struct CargoManifest {
    package: Option<Package>,
    dependencies: Option<BTreeMap<String, CargoDependency>>,
    #[serde(rename = "dev-dependencies")]
    dev_dependencies: Option<BTreeMap<String, CargoDependency>>,
}

#[derive(Debug, Clone, Deserialize)]
struct Package {
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CargoDependency {
    Simple(String),
    Detailed(DetailedDependency),
}

#[derive(Debug, Clone, Deserialize)]
struct DetailedDependency {
    version: Option<String>,
}

impl CargoManifest {
    fn parse_file(path: &Path) -> Result<Self, DepscopeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DepscopeError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&content).map_err(|e| {
            // Try to extract span information from the error
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            DepscopeError::TomlManifestError(Box::new(crate::error::TomlManifestError {
                file: path.display().to_string(),
                source_code: NamedSource::new(path.display().to_string(), content.clone()),
                span,
                source: e,
            }))
        })
    }
}

/// Declared version range of a dependency; path/workspace entries without a
/// version collapse to `*`
fn declared_version(dep: &CargoDependency) -> String {
    match dep {
        CargoDependency::Simple(version) => version.clone(),
        CargoDependency::Detailed(detailed) => {
            detailed.version.clone().unwrap_or_else(|| "*".to_string())
        }
    }
}

pub struct RustParser;

impl ManifestParser for RustParser {
    fn project_type(&self) -> ProjectType {
        ProjectType::Rust
    }

    fn manifest_names(&self) -> &'static [&'static str] {
        &[MANIFEST]
    }

    fn parse_project(&self, dir: &Path) -> Result<ProjectInfo> {
        let manifest_path = dir.join(MANIFEST);

        let mut builder = ProjectInfo::builder()
            .with_project_type(ProjectType::Rust)
            .with_path(canonical_dir(dir))
            .with_manifest_path(manifest_path.clone());

        let Ok(manifest) = CargoManifest::parse_file(&manifest_path) else {
            return builder
                .with_name(directory_name(dir))
                .build()
                .into_diagnostic();
        };

        let name = manifest
            .package
            .as_ref()
            .and_then(|package| package.name.clone())
            .unwrap_or_else(|| directory_name(dir));

        let mut dependencies = Vec::new();
        collect_dependencies(
            manifest.dependencies.as_ref(),
            DependencyType::Production,
            &mut dependencies,
        );
        collect_dependencies(
            manifest.dev_dependencies.as_ref(),
            DependencyType::Development,
            &mut dependencies,
        );

        builder = builder.with_name(name).with_dependencies(dependencies);
        builder.build().into_diagnostic()
    }
}

fn collect_dependencies(
    declared: Option<&BTreeMap<String, CargoDependency>>,
    dependency_type: DependencyType,
    out: &mut Vec<DependencyInfo>,
) {
    let Some(declared) = declared else {
        return;
    };

    for (name, entry) in declared {
        let version = declared_version(entry);
        let mut dep = DependencyInfo::new(name, &version, dependency_type);

        if let Some(source_dir) = registry_source_dir(name, &version) {
            dep.size_bytes = dir_size(&source_dir);
            dep.install_path = Some(source_dir);
        }

        out.push(dep);
    }
}

/// Unpacked sources in the local cargo registry. Only exact versions can be
/// located; ranges and path/workspace entries are left unmeasured.
fn registry_source_dir(name: &str, version: &str) -> Option<PathBuf> {
    if version == "*" || !version.chars().next()?.is_ascii_digit() {
        return None;
    }

    let registry_src = dirs::home_dir()?.join(".cargo").join("registry").join("src");
    let entries = std::fs::read_dir(&registry_src).ok()?;

    let wanted = format!("{name}-{version}");
    for index_dir in entries.flatten() {
        let candidate = index_dir.path().join(&wanted);
        if candidate.is_dir() {
            return Some(candidate);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn parse(dir: &Path) -> ProjectInfo {
        RustParser.parse_project(dir).unwrap()
    }

    #[test]
    fn test_parse_crate_with_dependencies() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("Cargo.toml"),
            r#"
[package]
name = "my-crate"

[dependencies]
serde = { version = "1.0", features = ["derive"] }
walkdir = "2.5"
local-helper = { path = "../helper" }

[dev-dependencies]
tempfile = "3.20"
"#,
        )
        .unwrap();

        let project = parse(temp.path());

        assert_eq!(project.name(), "my-crate");
        assert_eq!(project.project_type(), ProjectType::Rust);
        assert_eq!(project.dependencies().len(), 4);

        let serde_dep = project
            .dependencies()
            .iter()
            .find(|d| d.name == "serde")
            .unwrap();
        assert_eq!(serde_dep.version, "1.0");
        assert_eq!(serde_dep.dependency_type, DependencyType::Production);

        let local = project
            .dependencies()
            .iter()
            .find(|d| d.name == "local-helper")
            .unwrap();
        assert_eq!(local.version, "*");

        let tempfile_dep = project
            .dependencies()
            .iter()
            .find(|d| d.name == "tempfile")
            .unwrap();
        assert_eq!(tempfile_dep.dependency_type, DependencyType::Development);
    }

    #[test]
    fn test_malformed_manifest_yields_empty_dependencies() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Cargo.toml"), "[package\nbroken").unwrap();

        let project = parse(temp.path());
        assert!(project.dependencies().is_empty());
    }

    #[test]
    fn test_workspace_manifest_uses_directory_name() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("monorepo");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("Cargo.toml"),
            "[workspace]\nmembers = [\"a\", \"b\"]\n",
        )
        .unwrap();

        let project = parse(&dir);
        assert_eq!(project.name(), "monorepo");
        assert!(project.dependencies().is_empty());
    }

    #[test]
    fn test_parse_file_reports_span_on_bad_toml() {
        let temp = TempDir::new().unwrap();
        let manifest = temp.path().join("Cargo.toml");
        fs::write(&manifest, "invalid = toml content").unwrap();

        let err = CargoManifest::parse_file(&manifest).unwrap_err();
        assert!(matches!(err, DepscopeError::TomlManifestError(_)));
    }
}
