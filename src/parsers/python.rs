//! Python project parsing (pyproject.toml and requirements files)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use serde::Deserialize;

use super::{ManifestParser, canonical_dir, directory_name};
use crate::core::{DependencyInfo, DependencyType, ProjectInfo, ProjectType};
use crate::utils::fs::dir_size;

const PYPROJECT: &str = "pyproject.toml";
const REQUIREMENTS: &str = "requirements.txt";

#[derive(Debug, Deserialize)]
struct PyProject {
    project: Option<PyProjectTable>,
}

#[derive(Debug, Deserialize)]
struct PyProjectTable {
    name: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(rename = "optional-dependencies", default)]
    optional_dependencies: BTreeMap<String, Vec<String>>,
}

pub struct PythonParser;

impl ManifestParser for PythonParser {
    fn project_type(&self) -> ProjectType {
        ProjectType::Python
    }

    fn manifest_names(&self) -> &'static [&'static str] {
        &["pyproject.toml", "requirements.txt", "setup.py", "Pipfile"]
    }

    fn parse_project(&self, dir: &Path) -> Result<ProjectInfo> {
        let (name, manifest_path, dependencies) = if dir.join(PYPROJECT).is_file() {
            let manifest_path = dir.join(PYPROJECT);
            let (name, deps) = parse_pyproject(dir, &manifest_path);
            (name, manifest_path, deps)
        } else if dir.join(REQUIREMENTS).is_file() {
            let manifest_path = dir.join(REQUIREMENTS);
            let deps = parse_requirements(dir, &manifest_path, DependencyType::Production);
            (directory_name(dir), manifest_path, deps)
        } else {
            // setup.py / Pipfile mark the ecosystem but are not decoded;
            // the project is reported without dependencies
            let marker = self
                .manifest_names()
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
                .unwrap_or_else(|| dir.join(PYPROJECT));
            (directory_name(dir), marker, Vec::new())
        };

        ProjectInfo::builder()
            .with_name(name)
            .with_project_type(ProjectType::Python)
            .with_path(canonical_dir(dir))
            .with_manifest_path(manifest_path)
            .with_dependencies(dependencies)
            .build()
            .into_diagnostic()
    }
}

fn parse_pyproject(dir: &Path, manifest_path: &Path) -> (String, Vec<DependencyInfo>) {
    let decoded: Option<PyProject> = std::fs::read_to_string(manifest_path)
        .ok()
        .and_then(|content| toml::from_str(&content).ok());

    let Some(PyProject {
        project: Some(table),
    }) = decoded
    else {
        return (directory_name(dir), Vec::new());
    };

    let name = table.name.unwrap_or_else(|| directory_name(dir));

    let mut dependencies = Vec::new();
    for spec in &table.dependencies {
        if let Some(dep) = requirement_dependency(dir, spec, DependencyType::Production) {
            dependencies.push(dep);
        }
    }
    for specs in table.optional_dependencies.values() {
        for spec in specs {
            if let Some(dep) = requirement_dependency(dir, spec, DependencyType::Development) {
                dependencies.push(dep);
            }
        }
    }

    (name, dependencies)
}

fn parse_requirements(
    dir: &Path,
    manifest_path: &Path,
    dependency_type: DependencyType,
) -> Vec<DependencyInfo> {
    let Ok(content) = std::fs::read_to_string(manifest_path) else {
        return Vec::new();
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| requirement_dependency(dir, line, dependency_type))
        .collect()
}

/// Split a PEP 508-style requirement into name and version constraint.
/// Environment markers and extras stay with the constraint text.
fn split_requirement(spec: &str) -> Option<(String, String)> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }

    let split_at = spec
        .find(['=', '<', '>', '~', '!', ';', '[', '@', ' '])
        .unwrap_or(spec.len());

    let name = spec[..split_at].trim();
    if name.is_empty() {
        return None;
    }

    let constraint = spec[split_at..].trim();
    let version = constraint.strip_prefix("==").unwrap_or(constraint).trim();

    Some((
        name.to_string(),
        if version.is_empty() {
            "*".to_string()
        } else {
            version.to_string()
        },
    ))
}

fn requirement_dependency(
    dir: &Path,
    spec: &str,
    dependency_type: DependencyType,
) -> Option<DependencyInfo> {
    let (name, version) = split_requirement(spec)?;
    let mut dep = DependencyInfo::new(&name, version, dependency_type);

    if let Some(installed) = site_packages_dir(dir, &name) {
        dep.size_bytes = dir_size(&installed);
        dep.install_path = Some(installed);
    }

    Some(dep)
}

/// Installed copy inside a project-local virtualenv, when one exists
fn site_packages_dir(project_dir: &Path, package_name: &str) -> Option<PathBuf> {
    let normalized = package_name.to_ascii_lowercase().replace('-', "_");

    for venv_name in [".venv", "venv"] {
        let venv = project_dir.join(venv_name);
        if !venv.is_dir() {
            continue;
        }

        // Unix layout: <venv>/lib/pythonX.Y/site-packages
        let lib = venv.join("lib");
        if let Ok(entries) = std::fs::read_dir(&lib) {
            for entry in entries.flatten() {
                if !entry.file_name().to_string_lossy().starts_with("python") {
                    continue;
                }
                let candidate = entry.path().join("site-packages").join(&normalized);
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }

        // Windows layout: <venv>/Lib/site-packages
        let candidate = venv.join("Lib").join("site-packages").join(&normalized);
        if candidate.is_dir() {
            return Some(candidate);
        }
    }

    None
}
