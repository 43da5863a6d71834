//! Node.js project parsing (package.json)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use serde::Deserialize;

use super::{ManifestParser, canonical_dir, directory_name};
use crate::core::{DependencyInfo, DependencyType, ProjectInfo, ProjectType};
use crate::utils::fs::dir_size;

const MANIFEST: &str = "package.json";
const VENDOR_DIR: &str = "node_modules";

/// Typed view of the fields depscope reads from package.json
#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(rename = "devDependencies", default)]
    dev_dependencies: BTreeMap<String, String>,
}

pub struct NodeJsParser;

impl ManifestParser for NodeJsParser {
    fn project_type(&self) -> ProjectType {
        ProjectType::NodeJs
    }

    fn manifest_names(&self) -> &'static [&'static str] {
        &[MANIFEST]
    }

    fn parse_project(&self, dir: &Path) -> Result<ProjectInfo> {
        let manifest_path = dir.join(MANIFEST);

        let manifest: Option<PackageJson> = std::fs::read_to_string(&manifest_path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok());

        let mut builder = ProjectInfo::builder()
            .with_project_type(ProjectType::NodeJs)
            .with_path(canonical_dir(dir))
            .with_manifest_path(manifest_path);

        let Some(manifest) = manifest else {
            // Malformed manifest: the project is still reported, without
            // dependencies
            return builder
                .with_name(directory_name(dir))
                .build()
                .into_diagnostic();
        };

        let name = manifest
            .name
            .clone()
            .unwrap_or_else(|| directory_name(dir));

        let mut dependencies = Vec::new();
        collect_dependencies(
            dir,
            &manifest.dependencies,
            DependencyType::Production,
            &mut dependencies,
        );
        collect_dependencies(
            dir,
            &manifest.dev_dependencies,
            DependencyType::Development,
            &mut dependencies,
        );

        builder = builder.with_name(name).with_dependencies(dependencies);
        builder.build().into_diagnostic()
    }
}

fn collect_dependencies(
    dir: &Path,
    declared: &BTreeMap<String, String>,
    dependency_type: DependencyType,
    out: &mut Vec<DependencyInfo>,
) {
    for (name, version) in declared {
        let mut dep = DependencyInfo::new(name, version, dependency_type);

        let installed = installed_package_dir(dir, name);
        if installed.is_dir() {
            dep.size_bytes = dir_size(&installed);
            dep.installed_version = installed_version(&installed);
            dep.install_path = Some(installed);
        }

        out.push(dep);
    }
}

/// Vendored location of a package, handling scoped names (`@scope/name`
/// nests one directory deeper)
fn installed_package_dir(project_dir: &Path, package_name: &str) -> PathBuf {
    let vendor = project_dir.join(VENDOR_DIR);

    if let Some(stripped) = package_name.strip_prefix('@')
        && let Some((scope, name)) = stripped.split_once('/')
    {
        return vendor.join(format!("@{scope}")).join(name);
    }

    vendor.join(package_name)
}

/// Resolved version from the vendored copy's own package.json
fn installed_version(package_dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(package_dir.join(MANIFEST)).ok()?;
    let json: serde_json::Value = serde_json::from_str(&content).ok()?;
    json.get("version")
        .and_then(|version| version.as_str())
        .map(String::from)
}
