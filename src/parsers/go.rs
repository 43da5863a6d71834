//! Go project parsing (go.mod)
//!
//! go.mod is scanned line-by-line: the `module` directive names the project
//! and `require` entries become dependencies. `replace`/`exclude` directives
//! are skipped, like any other line that does not declare a requirement.

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};

use super::{ManifestParser, canonical_dir, directory_name};
use crate::core::{DependencyInfo, DependencyType, ProjectInfo, ProjectType};
use crate::utils::fs::dir_size;

const MANIFEST: &str = "go.mod";

pub struct GoParser;

impl ManifestParser for GoParser {
    fn project_type(&self) -> ProjectType {
        ProjectType::Go
    }

    fn manifest_names(&self) -> &'static [&'static str] {
        &[MANIFEST]
    }

    fn parse_project(&self, dir: &Path) -> Result<ProjectInfo> {
        let manifest_path = dir.join(MANIFEST);

        let (name, dependencies) = match std::fs::read_to_string(&manifest_path) {
            Ok(content) => scan_go_mod(&content),
            Err(_) => (None, Vec::new()),
        };

        ProjectInfo::builder()
            .with_name(name.unwrap_or_else(|| directory_name(dir)))
            .with_project_type(ProjectType::Go)
            .with_path(canonical_dir(dir))
            .with_manifest_path(manifest_path)
            .with_dependencies(dependencies)
            .build()
            .into_diagnostic()
    }
}

fn scan_go_mod(content: &str) -> (Option<String>, Vec<DependencyInfo>) {
    let mut module_name = None;
    let mut dependencies = Vec::new();
    let mut in_require_block = false;

    for line in content.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("module ") {
            module_name = Some(rest.trim().to_string());
            continue;
        }

        if line.starts_with("require (") {
            in_require_block = true;
            continue;
        }
        if in_require_block && line == ")" {
            in_require_block = false;
            continue;
        }

        let entry = if in_require_block {
            Some(line)
        } else {
            line.strip_prefix("require ")
        };

        if let Some(entry) = entry
            && let Some(dep) = require_entry(entry)
        {
            dependencies.push(dep);
        }
    }

    (module_name, dependencies)
}

/// Decode one `module/path v1.2.3` requirement line
fn require_entry(entry: &str) -> Option<DependencyInfo> {
    let mut parts = entry.split_whitespace();
    let module = parts.next()?;
    let version = parts.next()?;

    if !version.starts_with('v') {
        return None;
    }

    let mut dep = DependencyInfo::new(module, version, DependencyType::Production);

    if let Some(cache_dir) = module_cache_dir(module, version)
        && cache_dir.is_dir()
    {
        dep.size_bytes = dir_size(&cache_dir);
        dep.install_path = Some(cache_dir);
    }

    Some(dep)
}

/// Location in the module cache. The cache escapes uppercase letters with
/// `!`; that encoding is not reproduced, so mixed-case modules go
/// unmeasured.
fn module_cache_dir(module: &str, version: &str) -> Option<PathBuf> {
    let gopath = std::env::var_os("GOPATH")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join("go")))?;

    Some(gopath.join("pkg").join("mod").join(format!("{module}@{version}")))
}
