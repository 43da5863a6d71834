use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use console::style;

use super::decoders::{
    RawPackage, decode_brew_list, decode_npm_list, decode_pip_list, decode_yarn_list,
};
use super::process::run_with_timeout;
use crate::constants::process::COMMAND_TIMEOUT;
use crate::core::{DependencyInfo, DependencyType, PackageManagerType};
use crate::error::DepscopeError;
use crate::progress::ProgressReporter;
use crate::utils::fs::dir_size;

#[cfg(windows)]
const NPM_PROGRAM: &str = "npm.cmd";
#[cfg(not(windows))]
const NPM_PROGRAM: &str = "npm";

#[cfg(windows)]
const YARN_PROGRAM: &str = "yarn.cmd";
#[cfg(not(windows))]
const YARN_PROGRAM: &str = "yarn";

/// How per-package install paths hang off a manager's reported root
#[derive(Debug, Clone, Copy)]
pub(crate) enum RootLayout {
    /// `<root>/<package>` (npm root -g already points at node_modules;
    /// brew --cellar holds one keg per formula)
    Direct,
    /// `<root>/node_modules/<package>` (yarn global dir)
    NodeModules,
}

/// Everything needed to interrogate one package manager
pub(crate) struct ManagerProbe {
    pub manager: PackageManagerType,
    pub program: String,
    pub version_args: &'static [&'static str],
    pub list_args: &'static [&'static str],
    pub root_args: Option<&'static [&'static str]>,
    pub root_layout: RootLayout,
    pub decode: fn(&str) -> Result<Vec<RawPackage>, DepscopeError>,
}

fn default_probes() -> Vec<ManagerProbe> {
    vec![
        ManagerProbe {
            manager: PackageManagerType::Npm,
            program: NPM_PROGRAM.to_string(),
            version_args: &["--version"],
            list_args: &["list", "-g", "--json", "--depth=0"],
            root_args: Some(&["root", "-g"]),
            root_layout: RootLayout::Direct,
            decode: decode_npm_list,
        },
        ManagerProbe {
            manager: PackageManagerType::Yarn,
            program: YARN_PROGRAM.to_string(),
            version_args: &["--version"],
            list_args: &["global", "list", "--json"],
            root_args: Some(&["global", "dir"]),
            root_layout: RootLayout::NodeModules,
            decode: decode_yarn_list,
        },
        ManagerProbe {
            manager: PackageManagerType::Pip,
            program: "pip".to_string(),
            version_args: &["--version"],
            list_args: &["list", "--format=json"],
            root_args: None,
            root_layout: RootLayout::Direct,
            decode: decode_pip_list,
        },
        ManagerProbe {
            manager: PackageManagerType::Brew,
            program: "brew".to_string(),
            version_args: &["--version"],
            list_args: &["info", "--json=v1", "--installed"],
            root_args: Some(&["--cellar"]),
            root_layout: RootLayout::Direct,
            decode: decode_brew_list,
        },
    ]
}

/// Interrogates host package managers for globally installed packages.
///
/// The detected-manager set belongs to this instance and is reset at the
/// start of every scan call; it reflects only probes that succeeded in the
/// most recent call.
pub struct GlobalScanner {
    probes: Vec<ManagerProbe>,
    detected: BTreeSet<PackageManagerType>,
}

impl Default for GlobalScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalScanner {
    pub fn new() -> Self {
        Self {
            probes: default_probes(),
            detected: BTreeSet::new(),
        }
    }

    pub(crate) fn with_probes(probes: Vec<ManagerProbe>) -> Self {
        Self {
            probes,
            detected: BTreeSet::new(),
        }
    }

    /// Run every supported probe and concatenate the successes
    pub fn scan_all_global_dependencies(&mut self) -> Vec<DependencyInfo> {
        self.scan_all_with_progress(None)
    }

    pub fn scan_all_with_progress(
        &mut self,
        progress: Option<&ProgressReporter>,
    ) -> Vec<DependencyInfo> {
        self.detected.clear();

        let mut dependencies = Vec::new();
        for index in 0..self.probes.len() {
            if let Some(p) = progress {
                p.probing_manager(self.probes[index].manager.as_str());
            }
            dependencies.extend(self.scan_probe(index));
        }
        dependencies
    }

    /// Run exactly one manager's probe. A manager without a registered
    /// probe (e.g. cargo) contributes nothing.
    pub fn scan_by_package_manager(
        &mut self,
        manager: PackageManagerType,
    ) -> Vec<DependencyInfo> {
        self.detected.clear();

        match self.probes.iter().position(|probe| probe.manager == manager) {
            Some(index) => self.scan_probe(index),
            None => Vec::new(),
        }
    }

    /// Managers whose availability probe succeeded in the most recent scan
    pub fn detected_package_managers(&self) -> &BTreeSet<PackageManagerType> {
        &self.detected
    }

    fn scan_probe(&mut self, index: usize) -> Vec<DependencyInfo> {
        let manager = self.probes[index].manager;
        match run_probe(&self.probes[index]) {
            Ok(dependencies) => {
                self.detected.insert(manager);
                dependencies
            }
            Err(DepscopeError::CommandUnavailable { .. }) => {
                // Not installed; silently contributes nothing
                Vec::new()
            }
            Err(e) => {
                eprintln!("{} Skipping {}: {}", style("⚠").yellow(), manager, e);
                Vec::new()
            }
        }
    }
}

/// The full three-step protocol for one manager. Any error is this
/// manager's alone.
fn run_probe(probe: &ManagerProbe) -> Result<Vec<DependencyInfo>, DepscopeError> {
    // 1. Availability: the version command must exit 0
    run_with_timeout(&probe.program, probe.version_args, COMMAND_TIMEOUT)?;

    // 2. Inventory
    let listing = run_with_timeout(&probe.program, probe.list_args, COMMAND_TIMEOUT)?;
    let packages = (probe.decode)(&listing.stdout)?;

    // 3. Normalization, with the installation root where one exists
    let root = probe.root_args.and_then(|args| {
        run_with_timeout(&probe.program, args, COMMAND_TIMEOUT)
            .ok()
            .map(|output| PathBuf::from(output.stdout.trim()))
            .filter(|path| !path.as_os_str().is_empty())
    });

    Ok(packages
        .into_iter()
        .map(|package| normalize(probe, root.as_deref(), package))
        .collect())
}

fn normalize(
    probe: &ManagerProbe,
    root: Option<&Path>,
    package: RawPackage,
) -> DependencyInfo {
    let mut dep = DependencyInfo::new(
        &package.name,
        &package.version,
        DependencyType::Production,
    );
    dep.package_manager = Some(probe.manager);
    dep.description = package.description;

    if let Some(root) = root {
        let install_path = package_dir(root, probe.root_layout, &package.name);
        if install_path.is_dir() {
            dep.size_bytes = dir_size(&install_path);
        }
        dep.install_path = Some(install_path);
    }

    dep
}

/// Per-package directory under the manager's root, handling scoped npm
/// names (`@scope/name` nests one directory deeper)
fn package_dir(root: &Path, layout: RootLayout, package_name: &str) -> PathBuf {
    let base = match layout {
        RootLayout::Direct => root.to_path_buf(),
        RootLayout::NodeModules => root.join("node_modules"),
    };

    if let Some(stripped) = package_name.strip_prefix('@')
        && let Some((scope, name)) = stripped.split_once('/')
    {
        return base.join(format!("@{scope}")).join(name);
    }

    base.join(package_name)
}
