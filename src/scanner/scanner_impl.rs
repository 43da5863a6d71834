use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use console::style;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::constants::scan::PRUNED_DIRS;
use crate::core::{ProjectInfo, ProjectType};
use crate::parsers::ParserRegistry;
use crate::progress::ProgressReporter;

pub struct ProjectScanner {
    registry: ParserRegistry,
}

impl Default for ProjectScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectScanner {
    /// Scanner with the built-in parsers in their documented tie-break order
    pub fn new() -> Self {
        Self {
            registry: ParserRegistry::with_default_parsers(),
        }
    }

    /// Scanner over a caller-assembled registry
    pub fn with_registry(registry: ParserRegistry) -> Self {
        Self { registry }
    }

    /// Discover and parse every project under `root`, up to `max_depth`
    /// directory levels below it. Result ordering is unspecified when
    /// `parallel` is enabled; callers must not depend on it.
    pub fn scan_directory(&self, root: &Path, max_depth: usize, parallel: bool) -> Vec<ProjectInfo> {
        self.scan_directory_with_progress(root, max_depth, parallel, None)
    }

    pub fn scan_directory_with_progress(
        &self,
        root: &Path,
        max_depth: usize,
        parallel: bool,
        progress: Option<&ProgressReporter>,
    ) -> Vec<ProjectInfo> {
        if !root.exists() {
            eprintln!(
                "{} Path '{}' does not exist",
                style("⚠").yellow(),
                root.display()
            );
            return Vec::new();
        }

        if !root.is_dir() {
            eprintln!(
                "{} Path '{}' is not a directory",
                style("⚠").yellow(),
                root.display()
            );
            return Vec::new();
        }

        let project_dirs = self.collect_project_dirs(root, max_depth, progress);

        if parallel {
            project_dirs
                .into_par_iter()
                .filter_map(|dir| self.parse_contained(&dir))
                .collect()
        } else {
            project_dirs
                .into_iter()
                .filter_map(|dir| self.parse_contained(&dir))
                .collect()
        }
    }

    /// Apply the registry exactly once to `path`
    pub fn scan_single_project(&self, path: &Path) -> Option<ProjectInfo> {
        let parser = self.registry.find_parser(path)?;
        self.parse_with(parser, path)
    }

    /// Project types the currently registered parsers can recognize
    pub fn supported_project_types(&self) -> BTreeSet<ProjectType> {
        self.registry.supported_types()
    }

    /// Walk phase: collect directories claimed by a parser. A claimed
    /// directory is not descended into - it owns everything below it.
    fn collect_project_dirs(
        &self,
        root: &Path,
        max_depth: usize,
        progress: Option<&ProgressReporter>,
    ) -> Vec<PathBuf> {
        let mut project_dirs = Vec::new();

        let mut walker = WalkDir::new(root)
            .max_depth(max_depth)
            .follow_links(false)
            .into_iter();

        while let Some(entry) = walker.next() {
            // Permission-denied and racing-delete entries are skipped, not fatal
            let Ok(entry) = entry else {
                continue;
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if entry.depth() > 0 {
                let name = entry.file_name().to_string_lossy();
                if PRUNED_DIRS.contains(&name.as_ref()) {
                    walker.skip_current_dir();
                    continue;
                }
            }

            if let Some(p) = progress {
                p.checking_directory(entry.path());
            }

            if self.registry.find_parser(entry.path()).is_some() {
                project_dirs.push(entry.into_path());
                walker.skip_current_dir();
            }
        }

        project_dirs
    }

    /// Parse phase: one directory, failures contained to that project
    fn parse_contained(&self, dir: &Path) -> Option<ProjectInfo> {
        let parser = self.registry.find_parser(dir)?;
        self.parse_with(parser, dir)
    }

    fn parse_with(
        &self,
        parser: &dyn crate::parsers::ManifestParser,
        dir: &Path,
    ) -> Option<ProjectInfo> {
        match parser.parse_project(dir) {
            Ok(project) => Some(project),
            Err(e) => {
                eprintln!(
                    "{} Failed to parse project '{}': {}",
                    style("⚠").yellow(),
                    dir.display(),
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::constants::scan::DEFAULT_MAX_DEPTH;

    fn write_package_json(dir: &Path, name: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join("package.json"),
            format!(r#"{{"name": "{name}", "version": "1.0.0"}}"#),
        )
        .unwrap();
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp = TempDir::new().unwrap();
        let scanner = ProjectScanner::new();

        let projects = scanner.scan_directory(temp.path(), DEFAULT_MAX_DEPTH, false);
        assert!(projects.is_empty());
    }

    #[test]
    fn test_scan_nonexistent_path() {
        let temp = TempDir::new().unwrap();
        let scanner = ProjectScanner::new();

        let projects =
            scanner.scan_directory(&temp.path().join("nope"), DEFAULT_MAX_DEPTH, false);
        assert!(projects.is_empty());
    }

    #[test]
    fn test_scan_finds_multiple_projects() {
        let temp = TempDir::new().unwrap();
        write_package_json(&temp.path().join("project1"), "project1");
        write_package_json(&temp.path().join("subdir/project2"), "project2");

        let scanner = ProjectScanner::new();
        let projects = scanner.scan_directory(temp.path(), DEFAULT_MAX_DEPTH, false);

        assert_eq!(projects.len(), 2);
        let names: BTreeSet<_> = projects.iter().map(|p| p.name().to_string()).collect();
        assert_eq!(
            names,
            BTreeSet::from(["project1".to_string(), "project2".to_string()])
        );
    }

    #[test]
    fn test_recognized_project_is_a_boundary() {
        let temp = TempDir::new().unwrap();
        write_package_json(&temp.path().join("outer"), "outer");
        // A nested manifest below a recognized project must not become a
        // second project
        write_package_json(&temp.path().join("outer/packages/inner"), "inner");

        let scanner = ProjectScanner::new();
        let projects = scanner.scan_directory(temp.path(), DEFAULT_MAX_DEPTH, false);

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name(), "outer");
    }

    #[test]
    fn test_no_returned_path_nested_in_another() {
        let temp = TempDir::new().unwrap();
        write_package_json(&temp.path().join("a"), "a");
        write_package_json(&temp.path().join("a/b"), "b");
        write_package_json(&temp.path().join("c/d"), "d");

        let scanner = ProjectScanner::new();
        let projects = scanner.scan_directory(temp.path(), DEFAULT_MAX_DEPTH, true);

        for left in &projects {
            for right in &projects {
                if left.path() != right.path() {
                    assert!(
                        !left.path().starts_with(right.path()),
                        "{} is nested inside {}",
                        left.path().display(),
                        right.path().display()
                    );
                }
            }
        }
    }

    #[test]
    fn test_pruned_dirs_are_not_descended() {
        let temp = TempDir::new().unwrap();
        write_package_json(&temp.path().join("app"), "app");
        // Manifests inside vendored trees of unrecognized parents stay
        // invisible
        write_package_json(&temp.path().join("junk/node_modules/leftover"), "leftover");

        let scanner = ProjectScanner::new();
        let projects = scanner.scan_directory(temp.path(), DEFAULT_MAX_DEPTH, false);

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name(), "app");
    }

    #[test]
    fn test_max_depth_zero_inspects_only_root() {
        let temp = TempDir::new().unwrap();
        write_package_json(temp.path(), "root-project");
        write_package_json(&temp.path().join("child"), "child");

        let scanner = ProjectScanner::new();
        let projects = scanner.scan_directory(temp.path(), 0, false);

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name(), "root-project");
    }

    #[test]
    fn test_max_depth_bounds_descent() {
        let temp = TempDir::new().unwrap();
        write_package_json(&temp.path().join("a/b/c/deep"), "deep");

        let scanner = ProjectScanner::new();
        assert!(scanner.scan_directory(temp.path(), 2, false).is_empty());
        assert_eq!(scanner.scan_directory(temp.path(), 4, false).len(), 1);
    }

    #[test]
    fn test_scan_single_project() {
        let temp = TempDir::new().unwrap();
        write_package_json(temp.path(), "single");

        let scanner = ProjectScanner::new();
        let project = scanner.scan_single_project(temp.path()).unwrap();

        assert_eq!(project.name(), "single");
        assert_eq!(project.project_type(), ProjectType::NodeJs);
    }

    #[test]
    fn test_scan_single_project_unrecognized() {
        let temp = TempDir::new().unwrap();
        let scanner = ProjectScanner::new();

        assert!(scanner.scan_single_project(temp.path()).is_none());
    }

    #[test]
    fn test_supported_project_types() {
        let scanner = ProjectScanner::new();
        let types = scanner.supported_project_types();

        assert!(types.contains(&ProjectType::NodeJs));
        assert!(types.contains(&ProjectType::Java));
        assert!(types.contains(&ProjectType::Python));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let temp = TempDir::new().unwrap();
        write_package_json(&temp.path().join("one"), "one");
        write_package_json(&temp.path().join("two"), "two");

        let scanner = ProjectScanner::new();
        let mut first = scanner.scan_directory(temp.path(), DEFAULT_MAX_DEPTH, true);
        let mut second = scanner.scan_directory(temp.path(), DEFAULT_MAX_DEPTH, true);

        first.sort_by(|a, b| a.path().cmp(b.path()));
        second.sort_by(|a, b| a.path().cmp(b.path()));

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.path(), b.path());
            assert_eq!(a.total_size_bytes(), b.total_size_bytes());
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let temp = TempDir::new().unwrap();
        write_package_json(&temp.path().join("one"), "one");
        write_package_json(&temp.path().join("two"), "two");
        write_package_json(&temp.path().join("nested/three"), "three");

        let scanner = ProjectScanner::new();
        let mut sequential = scanner.scan_directory(temp.path(), DEFAULT_MAX_DEPTH, false);
        let mut parallel = scanner.scan_directory(temp.path(), DEFAULT_MAX_DEPTH, true);

        sequential.sort_by(|a, b| a.path().cmp(b.path()));
        parallel.sort_by(|a, b| a.path().cmp(b.path()));

        let seq_paths: Vec<_> = sequential.iter().map(|p| p.path().clone()).collect();
        let par_paths: Vec<_> = parallel.iter().map(|p| p.path().clone()).collect();
        assert_eq!(seq_paths, par_paths);
    }
}
