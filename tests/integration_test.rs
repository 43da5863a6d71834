//! Integration tests for depscope using the library interface

use std::fs;
use std::path::Path;

use depscope::analyzer::DependencyAnalyzer;
use depscope::core::{DependencyType, ProjectType};
use depscope::scanner::ProjectScanner;
use tempfile::TempDir;

/// Helper to create a Node.js project with vendored dependencies of known
/// sizes
fn create_node_project(root: &Path, name: &str, deps: &[(&str, &str, usize)]) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();

    let dep_entries: Vec<String> = deps
        .iter()
        .map(|(dep, version, _)| format!(r#""{dep}": "{version}""#))
        .collect();
    fs::write(
        dir.join("package.json"),
        format!(
            r#"{{"name": "{name}", "version": "1.0.0", "dependencies": {{{}}}}}"#,
            dep_entries.join(", ")
        ),
    )
    .unwrap();

    for (dep, version, size) in deps {
        let installed = dir.join("node_modules").join(dep);
        fs::create_dir_all(&installed).unwrap();
        fs::write(
            installed.join("package.json"),
            format!(r#"{{"name": "{dep}", "version": "{version}"}}"#),
        )
        .unwrap();
        fs::write(installed.join("payload.bin"), vec![b'x'; *size]).unwrap();
    }
}

fn create_maven_project(root: &Path, name: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("pom.xml"),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>com.example</groupId>
    <artifactId>{name}</artifactId>
    <version>1.0.0</version>
    <dependencies>
        <dependency>
            <groupId>org.springframework</groupId>
            <artifactId>spring-core</artifactId>
            <version>5.3.21</version>
        </dependency>
        <dependency>
            <groupId>junit</groupId>
            <artifactId>junit</artifactId>
            <version>4.13.2</version>
            <scope>test</scope>
        </dependency>
    </dependencies>
</project>"#
        ),
    )
    .unwrap();
}

fn create_python_project(root: &Path, name: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("requirements.txt"), "requests==2.31.0\nnumpy>=1.24\n").unwrap();
}

fn create_rust_project(root: &Path, name: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Cargo.toml"),
        format!(
            r#"[package]
name = "{name}"
version = "0.1.0"

[dependencies]
serde = "1.0"

[dev-dependencies]
tempfile = "3.20"
"#
        ),
    )
    .unwrap();
}

fn create_go_project(root: &Path, name: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("go.mod"),
        "module example.com/server\n\ngo 1.22\n\nrequire github.com/gorilla/mux v1.8.1\n",
    )
    .unwrap();
}

fn create_mixed_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    create_node_project(root, "web", &[("lodash", "4.17.21", 140), ("react", "18.2.0", 50)]);
    create_node_project(root, "api", &[("lodash", "4.17.20", 100)]);
    create_maven_project(root, "backend");
    create_python_project(root, "ml-tool");
    create_rust_project(root, "cli-tool");
    create_go_project(root, "go-service");

    temp
}

#[test]
fn test_scan_discovers_every_ecosystem() {
    let temp = create_mixed_tree();
    let scanner = ProjectScanner::new();

    let projects = scanner.scan_directory(temp.path(), 5, true);

    assert_eq!(projects.len(), 6);

    let type_of = |name: &str| {
        projects
            .iter()
            .find(|p| p.name() == name || p.path().ends_with(name))
            .map(|p| p.project_type())
    };

    assert_eq!(type_of("web"), Some(ProjectType::NodeJs));
    assert_eq!(type_of("backend"), Some(ProjectType::Java));
    assert_eq!(type_of("ml-tool"), Some(ProjectType::Python));
    assert_eq!(type_of("cli-tool"), Some(ProjectType::Rust));
    assert_eq!(type_of("go-service"), Some(ProjectType::Go));
}

#[test]
fn test_no_project_is_nested_inside_another() {
    let temp = create_mixed_tree();
    // A manifest hiding below a recognized project must stay invisible
    create_node_project(&temp.path().join("web"), "embedded", &[]);

    let scanner = ProjectScanner::new();
    let projects = scanner.scan_directory(temp.path(), 5, true);

    for left in &projects {
        for right in &projects {
            if left.path() != right.path() {
                assert!(!left.path().starts_with(right.path()));
            }
        }
    }
    assert!(projects.iter().all(|p| p.name() != "embedded"));
}

#[test]
fn test_scan_is_idempotent_over_unmodified_tree() {
    let temp = create_mixed_tree();
    let scanner = ProjectScanner::new();

    let collect = || {
        let mut projects = scanner.scan_directory(temp.path(), 5, true);
        projects.sort_by(|a, b| a.path().cmp(b.path()));
        projects
            .iter()
            .map(|p| (p.path().clone(), p.total_size_bytes()))
            .collect::<Vec<_>>()
    };

    assert_eq!(collect(), collect());
}

#[test]
fn test_total_size_matches_dependency_sum() {
    let temp = create_mixed_tree();
    let scanner = ProjectScanner::new();

    for project in scanner.scan_directory(temp.path(), 5, false) {
        let sum: u64 = project.dependencies().iter().map(|d| d.size_bytes).sum();
        assert_eq!(project.total_size_bytes(), sum);
    }
}

#[test]
fn test_analysis_reports_duplicates_with_savings() {
    let temp = create_mixed_tree();
    let scanner = ProjectScanner::new();
    let analyzer = DependencyAnalyzer::new();

    let projects = scanner.scan_directory(temp.path(), 5, true);
    let report = analyzer.analyze_projects(&projects);

    assert_eq!(report.summary.total_projects, 6);

    let lodash = report
        .duplicate_dependencies
        .iter()
        .find(|dup| dup.name == "lodash")
        .expect("lodash is vendored in two projects");

    assert_eq!(lodash.project_count, 2);
    assert_eq!(lodash.version_count, 2);
    // Sizes include each copy's own package.json alongside the payload, so
    // compare the policy rather than raw byte counts: savings equal total
    // minus the largest copy
    let copies: Vec<u64> = projects
        .iter()
        .flat_map(|p| p.dependencies())
        .filter(|d| d.name == "lodash")
        .map(|d| d.size_bytes)
        .collect();
    let total: u64 = copies.iter().sum();
    let largest = copies.iter().copied().max().unwrap();
    assert_eq!(lodash.total_size_bytes, total);
    assert_eq!(lodash.potential_savings, total - largest);
}

#[test]
fn test_analysis_is_deterministic_across_runs() {
    let temp = create_mixed_tree();
    let scanner = ProjectScanner::new();
    let analyzer = DependencyAnalyzer::new();

    let render = || {
        let mut projects = scanner.scan_directory(temp.path(), 5, true);
        projects.sort_by(|a, b| a.path().cmp(b.path()));
        serde_json::to_string(&analyzer.analyze_projects(&projects)).unwrap()
    };

    assert_eq!(render(), render());
}

#[test]
fn test_java_scope_mapping_end_to_end() {
    let temp = TempDir::new().unwrap();
    create_maven_project(temp.path(), "backend");

    let scanner = ProjectScanner::new();
    let project = scanner
        .scan_single_project(&temp.path().join("backend"))
        .unwrap();

    let junit = project
        .dependencies()
        .iter()
        .find(|d| d.name == "junit:junit")
        .unwrap();
    assert_eq!(junit.dependency_type, DependencyType::Development);

    let spring = project
        .dependencies()
        .iter()
        .find(|d| d.name == "org.springframework:spring-core")
        .unwrap();
    assert_eq!(spring.dependency_type, DependencyType::Production);
}

#[test]
fn test_malformed_manifests_do_not_abort_the_scan() {
    let temp = TempDir::new().unwrap();
    create_node_project(temp.path(), "healthy", &[("left-pad", "1.3.0", 10)]);

    let broken = temp.path().join("broken");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("package.json"), "{ not json").unwrap();

    let scanner = ProjectScanner::new();
    let projects = scanner.scan_directory(temp.path(), 5, false);

    // Both projects are reported; the broken one just has no dependencies
    assert_eq!(projects.len(), 2);
    let broken_project = projects
        .iter()
        .find(|p| p.path().ends_with("broken"))
        .unwrap();
    assert!(broken_project.dependencies().is_empty());
}

#[test]
fn test_depth_zero_sees_only_the_root() {
    let temp = create_mixed_tree();
    let scanner = ProjectScanner::new();

    assert!(scanner.scan_directory(temp.path(), 0, false).is_empty());
}
