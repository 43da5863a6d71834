//! Java project parsing (Maven pom.xml and Gradle build scripts)
//!
//! Maven manifests are decoded as XML. Gradle build scripts are scanned
//! line-by-line for dependency-declaration keywords; this is deliberately
//! not a script evaluator, so computed or catalog-referenced coordinates
//! are skipped.

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use serde::Deserialize;

use super::{ManifestParser, canonical_dir, directory_name};
use crate::core::{DependencyInfo, DependencyType, ProjectInfo, ProjectType};
use crate::utils::fs::dir_size;

const MAVEN_MANIFEST: &str = "pom.xml";
const GRADLE_MANIFESTS: &[&str] = &["build.gradle", "build.gradle.kts", "gradle.properties"];

/// Declaration keywords recognized in Gradle build scripts, with the role
/// they imply
const GRADLE_KEYWORDS: &[(&str, DependencyType)] = &[
    ("testImplementation", DependencyType::Development),
    ("testRuntimeOnly", DependencyType::Development),
    ("implementation", DependencyType::Production),
    ("api", DependencyType::Production),
    ("compileOnly", DependencyType::Production),
    ("runtimeOnly", DependencyType::Production),
];

#[derive(Debug, Deserialize)]
struct MavenProject {
    #[serde(rename = "artifactId")]
    artifact_id: Option<String>,
    #[serde(default)]
    dependencies: Option<MavenDependencies>,
}

#[derive(Debug, Default, Deserialize)]
struct MavenDependencies {
    #[serde(rename = "dependency", default)]
    entries: Vec<MavenDependency>,
}

#[derive(Debug, Deserialize)]
struct MavenDependency {
    #[serde(rename = "groupId")]
    group_id: Option<String>,
    #[serde(rename = "artifactId")]
    artifact_id: Option<String>,
    version: Option<String>,
    scope: Option<String>,
}

pub struct JavaParser;

impl ManifestParser for JavaParser {
    fn project_type(&self) -> ProjectType {
        ProjectType::Java
    }

    fn manifest_names(&self) -> &'static [&'static str] {
        &[
            "pom.xml",
            "build.gradle",
            "build.gradle.kts",
            "gradle.properties",
        ]
    }

    fn parse_project(&self, dir: &Path) -> Result<ProjectInfo> {
        let build_tool = detect_build_tool(dir);
        let manifest_path = manifest_path_for(dir, build_tool);

        let (name, dependencies) = match build_tool {
            BuildTool::Maven => parse_maven(dir, &manifest_path),
            BuildTool::Gradle => (directory_name(dir), parse_gradle(&manifest_path)),
        };

        ProjectInfo::builder()
            .with_name(name)
            .with_project_type(ProjectType::Java)
            .with_path(canonical_dir(dir))
            .with_manifest_path(manifest_path)
            .with_dependencies(dependencies)
            .with_metadata_entry("build_tool", build_tool.as_str())
            .with_metadata_entry("has_wrapper", has_wrapper(dir).to_string())
            .build()
            .into_diagnostic()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildTool {
    Maven,
    Gradle,
}

impl BuildTool {
    fn as_str(self) -> &'static str {
        match self {
            BuildTool::Maven => "maven",
            BuildTool::Gradle => "gradle",
        }
    }
}

/// Marker-file presence decides the build tool; pom.xml wins
fn detect_build_tool(dir: &Path) -> BuildTool {
    if dir.join(MAVEN_MANIFEST).is_file() {
        BuildTool::Maven
    } else {
        BuildTool::Gradle
    }
}

fn manifest_path_for(dir: &Path, build_tool: BuildTool) -> PathBuf {
    match build_tool {
        BuildTool::Maven => dir.join(MAVEN_MANIFEST),
        BuildTool::Gradle => GRADLE_MANIFESTS
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .unwrap_or_else(|| dir.join(GRADLE_MANIFESTS[0])),
    }
}

/// A companion wrapper script is recorded as metadata only
fn has_wrapper(dir: &Path) -> bool {
    ["mvnw", "mvnw.cmd", "gradlew", "gradlew.bat"]
        .iter()
        .any(|name| dir.join(name).is_file())
}

fn parse_maven(dir: &Path, manifest_path: &Path) -> (String, Vec<DependencyInfo>) {
    let decoded: Option<MavenProject> = std::fs::read_to_string(manifest_path)
        .ok()
        .and_then(|content| quick_xml::de::from_str(&content).ok());

    let Some(project) = decoded else {
        return (directory_name(dir), Vec::new());
    };

    let name = project
        .artifact_id
        .unwrap_or_else(|| directory_name(dir));

    let dependencies = project
        .dependencies
        .unwrap_or_default()
        .entries
        .into_iter()
        .filter_map(maven_dependency)
        .collect();

    (name, dependencies)
}

fn maven_dependency(entry: MavenDependency) -> Option<DependencyInfo> {
    let group = entry.group_id?;
    let artifact = entry.artifact_id?;
    let version = entry.version.unwrap_or_else(|| "*".to_string());

    let dependency_type = match entry.scope.as_deref() {
        Some("test") => DependencyType::Development,
        _ => DependencyType::Production,
    };

    let mut dep = DependencyInfo::new(
        format!("{group}:{artifact}"),
        version.clone(),
        dependency_type,
    );

    if let Some(repo_dir) = local_repository_dir(&group, &artifact, &version)
        && repo_dir.is_dir()
    {
        dep.size_bytes = dir_size(&repo_dir);
        dep.install_path = Some(repo_dir);
    }

    Some(dep)
}

/// Location of an artifact in the local Maven repository
fn local_repository_dir(group: &str, artifact: &str, version: &str) -> Option<PathBuf> {
    if version == "*" {
        return None;
    }

    let home = dirs::home_dir()?;
    Some(
        home.join(".m2")
            .join("repository")
            .join(group.replace('.', "/"))
            .join(artifact)
            .join(version),
    )
}

fn parse_gradle(manifest_path: &Path) -> Vec<DependencyInfo> {
    let Ok(content) = std::fs::read_to_string(manifest_path) else {
        return Vec::new();
    };

    content.lines().filter_map(gradle_dependency).collect()
}

/// Decode one `keyword 'group:artifact:version'` line; anything else is
/// silently skipped
fn gradle_dependency(line: &str) -> Option<DependencyInfo> {
    let trimmed = line.trim();

    let (keyword, dependency_type) = GRADLE_KEYWORDS
        .iter()
        .find(|(keyword, _)| is_declaration(trimmed, keyword))?;

    let rest = &trimmed[keyword.len()..];
    let coordinate = quoted_value(rest)?;

    let mut parts = coordinate.split(':');
    let group = parts.next()?;
    let artifact = parts.next()?;
    let version = parts.next()?;
    if group.is_empty() || artifact.is_empty() || version.is_empty() || parts.next().is_some() {
        return None;
    }

    let mut dep = DependencyInfo::new(
        format!("{group}:{artifact}"),
        version,
        *dependency_type,
    );

    if let Some(cache_dir) = gradle_cache_dir(group, artifact, version)
        && cache_dir.is_dir()
    {
        dep.size_bytes = dir_size(&cache_dir);
        dep.install_path = Some(cache_dir);
    }

    Some(dep)
}

/// Location of an artifact in the Gradle module cache
fn gradle_cache_dir(group: &str, artifact: &str, version: &str) -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(
        home.join(".gradle")
            .join("caches")
            .join("modules-2")
            .join("files-2.1")
            .join(group)
            .join(artifact)
            .join(version),
    )
}

/// The keyword must be followed by whitespace, a parenthesis, or a quote so
/// that `apiVersion = ...` style lines do not match `api`
fn is_declaration(line: &str, keyword: &str) -> bool {
    let Some(rest) = line.strip_prefix(keyword) else {
        return false;
    };
    rest.starts_with([' ', '\t', '(', '\'', '"'])
}

/// First single- or double-quoted token in the remainder of a line
fn quoted_value(rest: &str) -> Option<&str> {
    let start = rest.find(['\'', '"'])?;
    let quote = rest.as_bytes()[start] as char;
    let inner = &rest[start + 1..];
    let end = inner.find(quote)?;
    Some(&inner[..end])
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn parse(dir: &Path) -> ProjectInfo {
        JavaParser.parse_project(dir).unwrap()
    }

    #[test]
    fn test_can_parse_maven_and_gradle_markers() {
        let temp = TempDir::new().unwrap();
        assert!(!JavaParser.can_parse(temp.path()));

        fs::write(temp.path().join("build.gradle"), "// build").unwrap();
        assert!(JavaParser.can_parse(temp.path()));
    }

    #[test]
    fn test_parse_maven_project() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("pom.xml"),
            r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>com.example</groupId>
    <artifactId>test-project</artifactId>
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
</project>"#,
        )
        .unwrap();

        let project = parse(temp.path());

        assert_eq!(project.name(), "test-project");
        assert_eq!(project.project_type(), ProjectType::Java);
        assert_eq!(project.dependencies().len(), 2);
        assert_eq!(project.metadata().get("build_tool").unwrap(), "maven");

        let spring = project
            .dependencies()
            .iter()
            .find(|d| d.name == "org.springframework:spring-core")
            .unwrap();
        assert_eq!(spring.version, "5.3.21");
        assert_eq!(spring.dependency_type, DependencyType::Production);

        let junit = project
            .dependencies()
            .iter()
            .find(|d| d.name == "junit:junit")
            .unwrap();
        assert_eq!(junit.version, "4.13.2");
        assert_eq!(junit.dependency_type, DependencyType::Development);
    }

    #[test]
    fn test_parse_gradle_project() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("build.gradle"),
            r#"
plugins {
    id 'java'
}

dependencies {
    implementation 'org.springframework:spring-core:5.3.21'
    testImplementation 'junit:junit:4.13.2'
    api 'com.google.guava:guava:31.1-jre'
}
"#,
        )
        .unwrap();

        let project = parse(temp.path());

        assert_eq!(project.dependencies().len(), 3);
        assert_eq!(project.metadata().get("build_tool").unwrap(), "gradle");

        let spring = project
            .dependencies()
            .iter()
            .find(|d| d.name == "org.springframework:spring-core")
            .unwrap();
        assert_eq!(spring.dependency_type, DependencyType::Production);

        let junit = project
            .dependencies()
            .iter()
            .find(|d| d.name == "junit:junit")
            .unwrap();
        assert_eq!(junit.dependency_type, DependencyType::Development);
    }

    #[test]
    fn test_gradle_kotlin_call_syntax() {
        let dep = gradle_dependency(r#"    implementation("io.ktor:ktor-server:2.3.0")"#).unwrap();
        assert_eq!(dep.name, "io.ktor:ktor-server");
        assert_eq!(dep.version, "2.3.0");
    }

    #[test]
    fn test_gradle_skips_lines_without_coordinates() {
        assert!(gradle_dependency("implementation project(':core')").is_none());
        assert!(gradle_dependency("implementation libs.spring.core").is_none());
        assert!(gradle_dependency("apiVersion = '1.8'").is_none());
        assert!(gradle_dependency("// implementation 'a:b:c' }").is_none());
    }

    #[test]
    fn test_invalid_xml_yields_empty_dependencies() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pom.xml"), "invalid xml content").unwrap();

        let project = parse(temp.path());
        assert!(project.dependencies().is_empty());
    }

    #[test]
    fn test_detect_build_tool_prefers_maven() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pom.xml"), "<project></project>").unwrap();
        fs::write(temp.path().join("build.gradle"), "// gradle").unwrap();

        assert_eq!(detect_build_tool(temp.path()), BuildTool::Maven);
    }

    #[test]
    fn test_wrapper_detection_recorded_as_metadata() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("build.gradle"), "// build").unwrap();
        fs::write(temp.path().join("gradlew"), "#!/bin/sh").unwrap();

        let project = parse(temp.path());
        assert_eq!(project.metadata().get("has_wrapper").unwrap(), "true");
    }
}
