use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::core::{DuplicateDependency, ProjectInfo};

/// Groups dependency occurrences by name across projects.
///
/// A name qualifies as a duplicate when it occurs in at least two distinct
/// project paths. Potential savings assume the largest copy is retained:
/// savings = total occupied size - largest single occurrence.
pub struct DuplicateDetector;

struct Occurrences {
    projects: BTreeSet<PathBuf>,
    versions: BTreeSet<String>,
    sizes: Vec<u64>,
}

impl DuplicateDetector {
    pub fn detect(projects: &[ProjectInfo]) -> Vec<DuplicateDependency> {
        let mut by_name: BTreeMap<String, Occurrences> = BTreeMap::new();

        for project in projects {
            for dep in project.dependencies() {
                let entry = by_name.entry(dep.name.clone()).or_insert_with(|| Occurrences {
                    projects: BTreeSet::new(),
                    versions: BTreeSet::new(),
                    sizes: Vec::new(),
                });
                entry.projects.insert(project.path().clone());
                entry.versions.insert(dep.version.clone());
                entry.sizes.push(dep.size_bytes);
            }
        }

        let mut duplicates: Vec<DuplicateDependency> = by_name
            .into_iter()
            .filter(|(_, occurrences)| occurrences.projects.len() >= 2)
            .map(|(name, occurrences)| {
                let total_size_bytes: u64 = occurrences.sizes.iter().sum();
                let largest = occurrences.sizes.iter().copied().max().unwrap_or(0);

                DuplicateDependency {
                    name,
                    project_count: occurrences.projects.len(),
                    version_count: occurrences.versions.len(),
                    total_size_bytes,
                    potential_savings: total_size_bytes - largest,
                    projects: occurrences.projects.into_iter().collect(),
                }
            })
            .collect();

        // Largest win first; names break ties for reproducible output
        duplicates.sort_by(|a, b| {
            b.potential_savings
                .cmp(&a.potential_savings)
                .then_with(|| a.name.cmp(&b.name))
        });

        duplicates
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{DependencyInfo, DependencyType, ProjectType};

    fn project(name: &str, path: &str, deps: &[(&str, &str, u64)]) -> ProjectInfo {
        let dependencies = deps
            .iter()
            .map(|(dep_name, version, size)| {
                let mut dep =
                    DependencyInfo::new(*dep_name, *version, DependencyType::Production);
                dep.size_bytes = *size;
                dep
            })
            .collect();

        ProjectInfo::builder()
            .with_name(name)
            .with_project_type(ProjectType::NodeJs)
            .with_path(path)
            .with_manifest_path(format!("{path}/package.json"))
            .with_dependencies(dependencies)
            .build()
            .unwrap()
    }

    #[test]
    fn test_name_in_single_project_is_not_duplicate() {
        let projects = vec![
            project("a", "/tmp/a", &[("lodash", "4.17.21", 100)]),
            project("b", "/tmp/b", &[("react", "18.0.0", 50)]),
        ];

        assert!(DuplicateDetector::detect(&projects).is_empty());
    }

    #[test]
    fn test_duplicate_spans_two_projects() {
        let projects = vec![
            project("a", "/tmp/a", &[("lodash", "4.17.21", 100)]),
            project("b", "/tmp/b", &[("lodash", "4.17.20", 140)]),
        ];

        let duplicates = DuplicateDetector::detect(&projects);
        assert_eq!(duplicates.len(), 1);

        let dup = &duplicates[0];
        assert_eq!(dup.name, "lodash");
        assert_eq!(dup.project_count, 2);
        assert_eq!(dup.version_count, 2);
        assert_eq!(dup.total_size_bytes, 240);
        assert_eq!(dup.potential_savings, 100);
    }

    #[test]
    fn test_repeated_name_within_one_project_does_not_qualify() {
        // Same name twice in one project (e.g. prod and dev) stays local
        let projects = vec![project(
            "a",
            "/tmp/a",
            &[("lodash", "4.17.21", 100), ("lodash", "4.17.20", 80)],
        )];

        assert!(DuplicateDetector::detect(&projects).is_empty());
    }

    #[test]
    fn test_ordering_is_savings_then_name() {
        let projects = vec![
            project(
                "a",
                "/tmp/a",
                &[("zeta", "1.0", 50), ("alpha", "1.0", 50), ("mid", "1.0", 10)],
            ),
            project(
                "b",
                "/tmp/b",
                &[("zeta", "1.0", 50), ("alpha", "1.0", 50), ("mid", "1.0", 90)],
            ),
        ];

        let duplicates = DuplicateDetector::detect(&projects);
        let names: Vec<_> = duplicates.iter().map(|d| d.name.as_str()).collect();

        // alpha and zeta both save 50; mid saves 10
        assert_eq!(names, vec!["alpha", "zeta", "mid"]);
    }
}
