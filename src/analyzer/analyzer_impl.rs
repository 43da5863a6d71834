use super::DuplicateDetector;
use crate::constants::analysis::LARGE_DEPENDENCY_THRESHOLD;
use crate::core::{
    AnalysisReport, AnalysisSummary, CleanupSuggestion, DuplicateDependency, LargestDependency,
    ProjectInfo,
};
use crate::utils::string::{format_size, pluralize};

/// Pure aggregation over scanned projects. No I/O; identical input always
/// yields an identical report, including tie-break order.
pub struct DependencyAnalyzer;

impl Default for DependencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_projects(&self, projects: &[ProjectInfo]) -> AnalysisReport {
        let summary = self.summarize(projects);
        let largest_dependencies = self.rank_by_size(projects);
        let duplicate_dependencies = DuplicateDetector::detect(projects);
        let cleanup_suggestions =
            self.suggest_cleanups(projects, &duplicate_dependencies);

        AnalysisReport {
            summary,
            largest_dependencies,
            duplicate_dependencies,
            cleanup_suggestions,
        }
    }

    fn summarize(&self, projects: &[ProjectInfo]) -> AnalysisSummary {
        AnalysisSummary {
            total_projects: projects.len(),
            total_dependencies: projects
                .iter()
                .map(|project| project.dependencies().len())
                .sum(),
            total_size_bytes: projects
                .iter()
                .map(|project| project.total_size_bytes())
                .sum(),
        }
    }

    /// Every occurrence ranked by size descending; ties break by name, then
    /// project, ascending
    fn rank_by_size(&self, projects: &[ProjectInfo]) -> Vec<LargestDependency> {
        let mut ranked: Vec<LargestDependency> = projects
            .iter()
            .flat_map(|project| {
                project.dependencies().iter().map(|dep| LargestDependency {
                    name: dep.name.clone(),
                    project: project.name().to_string(),
                    size_bytes: dep.size_bytes,
                })
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.size_bytes
                .cmp(&a.size_bytes)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.project.cmp(&b.project))
        });

        ranked
    }

    fn suggest_cleanups(
        &self,
        projects: &[ProjectInfo],
        duplicates: &[DuplicateDependency],
    ) -> Vec<CleanupSuggestion> {
        let mut suggestions = Vec::new();

        for dup in duplicates {
            if dup.potential_savings == 0 {
                continue;
            }
            suggestions.push(CleanupSuggestion {
                title: format!("Deduplicate {}", dup.name),
                description: format!(
                    "Copies in {} {} occupy {}; keeping only the largest copy would free {}",
                    dup.project_count,
                    pluralize("project", dup.project_count),
                    format_size(dup.total_size_bytes),
                    format_size(dup.potential_savings)
                ),
                potential_savings: dup.potential_savings,
            });
        }

        for suggestion in self.large_singletons(projects, duplicates) {
            suggestions.push(suggestion);
        }

        suggestions.sort_by(|a, b| {
            b.potential_savings
                .cmp(&a.potential_savings)
                .then_with(|| a.title.cmp(&b.title))
        });

        suggestions
    }

    /// A dependency confined to one project but at or above the large-size
    /// threshold is worth a look of its own
    fn large_singletons(
        &self,
        projects: &[ProjectInfo],
        duplicates: &[DuplicateDependency],
    ) -> Vec<CleanupSuggestion> {
        let mut singletons = Vec::new();

        for project in projects {
            for dep in project.dependencies() {
                if dep.size_bytes < LARGE_DEPENDENCY_THRESHOLD {
                    continue;
                }
                if duplicates.iter().any(|dup| dup.name == dep.name) {
                    continue;
                }
                singletons.push(CleanupSuggestion {
                    title: format!("Review large dependency {}", dep.name),
                    description: format!(
                        "{} occupies {} in project '{}'; removing it would free that space",
                        dep.name,
                        format_size(dep.size_bytes),
                        project.name()
                    ),
                    potential_savings: dep.size_bytes,
                });
            }
        }

        singletons
    }
}
