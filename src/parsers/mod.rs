//! # Manifest Parser Module
//!
//! This module contains one parser per supported ecosystem plus the ordered
//! registry that dispatches directories to them. A parser claims a directory
//! through cheap marker-file checks (`can_parse`) and turns it into a
//! normalized [`ProjectInfo`](crate::core::ProjectInfo) (`parse_project`).
//!
//! ## Key Components
//!
//! - **ManifestParser**: Trait implemented once per ecosystem
//! - **ParserRegistry**: Ordered collection; the first registered parser
//!   whose `can_parse` answers true wins, which makes registration order the
//!   tie-break policy for directories carrying several manifests
//!
//! ## Containment
//!
//! A malformed manifest never escapes a parser: `parse_project` reports such
//! a directory as a project with an empty dependency list. Only I/O failure
//! of the directory itself surfaces as an error.
//!
//! ## Example
//!
//! ```
//! use depscope::parsers::ParserRegistry;
//!
//! let registry = ParserRegistry::with_default_parsers();
//! assert_eq!(registry.supported_types().len(), 5);
//! ```

pub mod go;
pub mod java;
pub mod nodejs;
pub mod python;
pub mod rust;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use miette::Result;

use crate::core::{ProjectInfo, ProjectType};

/// One ecosystem's manifest handling: detection plus parsing
pub trait ManifestParser: Send + Sync {
    fn project_type(&self) -> ProjectType;

    /// Directory-local marker filenames that claim a directory for this
    /// ecosystem
    fn manifest_names(&self) -> &'static [&'static str];

    /// Marker existence only; no content reads
    fn can_parse(&self, dir: &Path) -> bool {
        self.manifest_names()
            .iter()
            .any(|name| dir.join(name).is_file())
    }

    /// Parse the directory into a [`ProjectInfo`]. A malformed manifest
    /// yields a project with an empty dependency list.
    fn parse_project(&self, dir: &Path) -> Result<ProjectInfo>;
}

/// Ordered parser collection. Registration order is the documented
/// tie-break: Node.js, Java, Python, Rust, Go (see
/// [`ParserRegistry::with_default_parsers`]). Populated once, never mutated
/// during dispatch.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn ManifestParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_default_parsers()
    }
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Registry with every built-in parser, in the fixed tie-break order
    pub fn with_default_parsers() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(nodejs::NodeJsParser));
        registry.register(Box::new(java::JavaParser));
        registry.register(Box::new(python::PythonParser));
        registry.register(Box::new(rust::RustParser));
        registry.register(Box::new(go::GoParser));
        registry
    }

    pub fn register(&mut self, parser: Box<dyn ManifestParser>) {
        self.parsers.push(parser);
    }

    /// First registered parser claiming `dir`, if any
    pub fn find_parser(&self, dir: &Path) -> Option<&dyn ManifestParser> {
        self.parsers
            .iter()
            .map(|parser| parser.as_ref())
            .find(|parser| parser.can_parse(dir))
    }

    pub fn supported_types(&self) -> BTreeSet<ProjectType> {
        self.parsers
            .iter()
            .map(|parser| parser.project_type())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

/// Canonical form of a project directory, falling back to the given path
/// when canonicalization fails (e.g. on a racing delete)
pub(crate) fn canonical_dir(dir: &Path) -> PathBuf {
    std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}

/// Directory basename used as the project name when a manifest does not
/// declare one
pub(crate) fn directory_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_registry_covers_all_ecosystems() {
        let registry = ParserRegistry::with_default_parsers();
        let types = registry.supported_types();

        assert!(types.contains(&ProjectType::NodeJs));
        assert!(types.contains(&ProjectType::Java));
        assert!(types.contains(&ProjectType::Python));
        assert!(types.contains(&ProjectType::Rust));
        assert!(types.contains(&ProjectType::Go));
    }

    #[test]
    fn test_find_parser_none_for_unmarked_dir() {
        let temp = TempDir::new().unwrap();
        let registry = ParserRegistry::with_default_parsers();

        assert!(registry.find_parser(temp.path()).is_none());
    }

    #[test]
    fn test_registration_order_breaks_ties() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();
        fs::write(temp.path().join("Cargo.toml"), "[package]\nname = \"x\"").unwrap();

        let registry = ParserRegistry::with_default_parsers();
        let parser = registry.find_parser(temp.path()).unwrap();

        // Node.js registers before Rust, so it wins the tie
        assert_eq!(parser.project_type(), ProjectType::NodeJs);
    }

    #[test]
    fn test_empty_registry_finds_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();

        let registry = ParserRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.find_parser(temp.path()).is_none());
    }
}
