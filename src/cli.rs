use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{FormatArgs, LimitArgs, ScanArgs};
use crate::core::{PackageManagerType, ProjectType};

#[derive(Parser)]
#[command(
    name = "depscope",
    about = "🔭 Inventory projects and dependencies across language ecosystems",
    long_about = "depscope discovers projects under a directory tree, parses their manifests \
                  into a normalized dependency model, measures on-disk footprints, and reports \
                  cross-project analytics such as duplicate dependencies and cleanup \
                  suggestions. It can also interrogate the host's package managers for \
                  globally installed packages. Nothing is resolved, installed, or removed.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Survey a directory tree for projects
    ///
    /// Walks the tree up to the given depth, recognizes projects by their
    /// manifests, and lists each one with its dependency count and on-disk
    /// footprint. A recognized project is a traversal boundary: its vendored
    /// dependencies are measured, not re-scanned as nested projects.
    #[command(
        long_about = "Discover projects under a directory. Every directory claimed by a \
                      manifest parser (package.json, pom.xml, build.gradle, pyproject.toml, \
                      requirements.txt, Cargo.toml, go.mod, ...) becomes one project with a \
                      normalized dependency list and a measured footprint. Independent \
                      subtrees are parsed in parallel unless --no-parallel is given."
    )]
    Scan {
        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        format: FormatArgs,

        /// Only report projects of these types
        #[arg(
            short = 't',
            long = "project-type",
            value_name = "TYPE",
            env = "DEPSCOPE_PROJECT_TYPES"
        )]
        project_types: Vec<ProjectType>,
    },

    /// Cross-project dependency analytics
    ///
    /// Scans like `scan`, then aggregates: totals, the largest dependencies
    /// by size, names duplicated across projects with their reclaimable
    /// space, and ranked cleanup suggestions.
    #[command(
        long_about = "Scan a directory tree and aggregate the results into an analysis \
                      report: project and dependency totals, a size ranking, duplicate \
                      dependency groups with potential savings (assuming the largest copy of \
                      each is retained), and cleanup suggestions ordered by reclaimable \
                      space. The analysis is deterministic: identical trees produce \
                      identical reports."
    )]
    Analyze {
        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        limit: LimitArgs,
    },

    /// Detailed information for a single project
    ///
    /// Applies the parser registry to exactly one directory and prints the
    /// project's identity, metadata, and full dependency list.
    Info {
        /// Project directory to inspect
        #[arg(value_name = "PROJECT_PATH", env = "DEPSCOPE_PROJECT_PATH")]
        path: PathBuf,

        #[command(flatten)]
        format: FormatArgs,
    },

    /// Globally installed dependencies
    ///
    /// Probes each supported package manager (npm, yarn, pip, brew), decodes
    /// its inventory, and lists the packages it owns. An absent or failing
    /// manager contributes nothing; the others are unaffected.
    #[command(
        long_about = "Interrogate the host's package managers for globally installed \
                      packages. Each manager is probed for availability first; managers \
                      that are missing, time out, or emit undecodable output are skipped \
                      individually. Use --manager to query exactly one."
    )]
    Globals {
        /// Query a single package manager instead of all of them
        #[arg(short, long, value_name = "MANAGER", env = "DEPSCOPE_MANAGER")]
        manager: Option<PackageManagerType>,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        limit: LimitArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
