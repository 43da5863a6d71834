//! Filesystem measurement utilities

use std::path::Path;

use walkdir::WalkDir;

/// Recursive on-disk size of a directory in bytes.
///
/// Symlinks are not followed and unreadable entries are skipped, so the
/// result is a lower bound on trees with permission holes. A missing path
/// measures as zero.
pub fn dir_size(path: &Path) -> u64 {
    if !path.exists() {
        return 0;
    }

    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Size of a single file in bytes, zero when missing or unreadable
pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path)
        .map(|metadata| metadata.len())
        .unwrap_or(0)
}
