// File: src/files.rs
// Purpose: Route file enumeration

use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

/// Collects every file under the routes directory, directories recursed
/// depth-first with entries in lexicographic order, so builds enumerate
/// deterministically on every platform.
pub(crate) fn collect_route_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
