//! Note discovery for explicit files and vault folders.

use crate::merge_plan::natural_cmp;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Collect the notes named by `paths`: explicit files pass through, a folder
/// contributes its immediate children with a matching extension (folders are
/// not walked recursively). The result is in natural name order.
///
/// # Errors
///
/// Returns an error when a folder cannot be enumerated.
pub fn find_notes(paths: &[PathBuf], extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut notes = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in fs::read_dir(path)? {
                let child = entry?.path();
                if child.is_file() && matches_extension(&child, extensions) {
                    notes.push(child);
                }
            }
        } else if path.is_file() {
            notes.push(path.clone());
        }
    }

    notes.sort_by(|a, b| natural_cmp(&display_name(a), &display_name(b)));
    Ok(notes)
}

/// The name a note is listed under: its file stem.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
}

/// Whether `path` carries one of the configured extensions.
pub(crate) fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
