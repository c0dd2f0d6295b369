//! Model file discovery.
//!
//! Walks a directory tree for model files. Directories whose path contains a
//! veto substring are skipped whole; mod archives get mirrored into `@`- and
//! `!`-prefixed directories that would double every hit.

use std::path::{Path, PathBuf};

/// File extension of model containers, compared case-insensitively.
pub const MODEL_EXTENSION: &str = "p3d";

/// Recursively collects model files under `root`.
///
/// The veto applies to every directory on entry, the root included: a
/// vetoed `root` yields no files at all. Unreadable directories are logged
/// and skipped; traversal never fails.
#[must_use]
pub fn scan_directory(root: &Path, veto_substrings: &[String]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(root, veto_substrings, &mut found);
    found
}

fn walk(dir: &Path, veto_substrings: &[String], found: &mut Vec<PathBuf>) {
    if is_vetoed(dir, veto_substrings) {
        return;
    }
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!("Skipping unreadable directory {}: {}", dir.display(), error);
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, veto_substrings, found);
        } else if has_model_extension(&path) {
            found.push(path);
        }
    }
}

fn is_vetoed(path: &Path, veto_substrings: &[String]) -> bool {
    let text = path.to_string_lossy();
    veto_substrings.iter().any(|veto| text.contains(veto.as_str()))
}

fn has_model_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case(MODEL_EXTENSION))
}
