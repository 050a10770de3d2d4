// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Target collection — expands files and directories into a sorted,
// deduplicated list of image paths.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use graustufe_core::types::is_image_path;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

/// Expand `inputs` into the list of image files to convert.
///
/// Directories are walked recursively (symlinked directories are not
/// entered); files are kept when their extension is a recognized image
/// extension. Every path is made absolute and lexically normalized, duplicates
/// are dropped, and the result is sorted by byte order. Empty strings and
/// paths that do not exist are ignored.
#[instrument(skip_all, fields(inputs = inputs.len()))]
pub fn collect_targets<P: AsRef<Path>>(inputs: &[P]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    let mut keep = |path: PathBuf| {
        if is_image_path(&path) && seen.insert(path.clone()) {
            targets.push(path);
        }
    };

    for input in inputs {
        let input = input.as_ref();
        if input.as_os_str().is_empty() {
            continue;
        }
        let path = normalize(input);

        if path.is_dir() {
            for entry in WalkDir::new(&path) {
                match entry {
                    // `is_file` follows links, so symlinked files are kept.
                    Ok(entry) if entry.path().is_file() => keep(normalize(entry.path())),
                    Ok(_) => {}
                    Err(err) => warn!(error = %err, "Skipping unreadable entry"),
                }
            }
        } else if path.is_file() {
            keep(path);
        } else {
            debug!(path = %path.display(), "Input does not exist");
        }
    }

    targets.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    debug!(found = targets.len(), "Targets collected");
    targets
}

/// Append the targets from `added` that `existing` does not already hold,
/// keeping the existing order. Returns how many were appended.
pub fn merge_targets(existing: &mut Vec<PathBuf>, added: Vec<PathBuf>) -> usize {
    let known: HashSet<PathBuf> = existing.iter().cloned().collect();
    let before = existing.len();
    existing.extend(added.into_iter().filter(|path| !known.contains(path)));
    existing.len() - before
}

/// Absolute form of `path` with `.` removed and `..` applied, without touching
/// the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
