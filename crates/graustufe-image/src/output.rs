// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output path allocation — `<stem><suffix><ext>` in the output directory,
// with `-2`, `-3`, … inserted before the extension on collision.
//
// Allocation checks the filesystem and is not atomic: two allocators racing
// on the same directory can pick the same name. Batches run sequentially.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use graustufe_core::error::{GraustufeError, Result};
use tracing::{debug, info};

/// Hands out non-colliding destination paths inside one directory.
#[derive(Debug, Clone)]
pub struct OutputAllocator {
    dir: PathBuf,
    suffix: String,
}

impl OutputAllocator {
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Create the output directory and its parents.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| GraustufeError::OutputDir {
            path: self.dir.clone(),
            source,
        })?;
        info!(dir = %self.dir.display(), "Output directory ready");
        Ok(())
    }

    /// Destination for `source`, keeping its extension.
    pub fn allocate(&self, source: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or_else(|| OsStr::new("image"));
        self.allocate_named(stem, &self.suffix, source.extension())
    }

    /// Destination built from an explicit stem, suffix, and extension.
    pub fn allocate_named(&self, stem: &OsStr, suffix: &str, extension: Option<&OsStr>) -> PathBuf {
        let mut attempt = 1u32;
        loop {
            let candidate = self.dir.join(file_name(stem, suffix, attempt, extension));
            if !candidate.exists() {
                debug!(path = %candidate.display(), attempt, "Output path allocated");
                return candidate;
            }
            attempt += 1;
        }
    }
}

/// `<stem><suffix>[-N][.<ext>]`, where `-N` only appears from the second
/// attempt onward.
fn file_name(stem: &OsStr, suffix: &str, attempt: u32, extension: Option<&OsStr>) -> OsString {
    let mut name = OsString::from(stem);
    name.push(suffix);
    if attempt > 1 {
        name.push(format!("-{attempt}"));
    }
    if let Some(ext) = extension {
        name.push(".");
        name.push(ext);
    }
    name
}
