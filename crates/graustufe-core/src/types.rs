// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Graustufe.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// File extensions (lowercase, without the dot) accepted as image inputs.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "tif", "tiff", "bmp", "gif"];

/// Whether `path` carries one of [`IMAGE_EXTENSIONS`], ignoring case.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Final name component of `path` for display, lossily decoded.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Result of converting a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The grayscale image was written to `destination`.
    Converted { source: PathBuf, destination: PathBuf },
    /// Nothing was written; `reason` is the user-facing explanation.
    Skipped { source: PathBuf, reason: String },
}

impl ConversionOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    /// One progress line: `[i/total] OK  : name -> dest` or
    /// `[i/total] SKIP: name (reason)`. `index` is 1-based.
    pub fn progress_line(&self, index: usize, total: usize) -> String {
        match self {
            Self::Converted {
                source,
                destination,
            } => format!(
                "[{index}/{total}] OK  : {} -> {}",
                display_name(source),
                display_name(destination)
            ),
            Self::Skipped { source, reason } => {
                format!("[{index}/{total}] SKIP: {} ({reason})", display_name(source))
            }
        }
    }
}

/// Counters reported at the end of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub total: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Account for one processed file.
    pub fn record(&mut self, outcome: &ConversionOutcome) {
        if outcome.is_converted() {
            self.converted += 1;
        } else {
            self.skipped += 1;
        }
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Done: converted {} / skipped {} / total {} | {:.2}s",
            self.converted,
            self.skipped,
            self.total,
            self.elapsed.as_secs_f64()
        )
    }
}
