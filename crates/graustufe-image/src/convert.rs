// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-file conversion: decode, reject animations, reduce to luma, adjust,
// allocate a destination, save.
//
// A failure in any step turns into a skipped outcome with a short reason;
// nothing is propagated, so one bad file never stops a batch.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use graustufe_core::config::AdjustmentConfig;
use graustufe_core::error::Result;
use graustufe_core::human_errors::{skip_kind, skip_reason, SkipKind};
use graustufe_core::types::ConversionOutcome;
use tracing::{info, instrument, warn};

use crate::adjust::apply_adjustments;
use crate::image::processor::ImageProcessor;
use crate::output::OutputAllocator;
use crate::preview::before_after;

/// Suffix of before/after preview sheets.
pub const PREVIEW_SUFFIX: &str = "_preview";

/// Converts files with one fixed adjustment config into one output directory.
#[derive(Debug, Clone)]
pub struct Converter {
    adjustments: AdjustmentConfig,
    allocator: OutputAllocator,
}

impl Converter {
    pub fn new(adjustments: AdjustmentConfig, allocator: OutputAllocator) -> Self {
        Self {
            adjustments,
            allocator,
        }
    }

    pub fn allocator(&self) -> &OutputAllocator {
        &self.allocator
    }

    /// Convert one file, reporting success or the reason it was skipped.
    #[instrument(skip_all, fields(source = %source.display()))]
    pub fn convert_file(&self, source: &Path) -> ConversionOutcome {
        match self.try_convert(source) {
            Ok(destination) => {
                info!(destination = %destination.display(), "Converted");
                ConversionOutcome::Converted {
                    source: source.to_path_buf(),
                    destination,
                }
            }
            Err(err) => {
                match skip_kind(&err) {
                    SkipKind::Unsupported => info!(error = %err, "Skipped"),
                    SkipKind::Failed => warn!(error = %err, "Conversion failed"),
                }
                ConversionOutcome::Skipped {
                    source: source.to_path_buf(),
                    reason: skip_reason(&err),
                }
            }
        }
    }

    fn try_convert(&self, source: &Path) -> Result<PathBuf> {
        let gray = ImageProcessor::open(source)?.into_luma();
        let adjusted = apply_adjustments(gray, &self.adjustments);
        let destination = self.allocator.allocate(source);
        ImageProcessor::save_luma(&adjusted, &destination)?;
        Ok(destination)
    }

    /// Write a PNG before/after sheet for `source` and return its path.
    #[instrument(skip(self, source), fields(source = %source.display()))]
    pub fn write_preview(&self, source: &Path, pane_width: u32, pane_height: u32) -> Result<PathBuf> {
        let gray = ImageProcessor::open(source)?.into_luma();
        let sheet = before_after(&gray, &self.adjustments, pane_width, pane_height)?;
        let stem = source.file_stem().unwrap_or_else(|| OsStr::new("image"));
        let destination = self
            .allocator
            .allocate_named(stem, PREVIEW_SUFFIX, Some(OsStr::new("png")));
        ImageProcessor::save_luma(&sheet, &destination)?;
        info!(destination = %destination.display(), "Preview written");
        Ok(destination)
    }
}
