// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// graustufe-image — Image handling for the Graustufe converter.
//
// Provides target collection (recursive walk, extension filter, dedup), the
// grayscale conversion and tone adjustment pipeline (autocontrast, brightness,
// contrast, gamma), collision-free output naming, and before/after previews.

pub mod adjust;
pub mod collect;
pub mod convert;
pub mod image;
pub mod output;
pub mod preview;

// Re-export the primary items so callers can use `graustufe_image::Converter` etc.
pub use crate::adjust::apply_adjustments;
pub use crate::adjust::gamma::GammaLut;
pub use crate::collect::{collect_targets, merge_targets};
pub use crate::convert::Converter;
pub use crate::image::processor::ImageProcessor;
pub use crate::output::OutputAllocator;
