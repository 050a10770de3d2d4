// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Before/after preview sheets.

use std::ops::RangeInclusive;

use graustufe_core::config::AdjustmentConfig;
use graustufe_core::error::{GraustufeError, Result};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use tracing::{debug, instrument};

use crate::adjust::apply_adjustments;

/// Gap between the two panes, in pixels.
pub const GUTTER: u32 = 8;

/// Accepted pane width and height, in pixels.
pub const PANE_RANGE: RangeInclusive<u32> = 1..=8192;

/// Sheet background level.
pub const BACKGROUND: Luma<u8> = Luma([128]);

/// Shrink `gray` to fit inside `max_width` x `max_height`, preserving aspect
/// ratio. Images that already fit are returned unchanged (never upscaled), as
/// are degenerate sizes.
pub fn resize_to_box(gray: &GrayImage, max_width: u32, max_height: u32) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
        return gray.clone();
    }
    let scale = (max_width as f64 / width as f64)
        .min(max_height as f64 / height as f64)
        .min(1.0);
    if scale >= 1.0 {
        return gray.clone();
    }
    let new_width = ((width as f64 * scale) as u32).max(1);
    let new_height = ((height as f64 * scale) as u32).max(1);
    imageops::resize(gray, new_width, new_height, FilterType::Lanczos3)
}

/// Render the unadjusted image (left) next to the adjusted one (right), each
/// fitted into a `pane_width` x `pane_height` pane and centred on a mid-gray
/// sheet.
///
/// Pane sizes outside [`PANE_RANGE`] are rejected with
/// [`GraustufeError::InvalidConfig`] before anything is allocated.
#[instrument(skip(gray, cfg), fields(width = gray.width(), height = gray.height()))]
pub fn before_after(
    gray: &GrayImage,
    cfg: &AdjustmentConfig,
    pane_width: u32,
    pane_height: u32,
) -> Result<GrayImage> {
    let sheet_width = pane_width
        .checked_mul(2)
        .and_then(|width| width.checked_add(GUTTER))
        .filter(|_| PANE_RANGE.contains(&pane_width) && PANE_RANGE.contains(&pane_height))
        .ok_or_else(|| {
            GraustufeError::InvalidConfig(format!(
                "preview pane {pane_width}x{pane_height} must be within {}..={} pixels",
                PANE_RANGE.start(),
                PANE_RANGE.end()
            ))
        })?;

    let before = resize_to_box(gray, pane_width, pane_height);
    let after = resize_to_box(&apply_adjustments(gray.clone(), cfg), pane_width, pane_height);

    let mut sheet = GrayImage::from_pixel(sheet_width, pane_height, BACKGROUND);
    place_centred(&mut sheet, &before, 0, pane_width, pane_height);
    place_centred(&mut sheet, &after, pane_width + GUTTER, pane_width, pane_height);

    debug!(
        sheet_w = sheet.width(),
        sheet_h = sheet.height(),
        "Preview sheet rendered"
    );
    Ok(sheet)
}

fn place_centred(sheet: &mut GrayImage, pane: &GrayImage, left: u32, pane_width: u32, pane_height: u32) {
    let x = left + pane_width.saturating_sub(pane.width()) / 2;
    let y = pane_height.saturating_sub(pane.height()) / 2;
    imageops::replace(sheet, pane, x as i64, y as i64);
}
