// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tone adjustment pipeline for single-channel images.
//
// Every step is expressed as a 256-entry level table applied in place, so the
// pipeline is a chain of table lookups over one `GrayImage`.

pub mod autocontrast;
pub mod enhance;
pub mod gamma;

use graustufe_core::config::{deviates, AdjustmentConfig};
use image::GrayImage;
use imageproc::stats::histogram;
use tracing::{debug, instrument};

use self::gamma::GammaLut;

/// Mapping from every input level to an output level.
pub type LevelTable = [u8; 256];

/// Run the adjustment chain over a grayscale image.
///
/// ## Order
///
/// 1. Autocontrast (only when enabled), discarding `cutoff` percent per tail
/// 2. Brightness, skipped within 1e-6 of 1.0
/// 3. Contrast around the mean level, skipped within 1e-6 of 1.0
/// 4. Gamma lookup table, skipped within 1e-6 of 1.0
///
/// Each step sees the output of the previous one. A config that is identity
/// on every step returns the input untouched.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn apply_adjustments(mut gray: GrayImage, cfg: &AdjustmentConfig) -> GrayImage {
    if cfg.autocontrast {
        let levels = histogram(&gray).channels[0];
        let table = autocontrast::autocontrast_table(&levels, cfg.cutoff);
        debug!(cutoff = cfg.cutoff, "Autocontrast");
        apply_table(&mut gray, &table);
    }

    if deviates(cfg.brightness) {
        debug!(factor = cfg.brightness, "Brightness");
        apply_table(&mut gray, &enhance::brightness_table(cfg.brightness));
    }

    if deviates(cfg.contrast) {
        let levels = histogram(&gray).channels[0];
        let mean = enhance::rounded_mean(&levels);
        debug!(factor = cfg.contrast, mean, "Contrast");
        apply_table(&mut gray, &enhance::contrast_table(mean, cfg.contrast));
    }

    if deviates(cfg.gamma) {
        debug!(gamma = cfg.gamma, "Gamma");
        GammaLut::new(cfg.gamma).apply(&mut gray);
    }

    gray
}

/// Replace every pixel level through `table`.
pub fn apply_table(gray: &mut GrayImage, table: &LevelTable) {
    for pixel in gray.pixels_mut() {
        pixel.0[0] = table[pixel.0[0] as usize];
    }
}

/// The table that maps every level to itself.
pub fn identity_table() -> LevelTable {
    std::array::from_fn(|level| level as u8)
}
