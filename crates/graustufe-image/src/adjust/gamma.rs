// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gamma correction lookup table.

use image::GrayImage;

use super::{apply_table, LevelTable};

/// Smallest gamma used when building the table; guards the `1 / gamma`
/// exponent.
const MIN_GAMMA: f64 = 1e-6;

/// Precomputed gamma curve: `lut[i] = round((i / 255)^(1 / gamma) * 255)`.
///
/// Ties round to even. Gamma above 1.0 lifts the midtones, below 1.0 darkens
/// them; 0 and 255 are fixed points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GammaLut {
    table: LevelTable,
}

impl GammaLut {
    pub fn new(gamma: f64) -> Self {
        let exponent = 1.0 / gamma.max(MIN_GAMMA);
        let table = std::array::from_fn(|level| {
            let normalized = level as f64 / 255.0;
            let mapped = (normalized.powf(exponent) * 255.0).round_ties_even();
            mapped.clamp(0.0, 255.0) as u8
        });
        Self { table }
    }

    /// Output level for `level`.
    pub fn get(&self, level: u8) -> u8 {
        self.table[level as usize]
    }

    pub fn as_table(&self) -> &LevelTable {
        &self.table
    }

    /// Map every pixel of `gray` through the curve.
    pub fn apply(&self, gray: &mut GrayImage) {
        apply_table(gray, &self.table);
    }
}
