// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Brightness and contrast as a blend between a flat "degenerate" level and
// the image: `out = base + factor * (level - base)`.
//
// Brightness blends against black (base 0), contrast against the rounded mean
// level. The blend runs in single precision and truncates, matching the
// classic enhancement filters the tool's output is compared with.

use super::LevelTable;

/// Blend every level away from (factor > 1) or toward (factor < 1) `base`.
pub fn blend_table(base: u8, factor: f64) -> LevelTable {
    let alpha = factor as f32;
    let base = base as f32;
    std::array::from_fn(|level| {
        let blended = base + alpha * (level as f32 - base);
        blended.clamp(0.0, 255.0) as u8
    })
}

/// Multiplicative brightness.
pub fn brightness_table(factor: f64) -> LevelTable {
    blend_table(0, factor)
}

/// Contrast around `mean`.
pub fn contrast_table(mean: u8, factor: f64) -> LevelTable {
    blend_table(mean, factor)
}

/// Mean level of a histogram rounded half up, as used for the contrast pivot.
/// An empty histogram yields 0.
pub fn rounded_mean(levels: &[u32; 256]) -> u8 {
    let count: u64 = levels.iter().map(|&n| n as u64).sum();
    if count == 0 {
        return 0;
    }
    let sum: u64 = levels
        .iter()
        .enumerate()
        .map(|(level, &n)| level as u64 * n as u64)
        .sum();
    let mean = sum as f64 / count as f64;
    (mean + 0.5).floor().min(255.0) as u8
}
