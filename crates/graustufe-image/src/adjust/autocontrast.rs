// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Histogram stretch with percentile cutoff.

use super::{identity_table, LevelTable};

/// Build the autocontrast table for a 256-bin histogram.
///
/// `cutoff` percent of all pixels is removed from the dark end of the
/// histogram and again from the bright end. The darkest and brightest
/// remaining levels are then stretched to 0 and 255. When nothing is left to
/// stretch (flat image, or everything cut away) the identity table is
/// returned.
pub fn autocontrast_table(levels: &[u32; 256], cutoff: u8) -> LevelTable {
    let mut bins: [u64; 256] = std::array::from_fn(|i| levels[i] as u64);

    if cutoff > 0 {
        let total: u64 = bins.iter().sum();
        let cut = total * cutoff as u64 / 100;
        trim(bins.iter_mut(), cut);
        trim(bins.iter_mut().rev(), cut);
    }

    let lo = bins.iter().position(|&count| count > 0);
    let hi = bins.iter().rposition(|&count| count > 0);
    let (lo, hi) = match (lo, hi) {
        (Some(lo), Some(hi)) if hi > lo => (lo, hi),
        _ => return identity_table(),
    };

    let scale = 255.0 / (hi - lo) as f64;
    let offset = -(lo as f64) * scale;
    std::array::from_fn(|level| {
        // Truncation toward zero, then clamp.
        let stretched = (level as f64 * scale + offset) as i64;
        stretched.clamp(0, 255) as u8
    })
}

/// Remove `cut` samples from the bins in iteration order.
fn trim<'a>(bins: impl Iterator<Item = &'a mut u64>, mut cut: u64) {
    for bin in bins {
        if cut == 0 {
            break;
        }
        let taken = cut.min(*bin);
        *bin -= taken;
        cut -= taken;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram_of(pixels: &[u8]) -> [u32; 256] {
        let mut levels = [0u32; 256];
        for &p in pixels {
            levels[p as usize] += 1;
        }
        levels
    }

    #[test]
    fn stretches_range_to_full_scale() {
        let table = autocontrast_table(&histogram_of(&[64, 128, 192]), 0);
        assert_eq!(table[64], 0);
        assert_eq!(table[128], 127);
        assert_eq!(table[192], 255);
        // Levels outside the original range clamp.
        assert_eq!(table[0], 0);
        assert_eq!(table[255], 255);
    }

    #[test]
    fn flat_image_is_unchanged() {
        let table = autocontrast_table(&histogram_of(&[77; 10]), 2);
        assert_eq!(table, identity_table());
    }

    #[test]
    fn empty_histogram_is_unchanged() {
        assert_eq!(autocontrast_table(&[0; 256], 1), identity_table());
    }

    /// With 100 pixels and a 1% cutoff, one outlier on each side is dropped
    /// before the stretch.
    #[test]
    fn cutoff_discards_tail_outliers() {
        let mut pixels = vec![0u8, 255u8];
        pixels.extend(std::iter::repeat_n(64u8, 49));
        pixels.extend(std::iter::repeat_n(192u8, 49));
        assert_eq!(pixels.len(), 100);

        let table = autocontrast_table(&histogram_of(&pixels), 1);
        assert_eq!(table[64], 0);
        assert_eq!(table[192], 255);
        assert_eq!(table[128], 127);
    }

    /// The cut count rounds down: 1% of 99 pixels removes nothing.
    #[test]
    fn cut_count_rounds_down() {
        let mut pixels = vec![0u8, 255u8];
        pixels.extend(std::iter::repeat_n(128u8, 97));

        let table = autocontrast_table(&histogram_of(&pixels), 1);
        assert_eq!(table, identity_table());
    }

    #[test]
    fn table_is_monotonic() {
        let pixels: Vec<u8> = (30..=220).collect();
        for cutoff in 0..=5 {
            let table = autocontrast_table(&histogram_of(&pixels), cutoff);
            assert!(table.windows(2).all(|w| w[0] <= w[1]), "cutoff {cutoff}");
        }
    }
}
