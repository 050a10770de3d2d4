// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch driver — converts every queued target in order and reports progress.

use std::io::Write;
use std::time::Instant;

use graustufe_core::error::Result;
use graustufe_core::types::BatchSummary;
use tracing::{info, instrument};

use crate::state::AppState;

const RULE: &str = "------------------------------------------------------------";

/// Convert all targets in `state`, writing one progress line per file and a
/// closing summary to `out`.
///
/// Per-file failures become SKIP lines; only a failure to write the report
/// itself ends the batch early.
#[instrument(skip_all, fields(targets = state.targets.len()))]
pub fn run_batch(state: &AppState, out: &mut impl Write) -> Result<BatchSummary> {
    let converter = state.converter();
    let total = state.targets.len();
    let started = Instant::now();
    let mut summary = BatchSummary {
        total,
        ..BatchSummary::default()
    };

    for (index, source) in state.targets.iter().enumerate() {
        let outcome = converter.convert_file(source);
        summary.record(&outcome);
        writeln!(out, "{}", outcome.progress_line(index + 1, total))?;
    }
    summary.elapsed = started.elapsed();

    writeln!(out, "{RULE}")?;
    writeln!(out, "Output: {}", state.output_dir.display())?;
    writeln!(out, "{summary}")?;
    out.flush()?;

    info!(
        converted = summary.converted,
        skipped = summary.skipped,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graustufe_core::AppConfig;
    use image::{Rgb, RgbImage};

    #[test]
    fn reports_each_file_and_summary() {
        let input = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(4, 4, Rgb([10, 200, 30]))
            .save(input.path().join("a.png"))
            .unwrap();
        std::fs::write(input.path().join("b.jpg"), b"not a jpeg").unwrap();

        let mut state = AppState::new(AppConfig::default(), out_dir.path().to_path_buf());
        state.add_inputs(&[input.path()]);

        let mut report = Vec::new();
        let summary = run_batch(&state, &mut report).unwrap();
        let report = String::from_utf8(report).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(summary.converted, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(lines[0], "[1/2] OK  : a.png -> a_adj.png");
        assert_eq!(lines[1], "[2/2] SKIP: b.jpg (unrecognized or unsupported image format)");
        assert_eq!(lines[2], RULE);
        assert_eq!(lines[3], format!("Output: {}", out_dir.path().display()));
        assert!(lines[4].starts_with("Done: converted 1 / skipped 1 / total 2 | "));
        assert!(out_dir.path().join("a_adj.png").exists());
    }

    #[test]
    fn empty_batch_still_summarises() {
        let out_dir = tempfile::tempdir().unwrap();
        let state = AppState::new(AppConfig::default(), out_dir.path().to_path_buf());

        let mut report = Vec::new();
        let summary = run_batch(&state, &mut report).unwrap();

        assert_eq!(summary.total, 0);
        assert!(String::from_utf8(report).unwrap().contains("total 0"));
    }
}
