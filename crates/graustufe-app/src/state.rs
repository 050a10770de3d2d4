// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session state — the target list and settings, owned by the driver and
// passed to each handler.

use std::path::{Path, PathBuf};

use graustufe_core::AppConfig;
use graustufe_image::{collect_targets, merge_targets, Converter, OutputAllocator};
use tracing::debug;

/// Everything one run of the tool works on.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Validated settings for this run.
    pub config: AppConfig,
    /// Resolved output directory.
    pub output_dir: PathBuf,
    /// Files queued for conversion, in insertion order, without duplicates.
    pub targets: Vec<PathBuf>,
}

impl AppState {
    pub fn new(config: AppConfig, output_dir: PathBuf) -> Self {
        Self {
            config,
            output_dir,
            targets: Vec::new(),
        }
    }

    /// Expand `inputs` and queue the image files not already queued.
    /// Returns how many were added.
    pub fn add_inputs<P: AsRef<Path>>(&mut self, inputs: &[P]) -> usize {
        let added = merge_targets(&mut self.targets, collect_targets(inputs));
        debug!(added, queued = self.targets.len(), "Targets queued");
        added
    }

    /// A converter writing into this session's output directory.
    pub fn converter(&self) -> Converter {
        let allocator = OutputAllocator::new(&self.output_dir, self.config.profile.suffix.clone());
        Converter::new(self.config.adjustments, allocator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_twice_queues_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        std::fs::write(dir.path().join("b.gif"), b"x").unwrap();
        let mut state = AppState::new(AppConfig::default(), dir.path().join("out"));

        assert_eq!(state.add_inputs(&[dir.path()]), 2);
        assert_eq!(state.add_inputs(&[dir.path().join("a.png")]), 0);
        assert_eq!(state.targets.len(), 2);
    }

    #[test]
    fn converter_uses_profile_suffix() {
        let state = AppState::new(AppConfig::default(), PathBuf::from("/out"));
        let converter = state.converter();
        assert_eq!(converter.allocator().suffix(), "_adj");
        assert_eq!(converter.allocator().dir(), Path::new("/out"));
    }
}
