// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Show results in the platform file browser.

use std::path::Path;

use tracing::{debug, warn};

/// Open `dir` in the file browser without waiting for it. Failure is logged
/// and otherwise ignored.
pub fn open_folder(dir: &Path) {
    match open::that_detached(dir) {
        Ok(()) => debug!(dir = %dir.display(), "Opened output folder"),
        Err(err) => warn!(dir = %dir.display(), error = %err, "Could not open output folder"),
    }
}
