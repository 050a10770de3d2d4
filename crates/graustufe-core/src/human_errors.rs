// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Short, user-facing wording for errors that end in a skipped file.
//
// The batch driver prints one SKIP line per failed file. The reason has to fit
// on that line, so it is a fixed phrase for the common cases and the raw
// message otherwise.

use crate::error::GraustufeError;

/// Whether a failure is a property of the input or something that went wrong
/// while processing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipKind {
    /// The file is not something we convert (unknown format, animation).
    Unsupported,
    /// Conversion was attempted and failed.
    Failed,
}

/// Classify an error for reporting.
pub fn skip_kind(err: &GraustufeError) -> SkipKind {
    match err {
        GraustufeError::UnrecognizedFormat(_) | GraustufeError::Animated(_) => {
            SkipKind::Unsupported
        }
        _ => SkipKind::Failed,
    }
}

/// Reason shown in parentheses after `SKIP: <name>`.
pub fn skip_reason(err: &GraustufeError) -> String {
    match err {
        GraustufeError::UnrecognizedFormat(_) => {
            "unrecognized or unsupported image format".into()
        }
        GraustufeError::Animated(_) => "animated image skipped".into(),
        other => format!("failed: {other}"),
    }
}
