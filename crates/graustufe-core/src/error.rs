// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Graustufe.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Graustufe operations.
#[derive(Debug, Error)]
pub enum GraustufeError {
    // -- Decoding --
    #[error("unrecognized image format: {0}")]
    UnrecognizedFormat(String),

    #[error("animated image: {0}")]
    Animated(String),

    #[error("image decoding failed: {0}")]
    Decode(String),

    // -- Encoding --
    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("unsupported output extension: {0}")]
    UnsupportedOutput(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Storage --
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GraustufeError>;
