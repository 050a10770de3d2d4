// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adjustment settings, output profiles, and application configuration.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GraustufeError, Result};

/// Tolerance under which a factor counts as its identity value.
pub const IDENTITY_EPSILON: f64 = 1e-6;

/// Accepted autocontrast cutoff, in percent per histogram tail.
pub const CUTOFF_RANGE: RangeInclusive<u8> = 0..=5;
/// Accepted brightness factor.
pub const BRIGHTNESS_RANGE: RangeInclusive<f64> = 0.5..=1.5;
/// Accepted contrast factor.
pub const CONTRAST_RANGE: RangeInclusive<f64> = 0.5..=1.5;
/// Accepted gamma value.
pub const GAMMA_RANGE: RangeInclusive<f64> = 0.7..=1.3;

/// Tone adjustments applied after grayscale conversion.
///
/// The defaults are identity values: a default config leaves the grayscale
/// image untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentConfig {
    /// Stretch the histogram before the other steps.
    pub autocontrast: bool,
    /// Percent of pixels discarded from each histogram tail (0-5).
    pub cutoff: u8,
    /// Multiplicative brightness factor (0.5-1.5).
    pub brightness: f64,
    /// Contrast factor around the mean luminance (0.5-1.5).
    pub contrast: f64,
    /// Gamma value; output level is `(i/255)^(1/gamma)` (0.7-1.3).
    pub gamma: f64,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            autocontrast: false,
            cutoff: 1,
            brightness: 1.0,
            contrast: 1.0,
            gamma: 1.0,
        }
    }
}

impl AdjustmentConfig {
    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if !CUTOFF_RANGE.contains(&self.cutoff) {
            return Err(GraustufeError::InvalidConfig(format!(
                "cutoff {} outside {}..={}",
                self.cutoff,
                CUTOFF_RANGE.start(),
                CUTOFF_RANGE.end()
            )));
        }
        check_factor("brightness", self.brightness, &BRIGHTNESS_RANGE)?;
        check_factor("contrast", self.contrast, &CONTRAST_RANGE)?;
        check_factor("gamma", self.gamma, &GAMMA_RANGE)?;
        Ok(())
    }

    /// True when running the pipeline with this config changes nothing.
    pub fn is_identity(&self) -> bool {
        !self.autocontrast
            && !deviates(self.brightness)
            && !deviates(self.contrast)
            && !deviates(self.gamma)
    }

    /// Load adjustments from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}

/// Whether `factor` is far enough from 1.0 for its step to run.
pub fn deviates(factor: f64) -> bool {
    (factor - 1.0).abs() > IDENTITY_EPSILON
}

fn check_factor(name: &str, value: f64, range: &RangeInclusive<f64>) -> Result<()> {
    if !value.is_finite() || !range.contains(&value) {
        return Err(GraustufeError::InvalidConfig(format!(
            "{name} {value} outside {:.2}..={:.2}",
            range.start(),
            range.end()
        )));
    }
    Ok(())
}

/// Output folder name and filename suffix pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputProfile {
    /// Folder created under the desktop.
    pub folder_name: String,
    /// Inserted between the source stem and its extension.
    pub suffix: String,
}

impl OutputProfile {
    /// Plain grayscale conversion, no adjustments.
    pub fn plain() -> Self {
        Self {
            folder_name: "grayscale_output".into(),
            suffix: "_gray".into(),
        }
    }

    /// Grayscale conversion followed by the adjustment pipeline.
    pub fn adjust() -> Self {
        Self {
            folder_name: "outputfolder".into(),
            suffix: "_adj".into(),
        }
    }
}

impl Default for OutputProfile {
    fn default() -> Self {
        Self::adjust()
    }
}

/// Settings for one invocation of the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output folder name and filename suffix.
    pub profile: OutputProfile,
    /// Explicit output directory; replaces `<desktop>/<folder_name>`.
    pub output_dir: Option<PathBuf>,
    /// Tone adjustments.
    pub adjustments: AdjustmentConfig,
    /// Open the output folder in the file browser after a batch.
    pub open_output_dir: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: OutputProfile::default(),
            output_dir: None,
            adjustments: AdjustmentConfig::default(),
            open_output_dir: true,
        }
    }
}

impl AppConfig {
    /// Validate nested settings.
    pub fn validate(&self) -> Result<()> {
        if self.profile.folder_name.trim().is_empty() {
            return Err(GraustufeError::InvalidConfig(
                "output folder name is empty".into(),
            ));
        }
        if self.profile.suffix.contains(['/', '\\']) {
            return Err(GraustufeError::InvalidConfig(format!(
                "suffix {:?} contains a path separator",
                self.profile.suffix
            )));
        }
        self.adjustments.validate()
    }
}
