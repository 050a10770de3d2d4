// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use graustufe_core::config::{AdjustmentConfig, AppConfig, OutputProfile};
use graustufe_core::error::{GraustufeError, Result};
use graustufe_image::preview::PANE_RANGE;

#[derive(Debug, Parser)]
#[command(name = "graustufe")]
#[command(version, about = "Convert images to grayscale with optional tone adjustments", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image files or directories (walked recursively). A path named
    /// `preview` is read as the subcommand; write it as `./preview`.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a before/after preview sheet for one image.
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Image to preview.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Width of each pane (1-8192).
    #[arg(long, default_value_t = 540, value_parser = pane_size())]
    pub width: u32,

    /// Height of each pane (1-8192).
    #[arg(long, default_value_t = 640, value_parser = pane_size())]
    pub height: u32,
}

fn pane_size() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(i64::from(*PANE_RANGE.start())..=i64::from(*PANE_RANGE.end()))
}

/// Output folder, filename suffix, and whether adjustments are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Grayscale only: `_gray` suffix, `grayscale_output` folder.
    Plain,
    /// Grayscale plus adjustments: `_adj` suffix, `outputfolder` folder.
    Adjust,
}

impl Mode {
    pub fn profile(self) -> OutputProfile {
        match self {
            Self::Plain => OutputProfile::plain(),
            Self::Adjust => OutputProfile::adjust(),
        }
    }
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[arg(long, value_enum, default_value = "adjust", global = true)]
    pub mode: Mode,

    /// Stretch the histogram before the other adjustments.
    #[arg(long, global = true)]
    pub autocontrast: bool,

    /// Percent of pixels discarded from each histogram tail (0-5).
    #[arg(long, global = true)]
    pub cutoff: Option<u8>,

    /// Brightness factor (0.5-1.5).
    #[arg(long, global = true)]
    pub brightness: Option<f64>,

    /// Contrast factor (0.5-1.5).
    #[arg(long, global = true)]
    pub contrast: Option<f64>,

    /// Gamma (0.7-1.3).
    #[arg(long, global = true)]
    pub gamma: Option<f64>,

    /// JSON file with adjustment settings; flags override its values.
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Write here instead of the folder on the desktop.
    #[arg(long, value_name = "DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Do not open the output folder when done.
    #[arg(long, global = true)]
    pub no_open: bool,
}

impl SettingsArgs {
    fn touches_adjustments(&self) -> bool {
        self.autocontrast
            || self.cutoff.is_some()
            || self.brightness.is_some()
            || self.contrast.is_some()
            || self.gamma.is_some()
            || self.config.is_some()
    }

    /// Merge the config file (if any) and flags into a validated config.
    pub fn to_app_config(&self) -> Result<AppConfig> {
        if self.mode == Mode::Plain && self.touches_adjustments() {
            return Err(GraustufeError::InvalidConfig(
                "adjustment options require --mode adjust".into(),
            ));
        }

        let mut adjustments = match &self.config {
            Some(path) => AdjustmentConfig::from_json_file(path)?,
            None => AdjustmentConfig::default(),
        };
        if self.autocontrast {
            adjustments.autocontrast = true;
        }
        if let Some(cutoff) = self.cutoff {
            adjustments.cutoff = cutoff;
        }
        if let Some(brightness) = self.brightness {
            adjustments.brightness = brightness;
        }
        if let Some(contrast) = self.contrast {
            adjustments.contrast = contrast;
        }
        if let Some(gamma) = self.gamma {
            adjustments.gamma = gamma;
        }

        let config = AppConfig {
            profile: self.mode.profile(),
            output_dir: self.output_dir.clone(),
            adjustments,
            open_output_dir: !self.no_open,
        };
        config.validate()?;
        Ok(config)
    }
}
