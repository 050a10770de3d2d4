// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware output directory resolution.

use std::path::{Path, PathBuf};

use graustufe_core::AppConfig;

/// Where converted files go: the explicit override when set, otherwise
/// `<home>/Desktop/<folder_name>`.
pub fn resolve(config: &AppConfig) -> PathBuf {
    match &config.output_dir {
        Some(dir) => dir.clone(),
        None => desktop_dir(&home_dir()).join(&config.profile.folder_name),
    }
}

/// The desktop folder under `home`.
pub fn desktop_dir(home: &Path) -> PathBuf {
    home.join("Desktop")
}

fn home_dir() -> PathBuf {
    // HOME on Unix, USERPROFILE on Windows
    for var in ["HOME", "USERPROFILE"] {
        if let Some(home) = std::env::var_os(var).filter(|value| !value.is_empty()) {
            return PathBuf::from(home);
        }
    }
    // Last resort
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graustufe_core::OutputProfile;

    #[test]
    fn override_wins() {
        let config = AppConfig {
            output_dir: Some(PathBuf::from("/srv/out")),
            ..AppConfig::default()
        };
        assert_eq!(resolve(&config), PathBuf::from("/srv/out"));
    }

    #[test]
    fn default_is_profile_folder_on_desktop() {
        let config = AppConfig {
            profile: OutputProfile::plain(),
            ..AppConfig::default()
        };
        let dir = resolve(&config);
        assert!(dir.ends_with("Desktop/grayscale_output"));
    }
}
