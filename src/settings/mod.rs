use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

const SETTINGS_FILENAME: &str = "settings.json";
const SETTINGS_ENV: &str = "IRVERB_SETTINGS";

/// Which convolution algorithm renders the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Direct for short IRs, radix-2 FFT otherwise.
    #[default]
    Auto,
    /// Hand-written radix-2 FFT engine.
    Fft,
    /// Time-domain accumulation.
    Direct,
    /// Planned real-input FFT (`realfft`).
    Planned,
}

impl Strategy {
    /// Resolves `Auto` against the IR length; other strategies are returned as-is.
    pub const fn resolve(self, ir_len: usize, direct_max_ir_len: usize) -> Self {
        match self {
            Self::Auto if ir_len <= direct_max_ir_len => Self::Direct,
            Self::Auto => Self::Fft,
            other => other,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Fft => "fft",
            Self::Direct => "direct",
            Self::Planned => "planned",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub strategy: Strategy,
    /// Longest IR (in samples) that `Auto` renders in the time domain.
    pub direct_max_ir_len: usize,
    /// Resample the IR to the dry sample rate when they differ.
    pub resample_ir: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            direct_max_ir_len: 64,
            resample_ir: true,
        }
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Strategy: {}", self.strategy)?;
        writeln!(f, "Direct Max IR Length: {}", self.direct_max_ir_len)?;
        writeln!(f, "Resample IR: {}", self.resample_ir)?;
        Ok(())
    }
}

impl Settings {
    /// Loads settings from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No settings file found at {path:?}, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| Error::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let settings: Self = serde_json::from_str(&contents).map_err(|e| Error::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!("Loaded settings from {path:?}");
        Ok(settings)
    }

    fn get_settings_path() -> PathBuf {
        if let Ok(path) = std::env::var(SETTINGS_ENV) {
            PathBuf::from(path)
        } else if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(config_dir)
                .join("irverb")
                .join(SETTINGS_FILENAME)
        } else if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("irverb")
                .join(SETTINGS_FILENAME)
        } else {
            // Fallback to current directory
            PathBuf::from(".").join(SETTINGS_FILENAME)
        }
    }
}
