use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::calculator::{DEFAULT_PRECISION, MAX_PRECISION};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Decimal places kept when formatting answers and previews.
    pub precision: usize,
    /// Show the result of the expression while it is being typed.
    pub live_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            live_preview: true,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/calcpad/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calcpad").join("config.toml"))
    }

    /// Load the configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location gives the defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.precision == 0 || self.precision > MAX_PRECISION {
            anyhow::bail!(
                "precision must be between 1 and {}, got {}",
                MAX_PRECISION,
                self.precision
            );
        }
        Ok(())
    }
}
