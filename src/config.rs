//! Configuration handling for scheme-tui
//!
//! Stores display preferences and persisted state in XDG-style locations.

use crate::color::ColorFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Text shown on swatches
    #[serde(default)]
    pub display_format: ColorFormat,
    /// Text written to the clipboard on copy
    #[serde(default)]
    pub copy_format: ColorFormat,
    /// Initial chaos slider value, [0, 1)
    #[serde(default)]
    pub chaos: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_format: ColorFormat::Hex,
            copy_format: ColorFormat::Hex,
            chaos: 0.0,
        }
    }
}

impl Config {
    /// Get the config directory path (~/.config/scheme-tui on all platforms)
    pub fn config_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join("scheme-tui"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the persisted settings path (slider positions, scheme type)
    pub fn settings_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("settings.toml"))
    }

    /// Get the palette file path
    pub fn palette_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("palette.json"))
    }

    /// Get the log file path
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("scheme-tui.log"))
    }

    /// Load config from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from file, or create default if not exists
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        if !(0.0..1.0).contains(&config.chaos) {
            anyhow::bail!(
                "chaos must be in [0, 1), got {} in config file: {}",
                config.chaos,
                path.display()
            );
        }
        config.chaos = (config.chaos * 100.0).round() / 100.0;

        Ok(config)
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // Add helpful comments
        let content_with_comments = format!(
            "# Scheme TUI Configuration\n\
             # \n\
             # display_format / copy_format: \"hex\", \"rgb\" or \"hsl\"\n\
             # chaos: random spread added to every hue turn, 0.0 up to 0.99\n\
             \n\
             {content}"
        );

        fs::write(path, content_with_comments)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }
}
