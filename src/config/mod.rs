//! Configuration for the docs browser
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/apidocs/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::content::DEFAULT_SECTION;
use crate::nav::DEFAULT_EXPANDED;
use crate::theme::SystemPreference;

mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use observability::{FileLogging, LogRotation, LoggingConfig};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Section opened at startup
    pub default_section: String,

    /// Fallback theme when no preference has been saved
    pub system_theme: SystemPreference,

    /// How long a code sample shows "copied" (milliseconds)
    pub copy_reset_ms: u64,

    /// Navigation groups expanded at startup
    pub expanded_groups: Vec<String>,

    /// Directory holding config.toml and preferences.toml
    pub config_dir: PathBuf,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_section: DEFAULT_SECTION.to_string(),
            system_theme: SystemPreference::Auto,
            copy_reset_ms: 2000,
            expanded_groups: DEFAULT_EXPANDED.iter().map(|g| g.to_string()).collect(),
            config_dir: default_config_dir(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub default_section: Option<String>,
    pub system_theme: Option<String>,
    pub copy_reset_ms: Option<u64>,
    pub expanded_groups: Option<Vec<String>>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// `~/.config/apidocs`, or `./.apidocs` when there is no home directory
///
/// Uses Unix-style ~/.config on all platforms for consistency
fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".config").join("apidocs"))
        .unwrap_or_else(|| PathBuf::from(".apidocs"))
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Config directory: APIDOCS_CONFIG_DIR > ~/.config/apidocs
    pub fn config_dir() -> PathBuf {
        std::env::var_os("APIDOCS_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_config_dir)
    }

    /// Path of the config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let path = Self::config_path();

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Ignore errors - config is optional
        let _ = Self::write_default(&path);
    }

    /// Overwrite the config file with the defaults
    pub fn reset() -> Result<PathBuf> {
        let path = Self::config_path();
        Self::write_default(&path)?;
        Ok(path)
    }

    fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, Self::default().to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Load file config if it exists
    ///
    /// A missing file means defaults. A file that exists but can't be read
    /// or parsed is an error; a broken config should fail fast rather than
    /// silently fall back to defaults.
    pub(crate) fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let config_dir = Self::config_dir();
        let file = Self::load_file_config(&config_dir.join(CONFIG_FILE))?;
        Ok(Self::merge(file, config_dir, |key| std::env::var(key).ok()))
    }

    /// Combine file values and environment lookups over the defaults
    pub(crate) fn merge(
        file: FileConfig,
        config_dir: PathBuf,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let defaults = Self::default();

        // Section: env > file > default; blank values at either level are skipped
        let default_section = non_blank(env("APIDOCS_SECTION"))
            .or_else(|| non_blank(file.default_section))
            .unwrap_or(defaults.default_section);

        // System theme: env > file > default; unknown values mean auto
        let system_theme = non_blank(env("APIDOCS_SYSTEM_THEME"))
            .or(file.system_theme)
            .map(|s| {
                s.parse::<SystemPreference>().unwrap_or_else(|e| {
                    eprintln!("Warning: {}, using auto", e);
                    SystemPreference::Auto
                })
            })
            .unwrap_or(defaults.system_theme);

        let copy_reset_ms = file.copy_reset_ms.unwrap_or(defaults.copy_reset_ms);
        let expanded_groups = file.expanded_groups.unwrap_or(defaults.expanded_groups);
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            default_section,
            system_theme,
            copy_reset_ms,
            expanded_groups,
            config_dir,
            logging,
        }
    }

    /// Print a config load failure in a hard-to-miss box
    pub fn report_error(path: &Path, error: &anyhow::Error) {
        eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
        eprintln!("║  CONFIG ERROR - Failed to load configuration file            ║");
        eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
        eprintln!("  File: {}\n", path.display());
        eprintln!("  Error: {:#}\n", error);
        eprintln!("  Tip: Check for:\n");
        eprintln!("    - Missing quotes around string values");
        eprintln!("    - Invalid numbers (copy_reset_ms is in milliseconds)");
        eprintln!("    - Malformed array syntax in expanded_groups\n");
        eprintln!("  To reset, run `apidocs config --reset`.\n");
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
