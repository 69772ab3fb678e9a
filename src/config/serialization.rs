//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        let log_file_dir = self.logging.file_dir.display().to_string();
        format!(
            r#"# apidocs configuration

# Section opened at startup (introduction, quickstart, authentication, users, errors)
default_section = "{section}"

# Fallback when no theme has been saved yet: auto, dark, light
# "auto" reads the terminal's COLORFGBG hint
system_theme = "{system_theme}"

# How long the "copied" badge stays on a code sample (milliseconds)
copy_reset_ms = {copy_reset_ms}

# Navigation groups expanded at startup
expanded_groups = {expanded:?}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            section = self.default_section,
            system_theme = self.system_theme.as_str(),
            copy_reset_ms = self.copy_reset_ms,
            expanded = self.expanded_groups,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = log_file_dir.replace('\\', "/"),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
