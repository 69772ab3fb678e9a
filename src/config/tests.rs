//! Configuration tests

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that the written template parses back into the same values.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: FileConfig = toml::from_str(&toml_str).unwrap_or_else(|e| {
        panic!("Default config should round-trip.\nTOML:\n{}\nError: {}", toml_str, e)
    });
    let merged = Config::merge(parsed, config.config_dir.clone(), no_env);
    assert_eq!(merged, config);
}

#[test]
fn test_config_roundtrip_customised() {
    let mut config = Config::default();
    config.default_section = "users".to_string();
    config.system_theme = SystemPreference::Dark;
    config.copy_reset_ms = 750;
    config.expanded_groups = vec!["Data Models".to_string()];
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let merged = Config::merge(parsed, config.config_dir.clone(), no_env);
    assert_eq!(merged, config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_gives_defaults() {
    let merged = Config::merge(FileConfig::default(), PathBuf::from("/tmp/x"), no_env);
    assert_eq!(merged.default_section, "introduction");
    assert_eq!(merged.system_theme, SystemPreference::Auto);
    assert_eq!(merged.copy_reset_ms, 2000);
    assert_eq!(merged.expanded_groups, ["Getting Started", "API Reference"]);
    assert_eq!(merged.config_dir, PathBuf::from("/tmp/x"));
}

#[test]
fn test_env_beats_file() {
    let file: FileConfig = toml::from_str(
        r#"
default_section = "errors"
system_theme = "light"
"#,
    )
    .unwrap();
    let env = env_from(&[
        ("APIDOCS_SECTION", "users"),
        ("APIDOCS_SYSTEM_THEME", "dark"),
    ]);
    let merged = Config::merge(file, PathBuf::new(), env);
    assert_eq!(merged.default_section, "users");
    assert_eq!(merged.system_theme, SystemPreference::Dark);
}

#[test]
fn test_unknown_system_theme_means_auto() {
    let file: FileConfig = toml::from_str(r#"system_theme = "sepia""#).unwrap();
    let merged = Config::merge(file, PathBuf::new(), no_env);
    assert_eq!(merged.system_theme, SystemPreference::Auto);
}

#[test]
fn test_blank_section_falls_back() {
    let merged = Config::merge(
        FileConfig::default(),
        PathBuf::new(),
        env_from(&[("APIDOCS_SECTION", "  ")]),
    );
    assert_eq!(merged.default_section, "introduction");
}

#[test]
fn test_blank_env_section_keeps_file_value() {
    let file = FileConfig {
        default_section: Some("users".to_string()),
        ..Default::default()
    };
    let merged = Config::merge(
        file,
        PathBuf::new(),
        env_from(&[("APIDOCS_SECTION", "  ")]),
    );
    assert_eq!(merged.default_section, "users");
}

#[test]
fn test_blank_env_theme_keeps_file_value() {
    let file = FileConfig {
        system_theme: Some("dark".to_string()),
        ..Default::default()
    };
    let merged = Config::merge(
        file,
        PathBuf::new(),
        env_from(&[("APIDOCS_SYSTEM_THEME", "")]),
    );
    assert_eq!(merged.system_theme, SystemPreference::Dark);
}

#[test]
fn test_unknown_rotation_is_daily() {
    let file: FileConfig = toml::from_str(
        r#"
[logging]
file_rotation = "weekly"
"#,
    )
    .unwrap();
    let merged = Config::merge(file, PathBuf::new(), no_env);
    assert_eq!(merged.logging.file_rotation, LogRotation::Daily);
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = Config::load_file_config(&dir.path().join(CONFIG_FILE)).unwrap();
    assert!(file.default_section.is_none());
}

#[test]
fn test_broken_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    std::fs::write(&path, "copy_reset_ms = \"soon\"").unwrap();

    let err = Config::load_file_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse"));
}
