//! Integration tests for layered Settings loading.
//!
//! Precedence: defaults → global TOML → local `.treefs.toml` → `TREEFS_*`
//! env vars. These tests exercise the local layer and the env layer; the
//! global layer is machine state and is not written to here.

use std::fs;

use tempfile::TempDir;

use treefs::application::materialize::OnExists;
use treefs::config::{local_config_path, Settings};

#[test]
fn given_no_local_config_when_load_then_defaults_apply() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.on_exists, OnExists::Skip);
    assert!(!settings.collapse_root);
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config = r#"
on_exists = "overwrite"
collapse_root = true
"#;
    fs::write(local_config_path(dir.path()), config).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.on_exists, OnExists::Overwrite);
    assert!(settings.collapse_root);
}

#[test]
fn given_partial_local_config_when_load_then_inherits_rest() {
    // Arrange: only collapse_root is specified
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "collapse_root = true\n").unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert: unspecified keys keep their defaults
    assert!(settings.collapse_root);
    assert_eq!(settings.on_exists, OnExists::Skip);
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "on_exists = 42\n").unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(result.is_err());
}

#[test]
fn given_env_override_when_load_then_env_wins_over_local() {
    // Arrange: local config says one thing, the environment another
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "dest = \"from-file\"\n").unwrap();
    std::env::set_var("TREEFS_DEST", "from-env");

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");
    std::env::remove_var("TREEFS_DEST");

    // Assert
    assert_eq!(settings.dest, std::path::PathBuf::from("from-env"));
}

#[test]
fn given_template_when_parsed_then_valid_toml() {
    let template = Settings::template();

    let parsed: Result<toml::Value, _> = toml::from_str(&template);

    assert!(parsed.is_ok());
}

#[test]
fn given_default_settings_when_rendered_then_round_trips() {
    let settings = Settings::default();

    let rendered = settings.to_toml().expect("render settings");
    let reparsed: Settings = toml::from_str(&rendered).expect("reparse settings");

    assert_eq!(reparsed, settings);
}
