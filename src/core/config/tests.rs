use super::data::{path_display, Config, ConfigKey};
use super::io::ConfigError;
use crate::api::client::DEFAULT_API_BASE;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config
        .set(ConfigKey::ApiBase, "https://tutor.example.com/api/")
        .expect("valid api base");
    config
        .set(ConfigKey::DefaultLanguage, "FR")
        .expect("valid language");
    config.save_to_path(&config_path).expect("Failed to save");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load");
    assert_eq!(
        loaded.api_base.as_deref(),
        Some("https://tutor.example.com/api")
    );
    assert_eq!(loaded.default_language.as_deref(), Some("fr"));

    let mut loaded = loaded;
    loaded.unset(ConfigKey::ApiBase);
    loaded.save_to_path(&config_path).expect("Failed to save");

    let reloaded = Config::load_from_path(&config_path).expect("Failed to reload");
    assert!(reloaded.api_base.is_none());
    assert_eq!(reloaded.default_language.as_deref(), Some("fr"));
}

#[test]
fn invalid_toml_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "api_base = [unterminated").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == &config_path));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn unreadable_path_reports_read_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    // A directory exists at the path but cannot be read as a file.
    let err = Config::load_from_path(temp_dir.path()).expect_err("read should fail");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn save_over_a_directory_reports_write_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::create_dir(&config_path).expect("create blocking dir");

    let err = Config::default()
        .save_to_path(&config_path)
        .expect_err("rename over a directory should fail");
    assert!(matches!(err, ConfigError::Write { .. }));
    assert!(err.to_string().starts_with("Failed to write config at"));
}

#[test]
fn api_base_resolution_prefers_flag_then_config() {
    let config = Config {
        api_base: Some("http://tutor.lan:8080/api".into()),
        default_language: None,
    };
    assert_eq!(
        config.resolve_api_base(Some("http://other:5000/api/")),
        "http://other:5000/api"
    );
    assert_eq!(config.resolve_api_base(None), "http://tutor.lan:8080/api");
    assert_eq!(config.resolve_api_base(Some("  ")), "http://tutor.lan:8080/api");
    assert_eq!(Config::default().resolve_api_base(None), DEFAULT_API_BASE);
}

#[test]
fn language_resolution_normalizes_codes() {
    let config = Config {
        api_base: None,
        default_language: Some("de".into()),
    };
    assert_eq!(config.resolve_language(Some(" JA ")).as_deref(), Some("ja"));
    assert_eq!(config.resolve_language(None).as_deref(), Some("de"));
    assert_eq!(Config::default().resolve_language(None), None);
}

#[test]
fn set_rejects_non_http_api_base() {
    let mut config = Config::default();
    let err = config
        .set(ConfigKey::ApiBase, "localhost:5000")
        .expect_err("scheme is required");
    assert!(err.contains("http(s) URL"));
    assert!(config.api_base.is_none());
}

#[test]
fn config_keys_parse_from_cli_names() {
    assert_eq!("api-base".parse::<ConfigKey>(), Ok(ConfigKey::ApiBase));
    assert_eq!(
        "default-language".parse::<ConfigKey>(),
        Ok(ConfigKey::DefaultLanguage)
    );
    let err = "theme".parse::<ConfigKey>().expect_err("unknown key");
    assert!(err.contains("api-base, default-language"));
}

#[test]
fn path_display_uses_tilde_for_home() {
    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home).join(".config/parlance/config.toml");
            assert_eq!(path_display(&path), "~/.config/parlance/config.toml");
        }
    }
    assert_eq!(path_display("relative/config.toml"), "relative/config.toml");
}
