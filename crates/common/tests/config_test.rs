use printify_agent_common::config::{SystemConfig, API_TOKEN_ENV};
use printify_agent_common::ConfigError;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        "test_config.toml",
        r#"
[catalog]
base_url = "http://localhost:9000/v1"
api_token = "file-token"
timeout_secs = 5

[catalog.retry]
max_attempts = 4
initial_backoff_ms = 100
max_backoff_ms = 400

[catalog.cache]
blueprint_ttl_secs = 60

[selection]
shortlist_size = 3
summary_max_items = 2

[logging]
level = "debug"
"#,
    );

    let config = SystemConfig::from_file(config_path.to_str().unwrap()).unwrap();

    assert_eq!(config.catalog.base_url, "http://localhost:9000/v1");
    assert_eq!(config.catalog.timeout_secs, 5);
    assert_eq!(config.catalog.retry.max_attempts, 4);
    assert_eq!(config.catalog.retry.max_backoff_ms, 400);
    assert_eq!(config.catalog.cache.blueprint_ttl_secs, 60);
    assert_eq!(config.selection.shortlist_size, 3);
    assert_eq!(config.selection.summary_max_items, 2);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_missing_sections_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir, "partial.toml", "[catalog]\napi_token = \"abc\"\n");

    let config = SystemConfig::from_file(&config_path).unwrap();

    assert_eq!(config.catalog.base_url, "https://api.printify.com/v1");
    assert_eq!(config.catalog.retry.max_attempts, 3);
    assert_eq!(config.catalog.retry.initial_backoff_ms, 4_000);
    assert_eq!(config.catalog.retry.max_backoff_ms, 10_000);
    assert_eq!(config.catalog.cache.blueprint_ttl_secs, 3_600);
    assert_eq!(config.selection.shortlist_size, 5);
}

#[test]
fn test_config_validation_zero_attempts() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        &temp_dir,
        "invalid_retry.toml",
        "[catalog.retry]\nmax_attempts = 0\n",
    );

    let result = SystemConfig::from_file(&config_path);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("max_attempts"));
}

#[test]
fn test_config_validation_backoff_order() {
    let mut config = SystemConfig::default();
    config.catalog.retry.initial_backoff_ms = 20_000;

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("initial_backoff_ms"));
}

#[test]
fn test_config_validation_bad_base_url() {
    let mut config = SystemConfig::default();
    config.catalog.base_url = "ftp://catalog.example".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation { ref field, .. }) if field == "catalog.base_url"
    ));

    config.catalog.base_url = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_ttl() {
    let mut config = SystemConfig::default();
    config.catalog.cache.blueprint_ttl_secs = 0;
    assert!(config.validate().unwrap_err().to_string().contains("blueprint_ttl_secs"));
}

#[test]
fn test_config_validation_zero_timeout() {
    let mut config = SystemConfig::default();
    config.catalog.timeout_secs = 0;
    match config.validate() {
        Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "catalog.timeout_secs"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_unparseable_file_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(&temp_dir, "broken.toml", "[catalog\nbase_url = ");

    assert!(matches!(
        SystemConfig::from_file(&config_path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_load_or_default_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = SystemConfig::load_or_default(temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.selection.summary_max_items, 5);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_api_token_env_overrides_file() {
    let mut config = SystemConfig::default();
    config.catalog.api_token = "from-file".to_string();

    std::env::set_var(API_TOKEN_ENV, "from-env");
    assert_eq!(config.api_token().unwrap(), "from-env");

    std::env::remove_var(API_TOKEN_ENV);
    assert_eq!(config.api_token().unwrap(), "from-file");
}

#[test]
#[serial]
fn test_api_token_missing() {
    std::env::remove_var(API_TOKEN_ENV);
    let config = SystemConfig::default();

    assert!(matches!(
        config.api_token(),
        Err(ConfigError::MissingCredential { .. })
    ));
}
