//! Integration tests for loading client configuration from disk

use bitmark_registry::{ClientConfig, ConfigError, RegistryClient};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_config_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("registry.toml");
    fs::write(
        &config_path,
        r#"
connect_timeout_secs = 2
tls_timeout_secs = 3
request_timeout_secs = 20
user_agent = "indexer/0.4"
"#,
    )
    .unwrap();

    let config = ClientConfig::from_file(&config_path).unwrap();
    assert_eq!(config.connect_timeout, Duration::from_secs(2));
    assert_eq!(config.tls_timeout, Duration::from_secs(3));
    assert_eq!(config.request_timeout, Duration::from_secs(20));
    assert_eq!(config.user_agent, "indexer/0.4");

    let client =
        RegistryClient::with_config("https://registry.example.com", config.clone()).unwrap();
    assert_eq!(client.config(), &config);
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();
    let result = ClientConfig::from_file(&temp.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_invalid_toml() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("registry.toml");
    fs::write(&config_path, "request_timeout_secs = \"ten\"").unwrap();

    let result = ClientConfig::from_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_config_file_failing_validation() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("registry.toml");
    fs::write(
        &config_path,
        "connect_timeout_secs = 30\nrequest_timeout_secs = 10\n",
    )
    .unwrap();

    let result = ClientConfig::from_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}
