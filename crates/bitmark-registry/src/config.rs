//! Client configuration
//!
//! Transport timeouts and request identity for [`RegistryClient`](crate::RegistryClient),
//! optionally loaded from a TOML document:
//!
//! ```toml
//! connect_timeout_secs = 5
//! tls_timeout_secs = 5
//! request_timeout_secs = 10
//! user_agent = "my-wallet/1.0"
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default time allowed to establish the TCP connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time allowed for the TLS handshake
pub const DEFAULT_TLS_TIMEOUT: Duration = Duration::from_secs(5);

/// Default budget for a whole request, from connect to the last body byte
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// Registry client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// TLS handshake timeout
    pub tls_timeout: Duration,

    /// Overall request timeout
    pub request_timeout: Duration,

    /// Value of the `User-Agent` header
    pub user_agent: String,
}

/// On-disk shape of [`ClientConfig`]
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    connect_timeout_secs: Option<u64>,

    #[serde(default)]
    tls_timeout_secs: Option<u64>,

    #[serde(default)]
    request_timeout_secs: Option<u64>,

    #[serde(default)]
    user_agent: Option<String>,
}

fn default_user_agent() -> String {
    format!("bitmark-registry/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            tls_timeout: DEFAULT_TLS_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a configuration from a TOML string
    ///
    /// Missing keys keep their defaults.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let defaults = Self::default();

        let config = Self {
            connect_timeout: file
                .connect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            tls_timeout: file
                .tls_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.tls_timeout),
            request_timeout: file
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            user_agent: file.user_agent.unwrap_or(defaults.user_agent),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("connect_timeout", self.connect_timeout),
            ("tls_timeout", self.tls_timeout),
            ("request_timeout", self.request_timeout),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }

        if self.request_timeout < self.connect_timeout {
            return Err(ConfigError::ValidationError(format!(
                "request_timeout ({}s) is shorter than connect_timeout ({}s)",
                self.request_timeout.as_secs_f64(),
                self.connect_timeout.as_secs_f64()
            )));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "user_agent cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the TCP connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the TLS handshake timeout
    pub fn with_tls_timeout(mut self, timeout: Duration) -> Self {
        self.tls_timeout = timeout;
        self
    }

    /// Set the overall request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the `User-Agent` header value
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Time budget for connection setup, TCP plus TLS
    pub(crate) fn establish_timeout(&self) -> Duration {
        self.connect_timeout + self.tls_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.tls_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("bitmark-registry/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_keeps_defaults() {
        let config = ClientConfig::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_parse_partial() {
        let toml = r#"
request_timeout_secs = 30
user_agent = "explorer/2.1"
"#;

        let config = ClientConfig::from_str(toml).unwrap();
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.tls_timeout, DEFAULT_TLS_TIMEOUT);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.user_agent, "explorer/2.1");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = ClientConfig::from_str("retries = 3");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = ClientConfig::from_str("tls_timeout_secs = 0");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_request_shorter_than_connect_rejected() {
        let config = ClientConfig::default()
            .with_connect_timeout(Duration::from_secs(20))
            .with_request_timeout(Duration::from_secs(10));

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("request_timeout"));
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let config = ClientConfig::default().with_user_agent("  ");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_establish_timeout() {
        let config = ClientConfig::default()
            .with_connect_timeout(Duration::from_secs(2))
            .with_tls_timeout(Duration::from_secs(3));
        assert_eq!(config.establish_timeout(), Duration::from_secs(5));
    }
}
