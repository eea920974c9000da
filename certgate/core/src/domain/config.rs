// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Certgate Configuration
//
// YAML configuration for the certification gate:
// - Storage backend selection (in-memory or PostgreSQL)
// - Vendor testing suite endpoint, timeout and retry policy
// - Event bus sizing
// - Logging level and output format
//
// Secrets may be given as "env:VAR_NAME" and are resolved at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::repository::{PostgresConfig, StorageBackend};

pub const CONFIG_PATH_ENV: &str = "CERTGATE_CONFIG_PATH";
pub const DEFAULT_CONFIG_FILE: &str = "certgate-config.yaml";

/// Top-level configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CertgateConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub testing_suite: TestingSuiteConfig,

    #[serde(default)]
    pub event_bus: EventBusConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageKind,

    /// PostgreSQL connection string (supports "env:VAR_NAME")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestingSuiteConfig {
    /// Base URL of the vendor testing service. Unset means every run
    /// degrades to manual review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Bearer token (supports "env:VAR_NAME")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Limit for a single attempt against the testing service
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBusConfig {
    #[serde(default = "default_event_bus_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

// Default value functions
fn default_max_connections() -> u32 {
    5
}

fn default_timeout_seconds() -> u64 {
    300
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}

fn default_event_bus_capacity() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageKind::InMemory,
            connection_string: None,
            max_connections: default_max_connections(),
        }
    }
}

impl Default for TestingSuiteConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

impl TestingSuiteConfig {
    /// Per-attempt request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Whole-run limit: every attempt at the per-attempt timeout plus the
    /// backoff slept between attempts
    pub fn total_timeout(&self) -> Duration {
        let attempts = self.max_retries.max(1);
        let backoff_ms = (0..attempts - 1).fold(0_u64, |total, attempt| {
            total.saturating_add(self.retry_delay_ms.saturating_mul(2_u64.saturating_pow(attempt)))
        });
        self.timeout()
            .saturating_mul(attempts)
            .saturating_add(Duration::from_millis(backoff_ms))
    }

    pub fn resolved_api_key(&self) -> Result<Option<String>, ConfigError> {
        self.api_key.as_deref().map(resolve_secret).transpose()
    }
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: default_event_bus_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Compact,
        }
    }
}

/// Resolve a value that may be written as "env:VAR_NAME"
pub fn resolve_secret(value: &str) -> Result<String, ConfigError> {
    match value.strip_prefix("env:") {
        Some(var_name) => {
            std::env::var(var_name).map_err(|_| ConfigError::MissingEnvVar(var_name.to_string()))
        }
        None => Ok(value.to_string()),
    }
}

impl CertgateConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_yaml_string()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Discover configuration file using precedence order
    /// 1. CERTGATE_CONFIG_PATH environment variable
    /// 2. ./certgate-config.yaml (working directory)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from(format!("./{}", DEFAULT_CONFIG_FILE));
        if cwd.exists() {
            return Some(cwd);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Explicit path must exist and parse
        let mut config = if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            Self::from_yaml_file(&path)?
        } else if let Some(path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", path);
            Self::from_yaml_file(&path)?
        } else {
            tracing::debug!("No configuration file found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CERTGATE_DATABASE_URL") {
            tracing::info!("Environment override: CERTGATE_DATABASE_URL");
            self.storage.backend = StorageKind::Postgres;
            self.storage.connection_string = Some(url);
        }

        if let Ok(endpoint) = std::env::var("CERTGATE_TESTING_SUITE_ENDPOINT") {
            tracing::info!("Environment override: CERTGATE_TESTING_SUITE_ENDPOINT={}", endpoint);
            self.testing_suite.endpoint = Some(endpoint);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageKind::Postgres {
            match self.storage.connection_string.as_deref() {
                Some(conn) if !conn.trim().is_empty() => {}
                _ => {
                    return Err(ConfigError::Invalid(
                        "storage.connection_string is required for the postgres backend".to_string(),
                    ))
                }
            }
            if self.storage.max_connections == 0 {
                return Err(ConfigError::Invalid(
                    "storage.max_connections must be greater than zero".to_string(),
                ));
            }
        }

        if let Some(endpoint) = &self.testing_suite.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "testing_suite.endpoint must be an http(s) URL: '{}'",
                    endpoint
                )));
            }
        }

        if self.testing_suite.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "testing_suite.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        if self.event_bus.capacity == 0 {
            return Err(ConfigError::Invalid(
                "event_bus.capacity must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Storage backend with secrets resolved
    pub fn storage_backend(&self) -> Result<StorageBackend, ConfigError> {
        match self.storage.backend {
            StorageKind::InMemory => Ok(StorageBackend::InMemory),
            StorageKind::Postgres => {
                let raw = self.storage.connection_string.as_deref().ok_or_else(|| {
                    ConfigError::Invalid(
                        "storage.connection_string is required for the postgres backend".to_string(),
                    )
                })?;
                Ok(StorageBackend::PostgreSQL(PostgresConfig {
                    connection_string: resolve_secret(raw)?,
                    max_connections: self.storage.max_connections,
                }))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Environment variable not set: {0}")]
    MissingEnvVar(String),
}
