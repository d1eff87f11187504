//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::view::{DEFAULT_PAGE_SIZE, PageSize};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding `backend.base_url`
pub const ENV_API_URL: &str = "LIBRARY_API_URL";

/// Environment variable overriding `server.bind`
pub const ENV_BIND: &str = "LIBRARY_BIND";

/// Complete application configuration
///
/// Every section has defaults, so an empty YAML document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub server: ServerConfig,
    pub view: ViewConfig,
    pub loan: LoanConfig,
    pub logging: LoggingConfig,
}

/// Where the library backend lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:8080/api/v1`
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the proxy listens on
    pub bind: String,

    /// Page size of the `/books` envelope when the caller gives none
    pub default_list_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            default_list_size: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Page size of hosting pages
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Loan periods used when the client computes dates itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanConfig {
    /// Days between loan date and due date for a new loan
    pub default_period_days: u32,

    /// Days added by a default extension
    pub default_extension_days: u32,

    pub max_extensions: u32,
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self {
            default_period_days: 30,
            default_extension_days: 14,
            max_extensions: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` wins when set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "library_web=info,tower_http=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: display.clone(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(display),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `LIBRARY_API_URL` and `LIBRARY_BIND` when they are set
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_BIND).ok(),
        )
    }

    /// Apply explicit overrides; empty values are ignored
    pub fn with_overrides(mut self, base_url: Option<String>, bind: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!(base_url = %url, "backend URL overridden from environment");
            self.backend.base_url = url;
        }
        if let Some(bind) = bind.filter(|b| !b.trim().is_empty()) {
            self.server.bind = bind;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(invalid("backend.base_url", "", "must not be empty"));
        }
        if !(self.backend.base_url.starts_with("http://")
            || self.backend.base_url.starts_with("https://"))
        {
            return Err(invalid(
                "backend.base_url",
                &self.backend.base_url,
                "must start with http:// or https://",
            ));
        }
        if self.backend.timeout_secs == 0 {
            return Err(invalid("backend.timeout_secs", "0", "must be at least 1"));
        }
        if self.view.page_size == 0 {
            return Err(invalid("view.page_size", "0", "must be greater than zero"));
        }
        if self.server.default_list_size == 0 {
            return Err(invalid(
                "server.default_list_size",
                "0",
                "must be greater than zero",
            ));
        }
        if self.loan.default_period_days == 0 {
            return Err(invalid(
                "loan.default_period_days",
                "0",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Page size of hosting pages, falling back to the default if zero
    pub fn page_size(&self) -> PageSize {
        PageSize::try_from(self.view.page_size).unwrap_or_default()
    }

    /// Base URL without a trailing slash
    pub fn backend_url(&self) -> &str {
        self.backend.base_url.trim_end_matches('/')
    }
}

fn invalid(field: &str, value: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
