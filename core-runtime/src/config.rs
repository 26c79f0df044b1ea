//! # Fetch Configuration Module
//!
//! Provides configuration for the first-party request decorator.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `FetchConfig`
//! holding the execution mode, default request timeout, host-classification
//! cache capacity and transport settings. `build()` validates the values and
//! fails fast with actionable messages.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{ExecutionMode, FetchConfig};
//!
//! let config = FetchConfig::builder()
//!     .execution_mode(ExecutionMode::Production)
//!     .default_request_timeout_ms(30_000)
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable selecting the execution mode
pub const EXECUTION_MODE_ENV: &str = "SDK_ENV";

/// Default request timeout (60 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Default number of URL verdicts kept by the host classifier
pub const DEFAULT_HOST_CACHE_CAPACITY: usize = 4096;

/// Default user agent sent by the native transport
pub const DEFAULT_USER_AGENT: &str = concat!("unified-sdk/", env!("CARGO_PKG_VERSION"));

/// Execution mode of the hosting application.
///
/// Only non-production modes treat `localhost` as a first-party host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    Development,
    Test,
    Production,
}

impl ExecutionMode {
    /// Resolve the mode from `SDK_ENV`.
    ///
    /// Unset falls back to `Development` for debug builds and `Production`
    /// for release builds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the variable holds an unknown value.
    pub fn from_env() -> Result<Self> {
        match std::env::var(EXECUTION_MODE_ENV) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, ExecutionMode::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Development => "development",
            ExecutionMode::Test => "test",
            ExecutionMode::Production => "production",
        }
    }
}

impl Default for ExecutionMode {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Development;

        #[cfg(not(debug_assertions))]
        return Self::Production;
    }
}

impl FromStr for ExecutionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(ExecutionMode::Production),
            "development" | "dev" => Ok(ExecutionMode::Development),
            "test" => Ok(ExecutionMode::Test),
            other => Err(Error::Config(format!(
                "Unknown execution mode '{}'. Expected one of: production, development, test",
                other
            ))),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the request decorator and its native transport.
///
/// Use [`FetchConfigBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Execution mode (controls the `localhost` development shortcut)
    pub execution_mode: ExecutionMode,

    /// Timeout applied when a request does not specify one; `0` disables it
    pub default_request_timeout_ms: u64,

    /// Maximum number of URL classifications kept in memory
    pub host_cache_capacity: usize,

    /// User agent for the native transport
    pub user_agent: String,

    /// TCP connect timeout for the native transport
    pub connect_timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::default(),
            default_request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            host_cache_capacity: DEFAULT_HOST_CACHE_CAPACITY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: None,
        }
    }
}

impl FetchConfig {
    /// Creates a new builder for constructing a `FetchConfig`.
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Host cache capacity is greater than zero
    /// - User agent is not empty
    pub fn validate(&self) -> Result<()> {
        if self.host_cache_capacity == 0 {
            return Err(Error::Config(
                "Host cache capacity must be greater than 0".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("User agent cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Default timeout as a duration, `None` when disabled
    pub fn default_request_timeout(&self) -> Option<Duration> {
        match self.default_request_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

/// Builder for [`FetchConfig`].
#[derive(Debug, Default)]
pub struct FetchConfigBuilder {
    execution_mode: Option<ExecutionMode>,
    default_request_timeout_ms: Option<u64>,
    host_cache_capacity: Option<usize>,
    user_agent: Option<String>,
    connect_timeout: Option<Duration>,
}

impl FetchConfigBuilder {
    /// Sets the execution mode (defaults to the build profile's mode).
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = Some(mode);
        self
    }

    /// Sets the default request timeout in milliseconds; `0` disables it.
    pub fn default_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.default_request_timeout_ms = Some(timeout_ms);
        self
    }

    /// Sets the host classification cache capacity.
    pub fn host_cache_capacity(mut self, capacity: usize) -> Self {
        self.host_cache_capacity = Some(capacity);
        self
    }

    /// Sets the user agent used by the native transport.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the TCP connect timeout used by the native transport.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if validation fails.
    pub fn build(self) -> Result<FetchConfig> {
        let defaults = FetchConfig::default();
        let config = FetchConfig {
            execution_mode: self.execution_mode.unwrap_or(defaults.execution_mode),
            default_request_timeout_ms: self
                .default_request_timeout_ms
                .unwrap_or(defaults.default_request_timeout_ms),
            host_cache_capacity: self
                .host_cache_capacity
                .unwrap_or(defaults.host_cache_capacity),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            connect_timeout: self.connect_timeout.or(defaults.connect_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
