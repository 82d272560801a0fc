//! Layered configuration for the querymock emulator.
//!
//! Values resolve with increasing precedence from built-in defaults, an
//! optional configuration file (`--config-path` or `QUERYMOCK_CONFIG_PATH`),
//! `QUERYMOCK_*` environment variables, and finally command-line flags.
//! Loading goes through the [`OrthoConfig`] entry points `Config::load()` and
//! `Config::load_from_iter(args)`, both returning
//! `Result<Config, Arc<OrthoError>>`.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_ACCOUNT_ID, DEFAULT_BIND_ADDRESS, DEFAULT_LOG_FILTER, DEFAULT_REGISTRY_PATH,
    default_account_id, default_bind_address, default_log_filter, default_log_filter_string,
    default_log_format, default_registry_path,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use ortho_config::OrthoConfig;

/// Resolved emulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "QUERYMOCK")]
pub struct Config {
    /// Socket address the HTTP listener binds, as `host:port`.
    #[serde(default = "defaults::default_bind_address")]
    #[ortho_config(default = defaults::default_bind_address())]
    pub bind_address: String,
    /// YAML file holding the users and groups served by the emulator.
    #[serde(default = "defaults::default_registry_path")]
    #[ortho_config(default = defaults::default_registry_path())]
    pub registry_path: Utf8PathBuf,
    /// Account identifier embedded in resource names.
    #[serde(default = "defaults::default_account_id")]
    #[ortho_config(default = defaults::default_account_id())]
    pub account_id: String,
    /// `tracing` filter directive applied at start-up.
    #[serde(default = "defaults::default_log_filter_string")]
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Telemetry output format.
    #[serde(default = "defaults::default_log_format")]
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::default_bind_address(),
            registry_path: defaults::default_registry_path(),
            account_id: defaults::default_account_id(),
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
        }
    }
}

impl Config {
    /// Socket address the HTTP listener binds.
    #[must_use]
    pub fn bind_address(&self) -> &str {
        self.bind_address.as_str()
    }

    /// Registry file path.
    #[must_use]
    pub fn registry_path(&self) -> &Utf8Path {
        self.registry_path.as_path()
    }

    /// Account identifier embedded in resource names.
    #[must_use]
    pub fn account_id(&self) -> &str {
        self.account_id.as_str()
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Telemetry output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
