//! Built-in configuration defaults.

use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Address the HTTP listener binds when none is configured.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:9000";

/// Registry file read when none is configured.
pub const DEFAULT_REGISTRY_PATH: &str = "registry.yaml";

/// Account embedded in generated resource names.
pub const DEFAULT_ACCOUNT_ID: &str = "000000000000";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned bind address used where allocation is required.
#[must_use]
pub fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_owned()
}

/// Owned registry path used where allocation is required.
#[must_use]
pub fn default_registry_path() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_REGISTRY_PATH)
}

/// Owned account identifier used where allocation is required.
#[must_use]
pub fn default_account_id() -> String {
    DEFAULT_ACCOUNT_ID.to_owned()
}

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
