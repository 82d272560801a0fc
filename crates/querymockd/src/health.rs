//! Structured health reporting for emulator lifecycle events.

use std::net::SocketAddr;
use std::sync::Arc;

use querymock_config::Config;

use crate::bootstrap::BootstrapError;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once the identity registry has been loaded.
    fn registry_loaded(&self, users: usize, groups: usize);

    /// Invoked once the HTTP listener is bound.
    fn listener_bound(&self, address: SocketAddr);

    /// Invoked after the server has shut down.
    fn server_stopped(&self);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn registry_loaded(&self, users: usize, groups: usize) {
        (**self).registry_loaded(users, groups);
    }

    fn listener_bound(&self, address: SocketAddr) {
        (**self).listener_bound(address);
    }

    fn server_stopped(&self) {
        (**self).server_stopped();
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting emulator bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            bind_address = %config.bind_address(),
            registry = %config.registry_path(),
            account_id = %config.account_id(),
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            "emulator bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "emulator bootstrap failed"
        );
    }

    fn registry_loaded(&self, users: usize, groups: usize) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "registry_loaded",
            users,
            groups,
            "identity registry loaded"
        );
    }

    fn listener_bound(&self, address: SocketAddr) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listener_bound",
            address = %address,
            "listening for query requests"
        );
    }

    fn server_stopped(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "server_stopped",
            "server stopped"
        );
    }
}
