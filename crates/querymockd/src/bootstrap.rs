//! Emulator bootstrap orchestration.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;
use tokio::net::TcpListener;

use querymock_config::{Config, OrthoConfig};

use crate::dispatch::Service;
use crate::health::HealthReporter;
use crate::iam;
use crate::registry::{RegistryError, StaticRegistry};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{self, TransportError};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the emulator configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader error when sources cannot be merged.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that reads defaults, the config file, environment, and CLI flags.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The identity registry failed to load.
    #[error("failed to load identity registry: {source}")]
    Registry {
        /// Underlying registry error.
        #[source]
        source: RegistryError,
    },
}

/// Result of a successful bootstrap invocation.
pub struct Daemon {
    config: Config,
    service: Arc<Service>,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Daemon {
    fn new(
        config: Config,
        service: Arc<Service>,
        telemetry: TelemetryHandle,
        reporter: Arc<dyn HealthReporter>,
    ) -> Self {
        Self {
            config,
            service,
            telemetry,
            reporter,
        }
    }

    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared dispatch service.
    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Binds the configured address and serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when binding or serving fails.
    pub async fn run(self) -> Result<(), TransportError> {
        let listener = transport::bind(self.config.bind_address()).await?;
        self.run_on(listener, transport::shutdown_signal()).await
    }

    /// Serves on an already bound `listener` until `signal` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Serve`] when the server loop fails.
    pub async fn run_on<F>(self, listener: TcpListener, signal: F) -> Result<(), TransportError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(address) = listener.local_addr() {
            self.reporter.listener_bound(address);
        }
        let outcome = transport::serve_with_shutdown(listener, self.service(), signal).await;
        self.reporter.server_stopped();
        outcome
    }
}

impl fmt::Debug for Daemon {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Daemon")
            .field("config", &self.config)
            .field("service", &self.service.name())
            .finish_non_exhaustive()
    }
}

/// Bootstraps the emulator using the supplied collaborators.
///
/// Loads configuration, initialises telemetry, loads the identity registry,
/// and builds the `iam` service. Each failure is reported before it is
/// returned.
///
/// # Errors
///
/// Returns [`BootstrapError`] naming the stage that failed.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let registry = match StaticRegistry::from_path(config.registry_path()) {
        Ok(registry) => registry,
        Err(source) => {
            let error = BootstrapError::Registry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };
    reporter.registry_loaded(registry.user_count(), registry.group_count());

    let service = iam::service(Arc::new(registry), config.account_id());
    reporter.bootstrap_succeeded(&config);

    Ok(Daemon::new(config, Arc::new(service), telemetry, reporter))
}
