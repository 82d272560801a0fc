//! Test harness utilities shared by the daemon suites.

use std::ffi::OsString;
use std::fs;
use std::sync::{Arc, Mutex};

use camino::Utf8PathBuf;
use ortho_config::OrthoError;
use tempfile::TempDir;

use querymock_config::{Config, OrthoConfig};

use crate::bootstrap::{BootstrapError, ConfigLoader};
use crate::health::HealthReporter;

/// Registry served by the test loaders and dispatch scenarios.
pub const TEST_REGISTRY: &str = r"
users:
  - name: alice
    created_at: 2021-06-01T12:00:00Z
  - name: bob
    path: /engineering/
groups:
  - name: admins
    members: [alice]
";

/// Loader writing [`TEST_REGISTRY`] under a temporary directory.
pub struct TestConfigLoader {
    _dir: TempDir,
    registry_path: Utf8PathBuf,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Some(TEST_REGISTRY))
    }

    /// Writes `registry` when given; otherwise points at a missing file.
    #[must_use]
    pub fn with_registry(registry: Option<&str>) -> Self {
        let dir = TempDir::new().expect("failed to create temporary directory");
        let path = dir.path().join("registry.yaml");
        if let Some(text) = registry {
            fs::write(&path, text).expect("failed to write registry file");
        }
        let registry_path =
            Utf8PathBuf::from_path_buf(path).expect("temporary path was not valid UTF-8");
        Self {
            _dir: dir,
            registry_path,
        }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            registry_path: self.registry_path.clone(),
            account_id: "123456789012".to_owned(),
            ..Config::default()
        })
    }
}

/// Loader that fails by passing an unknown CLI flag.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("querymockd"),
            OsString::from("--no-such-flag"),
        ];
        Config::load_from_iter(args)
    }
}

/// Records health events for assertions.
#[derive(Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn registry_loaded(&self, users: usize, groups: usize) {
        self.record(HealthEvent::RegistryLoaded { users, groups });
    }

    fn listener_bound(&self, _address: std::net::SocketAddr) {
        self.record(HealthEvent::ListenerBound);
    }

    fn server_stopped(&self) {
        self.record(HealthEvent::ServerStopped);
    }
}

/// Structured health events tracked during tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    RegistryLoaded { users: usize, groups: usize },
    ListenerBound,
    ServerStopped,
}
