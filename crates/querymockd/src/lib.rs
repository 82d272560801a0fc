//! Query protocol API emulator.
//!
//! The daemon accepts form-encoded Query protocol requests over HTTP, resolves
//! `Action` and `Version` to a registered operation, decodes the operation's
//! parameters with [`querymock_codec`], and answers with an XML success
//! envelope or an `ErrorResponse` fault document.
//!
//! The bundled operations emulate the read side of IAM (`GetUser`,
//! `GetGroup`, `ListUsers`, and `ListGroups`) over users and groups loaded
//! from a YAML registry file.
//!
//! Bootstrap loads configuration, installs structured telemetry, loads the
//! registry, and builds the service. Lifecycle events flow through a
//! [`HealthReporter`] so operators can follow start-up in the logs.

pub mod apiset;
mod bootstrap;
pub mod dispatch;
pub mod envelope;
pub mod fault;
mod health;
pub mod iam;
pub mod registry;
pub mod telemetry;
pub mod transport;
pub mod xml;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
