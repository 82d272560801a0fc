//! Error types for the HTTP transport.

use std::io;
use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

/// Errors surfaced while binding or running the HTTP listener.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured bind address is not a socket address.
    #[error("invalid bind address {address}: {source}")]
    InvalidAddress {
        /// Address as configured.
        address: String,
        /// Parser diagnostic.
        #[source]
        source: AddrParseError,
    },
    /// The TCP listener could not be bound.
    #[error("failed to bind HTTP listener at {address}: {source}")]
    Bind {
        /// Address the bind was attempted on.
        address: SocketAddr,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
    /// The server loop stopped with an error.
    #[error("HTTP server failed: {source}")]
    Serve {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
