//! Errors raised by identity registries.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failure to load or query an identity registry.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file '{path}': {source}")]
    Read {
        /// File that failed to read.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The registry document is not valid YAML of the expected shape.
    #[error("failed to parse registry document: {message}")]
    Parse {
        /// Parser diagnostic.
        message: String,
    },

    /// A group lists a member that is not a known user.
    #[error("unknown user {user} among the members of {group}")]
    UnknownMember {
        /// Member name that did not resolve.
        user: String,
        /// Group declaring the member.
        group: String,
    },

    /// The backing store could not answer.
    #[error("identity registry unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

impl RegistryError {
    /// Creates a read error for `path`.
    pub fn read(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
