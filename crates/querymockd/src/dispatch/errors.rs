//! Error types for request dispatch failures.

use thiserror::Error;

use crate::fault::SenderFault;
use crate::registry::RegistryError;
use crate::xml::EncodeError;

/// Failure raised while serving a query request.
///
/// Only [`ServiceError::Fault`] reaches the client verbatim; every other
/// variant is answered with a generic internal error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A caller-caused fault rendered with HTTP 400.
    #[error(transparent)]
    Fault(#[from] SenderFault),

    /// The identity registry failed.
    #[error("identity registry failed: {0}")]
    Registry(#[from] RegistryError),

    /// The response document could not be serialised.
    #[error("failed to encode response: {0}")]
    Encode(#[from] EncodeError),
}

impl ServiceError {
    /// Splits sender faults from internal errors.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when it is not a sender fault.
    pub fn into_fault(self) -> Result<SenderFault, Self> {
        match self {
            Self::Fault(fault) => Ok(fault),
            other => Err(other),
        }
    }

    /// Returns the sender fault when this error is one.
    #[must_use]
    pub const fn as_fault(&self) -> Option<&SenderFault> {
        match self {
            Self::Fault(fault) => Some(fault),
            Self::Registry(_) | Self::Encode(_) => None,
        }
    }
}
