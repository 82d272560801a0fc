//! Client-caused faults and their wire codes.
//!
//! A fault is a value created where a request goes wrong and consumed once by
//! the response renderer. Every fault raised by the emulator is a sender fault
//! answered with HTTP 400.

use std::fmt;

use thiserror::Error;

/// Namespace of the `ErrorResponse` root element.
pub const FAULT_NAMESPACE: &str = "http://webservices.amazon.com/AWSFault/2005-15-09";

/// Fault type reported for caller-caused errors.
pub const SENDER_FAULT_KIND: &str = "Sender";

/// Version token reported when a request omits `Version`.
pub const NO_VERSION_SPECIFIED: &str = "NO_VERSION_SPECIFIED";

/// Read-only view of a fault as rendered to clients.
pub trait Fault: fmt::Debug + Send + Sync {
    /// Fault type, such as `Sender`.
    fn kind(&self) -> &str;

    /// Short machine-readable code.
    fn code(&self) -> &str;

    /// Human-readable detail.
    fn message(&self) -> &str;
}

/// Codes carried by sender faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultCode {
    /// A parameter the operation needs was not supplied.
    MissingParameter,
    /// The named entity does not exist.
    NoSuchEntity,
    /// No operation matches the requested action and version.
    InvalidAction,
    /// A parameter failed to decode.
    InvalidParameterValue,
}

impl FaultCode {
    /// Wire token for the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingParameter => "MissingParameter",
            Self::NoSuchEntity => "NoSuchEntity",
            Self::InvalidAction => "InvalidAction",
            Self::InvalidParameterValue => "InvalidParameterValue",
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A caller-caused fault with fixed kind `Sender`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sender fault {code}: {message}")]
pub struct SenderFault {
    code: FaultCode,
    message: String,
}

impl SenderFault {
    /// Creates a fault from a code and message.
    #[must_use]
    pub fn new(code: FaultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The `parameter` was required but absent.
    #[must_use]
    pub fn missing_parameter(parameter: impl Into<String>) -> Self {
        Self::new(FaultCode::MissingParameter, parameter)
    }

    /// A looked-up entity does not exist.
    #[must_use]
    pub fn no_such_entity(message: impl Into<String>) -> Self {
        Self::new(FaultCode::NoSuchEntity, message)
    }

    /// No operation named `action` exists for `version`.
    ///
    /// An empty version is reported as [`NO_VERSION_SPECIFIED`].
    #[must_use]
    pub fn invalid_action(action: &str, version: &str) -> Self {
        let reported = if version.is_empty() {
            NO_VERSION_SPECIFIED
        } else {
            version
        };
        Self::new(
            FaultCode::InvalidAction,
            format!("Could not find operation {action} for version {reported}"),
        )
    }

    /// Parameters failed to decode. The message never carries the cause.
    #[must_use]
    pub fn invalid_parameter_value() -> Self {
        Self::new(FaultCode::InvalidParameterValue, "invalid parameter")
    }

    /// Code of the fault.
    #[must_use]
    pub const fn fault_code(&self) -> FaultCode {
        self.code
    }
}

impl Fault for SenderFault {
    fn kind(&self) -> &str {
        SENDER_FAULT_KIND
    }

    fn code(&self) -> &str {
        self.code.as_str()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn sender_faults_report_sender_kind() {
        let fault = SenderFault::missing_parameter("UserName");
        assert_eq!(fault.kind(), "Sender");
        assert_eq!(fault.code(), "MissingParameter");
        assert_eq!(fault.message(), "UserName");
    }

    #[rstest]
    #[case("2010-05-08", "Could not find operation Bogus for version 2010-05-08")]
    #[case("", "Could not find operation Bogus for version NO_VERSION_SPECIFIED")]
    fn invalid_action_names_action_and_version(#[case] version: &str, #[case] expected: &str) {
        let fault = SenderFault::invalid_action("Bogus", version);
        assert_eq!(fault.fault_code(), FaultCode::InvalidAction);
        assert_eq!(fault.message(), expected);
    }

    #[test]
    fn invalid_parameter_value_hides_the_cause() {
        let fault = SenderFault::invalid_parameter_value();
        assert_eq!(fault.code(), "InvalidParameterValue");
        assert_eq!(fault.message(), "invalid parameter");
    }
}
