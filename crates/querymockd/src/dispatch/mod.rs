//! Query request dispatch.
//!
//! The dispatch service reads `Action` and `Version` from the request form,
//! resolves them to a registered operation, decodes the operation's
//! parameters, invokes it, and renders either the success envelope or the
//! fault document. Every response carries a fresh request identifier in the
//! `x-amzn-RequestId` header.
//!
//! ## Status mapping
//!
//! | outcome | status | body |
//! | --- | --- | --- |
//! | success | 200 | `<{Action}Response>` envelope |
//! | sender fault | 400 | `ErrorResponse` document |
//! | anything else | 500 | `Internal server error` |

mod errors;
mod request;
mod service;

pub use self::errors::ServiceError;
pub use self::request::{
    CONTENT_TYPE_FORM, CONTENT_TYPE_PLAIN, CONTENT_TYPE_XML, QueryRequest, QueryResponse,
    REQUEST_ID_HEADER,
};
pub use self::service::Service;

/// Tracing target for dispatch operations.
pub const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

#[cfg(test)]
mod tests;
