//! Crate-level tests for `querymock_codec`.
