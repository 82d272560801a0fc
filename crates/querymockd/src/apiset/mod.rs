//! Operation registry keyed by API version.
//!
//! An API set is built once at start-up, handed to the dispatch service, and
//! only read afterwards.

mod operation;

use std::collections::HashMap;
use std::sync::Arc;

pub use self::operation::{OperationContext, OperationHandler, QueryOperation};

/// Operations served under one API version and response namespace.
#[derive(Debug, Clone)]
pub struct ApiSet {
    version: String,
    namespace: String,
    handlers: HashMap<String, Arc<dyn OperationHandler>>,
}

impl ApiSet {
    /// Creates an empty set for `version`, answering in `namespace`.
    #[must_use]
    pub fn new(version: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            namespace: namespace.into(),
            handlers: HashMap::new(),
        }
    }

    /// Declared API version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Namespace of success responses.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Registers `handler` under its name, replacing any earlier one.
    ///
    /// Returns the handler that was replaced.
    pub fn register<H>(&mut self, handler: H) -> Option<Arc<dyn OperationHandler>>
    where
        H: OperationHandler + 'static,
    {
        let name = handler.name().to_owned();
        self.handlers.insert(name, Arc::new(handler))
    }

    /// Looks up the handler registered as `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn OperationHandler>> {
        self.handlers.get(name)
    }

    /// Number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no operation is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered operation names in ascending order.
    #[must_use]
    pub fn operation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
