//! Operation handlers and the context they run in.

use std::fmt;

use querymock_codec::{Decoder, ParamSpace, ProtocolVariant, Schema, Value};

use crate::dispatch::{DISPATCH_TARGET, ServiceError};
use crate::fault::SenderFault;

/// Request facts handed to an operation when it is invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationContext {
    /// Name of the owning service, such as `iam`.
    pub service: String,
    /// API version the request resolved against.
    pub version: String,
    /// Operation name taken from `Action`.
    pub operation: String,
    /// HTTP method of the request.
    pub method: String,
    /// HTTP path of the request.
    pub path: String,
    /// Identifier attached to the response.
    pub request_id: String,
}

/// A named operation able to decode its own parameters and run.
pub trait OperationHandler: fmt::Debug + Send + Sync {
    /// Operation name matched against `Action`.
    fn name(&self) -> &str;

    /// Decodes the operation's parameters from the request form.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidParameterValue` fault when decoding fails.
    fn decode_params(&self, params: &ParamSpace) -> Result<Value, SenderFault>;

    /// Runs the operation over decoded parameters.
    ///
    /// # Errors
    ///
    /// Returns a fault for caller errors or an internal error otherwise.
    fn invoke(&self, context: &OperationContext, params: Value) -> Result<Value, ServiceError>;
}

type InvokeFn = dyn Fn(&OperationContext, Value) -> Result<Value, ServiceError> + Send + Sync;

/// Handler whose parameters decode from a declared schema.
pub struct QueryOperation {
    name: String,
    schema: Schema,
    decoder: Decoder,
    invoke: Box<InvokeFn>,
}

impl QueryOperation {
    /// Builds a handler named `name` decoding `schema` under `variant`.
    pub fn new<F>(name: impl Into<String>, schema: Schema, variant: ProtocolVariant, invoke: F) -> Self
    where
        F: Fn(&OperationContext, Value) -> Result<Value, ServiceError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            schema,
            decoder: Decoder::new(variant),
            invoke: Box::new(invoke),
        }
    }

    /// Parameter schema of the operation.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Protocol variant used to decode parameters.
    #[must_use]
    pub fn variant(&self) -> ProtocolVariant {
        self.decoder.variant()
    }
}

impl fmt::Debug for QueryOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("QueryOperation")
            .field("name", &self.name)
            .field("variant", &self.decoder.variant())
            .finish_non_exhaustive()
    }
}

impl OperationHandler for QueryOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn decode_params(&self, params: &ParamSpace) -> Result<Value, SenderFault> {
        self.decoder.decode(&self.schema, params).map_err(|error| {
            tracing::info!(
                target: DISPATCH_TARGET,
                operation = %self.name,
                path = error.path(),
                error = %error,
                "parameter decoding failed"
            );
            SenderFault::invalid_parameter_value()
        })
    }

    fn invoke(&self, context: &OperationContext, params: Value) -> Result<Value, ServiceError> {
        (self.invoke)(context, params)
    }
}
