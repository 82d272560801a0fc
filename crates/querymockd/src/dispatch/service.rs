//! The dispatch service driving resolve, decode, invoke, and render.

use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use super::DISPATCH_TARGET;
use super::errors::ServiceError;
use super::request::{CONTENT_TYPE_PLAIN, CONTENT_TYPE_XML, QueryRequest, QueryResponse};
use crate::apiset::{ApiSet, OperationContext, OperationHandler};
use crate::envelope;
use crate::fault::{Fault, SenderFault};

const INTERNAL_ERROR_BODY: &str = "Internal server error";

/// API sets served under one service name.
///
/// Populated before the listener starts and only read afterwards, so a
/// shared reference can serve concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct Service {
    name: String,
    api_sets: Vec<ApiSet>,
}

impl Service {
    /// Creates a service with no API sets.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_sets: Vec::new(),
        }
    }

    /// Service name reported to operations.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends an API set; earlier sets are searched first.
    pub fn add_api_set(&mut self, api_set: ApiSet) {
        self.api_sets.push(api_set);
    }

    /// Registered API sets in search order.
    #[must_use]
    pub fn api_sets(&self) -> &[ApiSet] {
        &self.api_sets
    }

    /// Resolves `action` within the API sets declaring exactly `version`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidAction` fault naming the action and version when
    /// no matching set registers the action.
    pub fn resolve(
        &self,
        action: &str,
        version: &str,
    ) -> Result<(&ApiSet, &Arc<dyn OperationHandler>), SenderFault> {
        self.api_sets
            .iter()
            .filter(|api_set| api_set.version() == version)
            .find_map(|api_set| api_set.lookup(action).map(|handler| (api_set, handler)))
            .ok_or_else(|| SenderFault::invalid_action(action, version))
    }

    /// Serves `request` under a freshly generated request identifier.
    #[must_use]
    pub fn handle(&self, request: &QueryRequest) -> QueryResponse {
        let request_id = Uuid::new_v4().to_string();
        self.handle_with_request_id(request, &request_id)
    }

    /// Serves `request`, tagging the response with `request_id`.
    #[must_use]
    pub fn handle_with_request_id(&self, request: &QueryRequest, request_id: &str) -> QueryResponse {
        let outcome = match self.render(request, request_id) {
            Ok(response) => Ok(response),
            Err(failure) => match failure.into_fault() {
                Ok(fault) => self.render_fault(&fault, request_id),
                Err(internal) => Err(internal),
            },
        };
        outcome.unwrap_or_else(|failure| internal_error(request, request_id, &failure))
    }

    fn render(
        &self,
        request: &QueryRequest,
        request_id: &str,
    ) -> Result<QueryResponse, ServiceError> {
        let params = request.form();
        let action = params.get("Action").unwrap_or_default();
        let version = params.get("Version").unwrap_or_default();
        debug!(
            target: DISPATCH_TARGET,
            action,
            version,
            request_id,
            "dispatching query request"
        );

        let (api_set, handler) = self.resolve(action, version)?;
        let decoded = handler.decode_params(&params)?;
        let context = OperationContext {
            service: self.name.clone(),
            version: api_set.version().to_owned(),
            operation: action.to_owned(),
            method: request.method().to_owned(),
            path: request.path().to_owned(),
            request_id: request_id.to_owned(),
        };
        let result = handler.invoke(&context, decoded)?;
        let body = envelope::success_document(action, api_set.namespace(), request_id, &result)
            .to_bytes()?;
        Ok(QueryResponse::new(200, request_id, CONTENT_TYPE_XML, body))
    }

    fn render_fault(
        &self,
        fault: &SenderFault,
        request_id: &str,
    ) -> Result<QueryResponse, ServiceError> {
        info!(
            target: DISPATCH_TARGET,
            service = %self.name,
            request_id,
            code = fault.code(),
            message = fault.message(),
            "request rejected with sender fault"
        );
        let body = envelope::fault_document(request_id, fault).to_bytes()?;
        Ok(QueryResponse::new(400, request_id, CONTENT_TYPE_XML, body))
    }
}

fn internal_error(request: &QueryRequest, request_id: &str, failure: &ServiceError) -> QueryResponse {
    error!(
        target: DISPATCH_TARGET,
        request_id,
        url = %request.url(),
        error = %failure,
        "request failed with internal error"
    );
    QueryResponse::new(
        500,
        request_id,
        CONTENT_TYPE_PLAIN,
        INTERNAL_ERROR_BODY.as_bytes().to_vec(),
    )
}
