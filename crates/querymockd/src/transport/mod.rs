//! HTTP transport for the dispatch service.
//!
//! Every method and path reaches the same fallback handler, which reduces the
//! request to a [`QueryRequest`] and answers with whatever the service
//! renders.

mod errors;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::Response;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

pub use self::errors::TransportError;
use crate::dispatch::{QueryRequest, QueryResponse, Service};

/// Tracing target for transport events.
pub const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// Builds a router sending every request to `service`.
pub fn router(service: Arc<Service>) -> Router {
    Router::new().fallback(handle).with_state(service)
}

/// Parses `address` and binds a TCP listener on it.
///
/// # Errors
///
/// Returns [`TransportError::InvalidAddress`] or [`TransportError::Bind`].
pub async fn bind(address: &str) -> Result<TcpListener, TransportError> {
    let parsed: SocketAddr = address
        .parse()
        .map_err(|source| TransportError::InvalidAddress {
            address: address.to_owned(),
            source,
        })?;
    TcpListener::bind(parsed)
        .await
        .map_err(|source| TransportError::Bind {
            address: parsed,
            source,
        })
}

/// Serves `service` on `listener` until `signal` resolves.
///
/// In-flight requests complete before the future returns.
///
/// # Errors
///
/// Returns [`TransportError::Serve`] when the server loop fails.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    service: Arc<Service>,
    signal: F,
) -> Result<(), TransportError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(address) = listener.local_addr() {
        info!(target: TRANSPORT_TARGET, address = %address, "serving query requests");
    }
    axum::serve(listener, router(service))
        .with_graceful_shutdown(signal)
        .await
        .map_err(|source| TransportError::Serve { source })
}

/// Resolves when the process receives Ctrl-C.
///
/// If the signal handler cannot be installed the future never resolves.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(target: TRANSPORT_TARGET, "shutdown signal received"),
        Err(error) => {
            warn!(
                target: TRANSPORT_TARGET,
                error = %error,
                "failed to listen for shutdown signal"
            );
            std::future::pending::<()>().await;
        }
    }
}

async fn handle(
    State(service): State<Arc<Service>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let request = QueryRequest::new(method.as_str(), uri.path())
        .with_query(uri.query())
        .with_content_type(content_type)
        .with_body(body.to_vec());
    let response = service.handle(&request);
    debug!(
        target: TRANSPORT_TARGET,
        method = %method,
        path = uri.path(),
        status = response.status(),
        "request served"
    );
    into_http(response)
}

fn into_http(response: QueryResponse) -> Response {
    let (status, headers, body) = response.into_parts();
    let mut http = Response::new(Body::from(body));
    *http.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    for (name, value) in headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                http.headers_mut().insert(name, value);
            }
            _ => warn!(
                target: TRANSPORT_TARGET,
                header = %name,
                "dropping response header that is not valid HTTP"
            ),
        }
    }
    http
}
