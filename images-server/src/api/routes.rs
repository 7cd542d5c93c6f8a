//! Request guards and the fallback for paths and verbs without a handler.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{Method, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::{Error, Result};
use crate::state::AppState;

/// Anything but GET and POST is answered with 501 before routing.
pub async fn reject_unsupported_methods(request: Request, next: Next) -> Response {
    match *request.method() {
        Method::GET | Method::POST => next.run(request).await,
        ref method => Error::NotImplemented(format!("unsupported method {method}")).into_response(),
    }
}

/// Bounds the time a request may take to arrive, body included.
pub async fn read_deadline(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let limit = state.read_timeout();
    tokio::time::timeout(limit, next.run(request))
        .await
        .map_err(|_| Error::BadRequest(format!("request body not received within {limit:?}")))
}

/// Fallback for unknown paths and for known paths hit with the other verb.
pub async fn unmatched(method: Method, uri: Uri) -> Error {
    let path = uri.path();
    if method == Method::POST && path.ends_with('/') {
        Error::MethodNotAllowed(format!("POST {path} has a trailing slash"))
    } else {
        Error::NotFound(format!("{method} {path}"))
    }
}
