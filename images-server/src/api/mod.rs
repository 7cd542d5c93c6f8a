//! HTTP API: the four routes and the fallback for everything else.

pub mod export;
pub mod image;
pub mod index;
pub mod result;
pub mod routes;

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use images_common::protocol::{ROUTE_EXPORT, ROUTE_IMAGE, ROUTE_INDEX, ROUTE_RESULT};

use crate::state::AppState;

/// Build the API router.
///
/// Paths match exactly. A known path hit with the other verb falls through
/// to the same fallback as an unknown path.
pub fn router(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(ROUTE_INDEX, get(index::index).fallback(routes::unmatched))
        .route(ROUTE_IMAGE, get(image::fetch).fallback(routes::unmatched))
        .route(
            ROUTE_RESULT,
            post(result::ingest)
                .fallback(routes::unmatched)
                .layer(middleware::from_fn_with_state(Arc::clone(state), routes::read_deadline)),
        )
        .route(ROUTE_EXPORT, post(export::export).fallback(routes::unmatched))
        .fallback(routes::unmatched)
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        .layer(middleware::from_fn(routes::reject_unsupported_methods))
}

/// 200 with `data` as a chunked body.
pub(crate) fn streamed(state: &AppState, content_type: &'static str, data: impl Into<Bytes>) -> Response {
    let source = Cursor::new(data.into());
    ([(CONTENT_TYPE, content_type)], state.streamer.body(Some(source))).into_response()
}
