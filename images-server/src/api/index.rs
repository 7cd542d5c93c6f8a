//! GET / - connectivity check.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;

use super::streamed;
use crate::state::AppState;

const GREETING: &[u8] = b"Connected to server.";

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    streamed(&state, "text/plain", Bytes::from_static(GREETING))
}
