//! GET /image - encode one dataset image.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use images_common::ImageQuery;

use super::streamed;
use crate::error::{Error, Result};
use crate::state::AppState;

/// Both parameters are validated together; the error does not say which
/// one was wrong.
pub async fn fetch(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<ImageQuery>, QueryRejection>,
) -> Result<Response> {
    let (id, format) = query
        .ok()
        .and_then(|Query(query)| query.resolve())
        .ok_or_else(|| Error::BadRequest("Wrong parameters".to_string()))?;

    tracing::debug!(image_id = %id, format = %format, "Encoding image");

    let codec_state = Arc::clone(&state);
    let encoded = tokio::task::spawn_blocking(move || {
        codec_state
            .codec
            .encode(codec_state.dataset.image(id), format)
    })
    .await??;

    Ok(streamed(&state, format.mime_type(), encoded))
}
