//! POST /result - store one predicted label.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use images_common::{ResponseStatus, ResultSubmission};

use crate::error::{status_code, Error, Result};
use crate::state::AppState;

pub async fn ingest(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<StatusCode> {
    let body = body.map_err(|e| Error::BadRequest(format!("cannot read result body: {e}")))?;
    let submission = ResultSubmission::from_slice(&body)
        .map_err(|e| Error::BadRequest(format!("invalid result body: {e}")))?;

    let previous = state.results.record(submission.image_id, submission.label);
    tracing::info!(
        image_id = %submission.image_id,
        label = submission.label,
        previous,
        "Stored result"
    );

    Ok(status_code(ResponseStatus::NoContent))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use images_common::{ImageId, DEFAULT_LABEL};
    use tower::ServiceExt;

    use super::*;
    use crate::api::{router, test_support};

    async fn post(state: &Arc<AppState>, body: impl Into<Vec<u8>>) -> StatusCode {
        router(state)
            .with_state(Arc::clone(state))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/result")
                    .header("content-type", "application/json")
                    .body(Body::from(body.into()))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_stores_label() {
        let state = test_support::state();
        assert_eq!(post(&state, br#"{"ImageID": 5, "result": 7}"#).await, StatusCode::NO_CONTENT);
        assert_eq!(state.results.get(ImageId::new(5).unwrap()), 7);
        assert_eq!(state.results.get(ImageId::new(4).unwrap()), DEFAULT_LABEL);
    }

    #[tokio::test]
    async fn test_rejects_malformed_bodies_without_writing() {
        let state = test_support::state();
        let bodies: [&[u8]; 6] = [
            b"",
            b"{",
            br#"{"ImageID": 28000, "result": 7}"#,
            br#"{"ImageID": 5}"#,
            br#"{"ImageID": 5, "result": "7"}"#,
            br#"{"ImageID": 5, "result": 7, "score": 0.9}"#,
        ];
        for body in bodies {
            assert_eq!(post(&state, body).await, StatusCode::BAD_REQUEST);
        }
        assert!(state.results.snapshot().iter().all(|&l| l == DEFAULT_LABEL));
    }

    #[tokio::test]
    async fn test_body_over_limit() {
        let state = test_support::state();
        let padded = format!(r#"{{"ImageID": 5, "result": 7{}}}"#, " ".repeat(8192));
        assert_eq!(post(&state, padded).await, StatusCode::BAD_REQUEST);
        assert_eq!(state.results.get(ImageId::new(5).unwrap()), DEFAULT_LABEL);
    }
}
