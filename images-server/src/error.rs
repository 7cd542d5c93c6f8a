//! Error types for request handling.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use images_common::ResponseStatus;
use serde_json::json;

use crate::export::ExportError;

/// Everything that can go wrong while answering a request.
///
/// Each variant maps to exactly one [`ResponseStatus`]; the message is a
/// server-side diagnostic and is logged, never written to the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status(&self) -> ResponseStatus {
        match self {
            Error::BadRequest(_) => ResponseStatus::BadRequest,
            Error::NotFound(_) => ResponseStatus::NotFound,
            Error::MethodNotAllowed(_) => ResponseStatus::MethodNotAllowed,
            Error::NotImplemented(_) => ResponseStatus::NotImplemented,
            Error::Codec(_) | Error::Export(_) | Error::Internal(_) => ResponseStatus::InternalError,
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Internal(format!("blocking task failed: {err}"))
    }
}

/// HTTP status code carried by `status` on the wire.
pub fn status_code(status: ResponseStatus) -> StatusCode {
    match status {
        ResponseStatus::Ok => StatusCode::OK,
        ResponseStatus::Created => StatusCode::CREATED,
        ResponseStatus::NoContent => StatusCode::NO_CONTENT,
        ResponseStatus::BadRequest => StatusCode::BAD_REQUEST,
        ResponseStatus::NotFound => StatusCode::NOT_FOUND,
        ResponseStatus::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ResponseStatus::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        ResponseStatus::NotImplemented => StatusCode::NOT_IMPLEMENTED,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == ResponseStatus::InternalError {
            tracing::error!(status = status.code(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.code(), error = %self, "Request rejected");
        }

        // The body names the status only; the diagnostic stays in the log.
        let body = Json(json!({
            "error": {
                "code": status.code(),
                "message": status.reason()
            }
        }));

        (status_code(status), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
