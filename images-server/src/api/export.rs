//! POST /export - write every stored label to the export file.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use images_common::ResponseStatus;

use crate::error::{status_code, Result};
use crate::state::AppState;

pub async fn export(State(state): State<Arc<AppState>>) -> Result<StatusCode> {
    let labels = state.results.snapshot();
    let exporter = Arc::clone(&state.exporter);

    let report = tokio::task::spawn_blocking(move || exporter.export(&labels)).await??;
    tracing::info!(
        rows = report.rows,
        path = %report.destination.display(),
        "Exported results"
    );

    Ok(status_code(ResponseStatus::NoContent))
}
