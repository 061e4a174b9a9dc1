//! Event ingestion route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Wire success envelope for `POST /api/log-event`.
#[derive(Debug, Serialize)]
pub struct LogEventResponse {
    pub success: bool,
    pub message: String,
    /// Stored location relative to the logs root
    /// (`<datePartition>/<filename>`).
    pub file: String,
}

/// Accept one tracked interaction and write it to the event log.
///
/// The payload is normalized rather than validated: a structurally
/// malformed body still produces a stored record with sentinel fields, and
/// extra caller-supplied fields are ignored. Only I/O failures surface as
/// errors, and a failure here never affects other in-flight requests.
#[instrument(skip(state, payload))]
pub async fn log_event(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<LogEventResponse>> {
    let persister = state.persister().clone();

    // Filesystem writes run on the blocking pool so a stuck disk stalls
    // only this request, not the async workers.
    let file = tokio::task::spawn_blocking(move || persister.persist(&payload))
        .await
        .map_err(|e| AppError::Internal(format!("persist task aborted: {e}")))??;

    Ok(Json(LogEventResponse {
        success: true,
        message: "Event logged successfully".to_string(),
        file,
    }))
}
