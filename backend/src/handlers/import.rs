//! HTTP handler for bulk spreadsheet import

use axum::{body::Bytes, extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::import::{ImportReport, ImportService};
use crate::AppState;

/// Import incoming movements from an uploaded CSV document.
/// The request body is the raw file content.
pub async fn import_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
    body: Bytes,
) -> AppResult<Json<ImportReport>> {
    if body.is_empty() {
        return Err(AppError::MissingRequiredField("file".to_string()));
    }

    tracing::info!(
        user = %current_user.0.email,
        bytes = body.len(),
        "Received bulk import upload"
    );

    let service = ImportService::new(state.db);
    let report = service.import_incoming_csv(&body).await?;
    Ok(Json(report))
}
