//! HTTP handlers for movement, history and balance endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::export::export_to_csv;
use crate::services::ledger::{LedgerService, RecordMovementInput};
use crate::AppState;
use shared::models::HistoryEntry;

#[derive(Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>, // "json" or "csv"
}

impl ExportQuery {
    fn wants_csv(&self) -> bool {
        self.format.as_deref() == Some("csv")
    }
}

/// Build a CSV download response
fn csv_attachment(filename: &str, csv: String) -> axum::response::Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response()
}

/// Record a stock movement (the administrative form contract)
pub async fn record_movement(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<(StatusCode, Json<HistoryEntry>)> {
    let service = LedgerService::new(state.db);
    let entry = service.record_movement(input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// List the full movement history, optionally as CSV
pub async fn list_movements(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = LedgerService::new(state.db);
    let entries = service.list_history().await?;

    if query.wants_csv() {
        let csv = export_to_csv(&entries)?;
        Ok(csv_attachment("history.csv", csv))
    } else {
        Ok(Json(entries).into_response())
    }
}

/// Get movement history for one product, optionally as CSV
pub async fn get_product_movements(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = LedgerService::new(state.db);
    let entries = service.get_history(product_id).await?;

    if query.wants_csv() {
        let csv = export_to_csv(&entries)?;
        Ok(csv_attachment("movements.csv", csv))
    } else {
        Ok(Json(entries).into_response())
    }
}

/// Get the balance snapshot for one product, optionally as CSV
pub async fn get_balance(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = LedgerService::new(state.db);
    let balance = service.get_balance(product_id).await?;

    if query.wants_csv() {
        let csv = export_to_csv(std::slice::from_ref(&balance))?;
        Ok(csv_attachment("balance.csv", csv))
    } else {
        Ok(Json(balance).into_response())
    }
}

/// List current balances for all products, optionally as CSV
pub async fn list_balances(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = LedgerService::new(state.db);
    let balances = service.list_balances().await?;

    if query.wants_csv() {
        let csv = export_to_csv(&balances)?;
        Ok(csv_attachment("balances.csv", csv))
    } else {
        Ok(Json(balances).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_attachment_headers() {
        let response = csv_attachment("balances.csv", "name,qoldiq\nBolt,70\n".to_string());

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"balances.csv\""
        );
    }

    #[test]
    fn test_export_query_format_switch() {
        assert!(ExportQuery {
            format: Some("csv".to_string())
        }
        .wants_csv());
        assert!(!ExportQuery {
            format: Some("json".to_string())
        }
        .wants_csv());
        assert!(!ExportQuery { format: None }.wants_csv());
    }
}
