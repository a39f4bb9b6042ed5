//! HTTP handlers for unit-of-measure endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::unit::{UnitInput, UnitService};
use crate::AppState;
use shared::models::UnitOfMeasure;

/// Create a unit of measure
pub async fn create_unit(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<UnitInput>,
) -> AppResult<(StatusCode, Json<UnitOfMeasure>)> {
    let service = UnitService::new(state.db);
    let unit = service.create_unit(input).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

/// Rename a unit of measure
pub async fn rename_unit(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(unit_id): Path<Uuid>,
    Json(input): Json<UnitInput>,
) -> AppResult<Json<UnitOfMeasure>> {
    let service = UnitService::new(state.db);
    let unit = service.rename_unit(unit_id, input).await?;
    Ok(Json(unit))
}

/// List all units of measure
pub async fn list_units(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<UnitOfMeasure>>> {
    let service = UnitService::new(state.db);
    let units = service.list_units().await?;
    Ok(Json(units))
}
