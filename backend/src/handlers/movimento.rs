//! HTTP handlers for stock movement endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{validar_movimento, Movimento, MovimentoPayload};

use crate::error::AppResult;
use crate::services::movimento::MovimentoService;
use crate::AppState;

use super::{CreatedBody, StatusBody};

/// List the newest movements, capped at 200 rows
pub async fn list_movimentos(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Movimento>>> {
    let service = MovimentoService::new(state.db);
    let movimentos = service.list().await?;
    Ok(Json(movimentos))
}

/// Get a single movement by id
pub async fn get_movimento(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Movimento>> {
    let service = MovimentoService::new(state.db);
    let movimento = service.get(id).await?;
    Ok(Json(movimento))
}

/// Create a movement
pub async fn create_movimento(
    State(state): State<AppState>,
    Json(payload): Json<MovimentoPayload>,
) -> AppResult<(StatusCode, Json<CreatedBody>)> {
    let novo = validar_movimento(&payload)?;
    let service = MovimentoService::new(state.db);
    let id = service.create(novo).await?;
    Ok((StatusCode::CREATED, Json(CreatedBody { status: "ok", id })))
}

/// Update a movement
pub async fn update_movimento(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MovimentoPayload>,
) -> AppResult<Json<StatusBody>> {
    let novo = validar_movimento(&payload)?;
    let service = MovimentoService::new(state.db);
    service.update(id, novo).await?;
    Ok(Json(StatusBody { status: "ok" }))
}

/// Delete a movement
pub async fn delete_movimento(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StatusBody>> {
    let service = MovimentoService::new(state.db);
    service.delete(id).await?;
    Ok(Json(StatusBody { status: "ok" }))
}
