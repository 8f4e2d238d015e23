//! HTTP handlers for product endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{validar_racao, RacaoComMetricas, RacaoPayload};

use crate::error::AppResult;
use crate::services::racao::RacaoService;
use crate::AppState;

use super::{CreatedBody, StatusBody};

/// List all products with their derived stock metrics
pub async fn list_racoes(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RacaoComMetricas>>> {
    let service = RacaoService::new(state.db);
    let racoes = service.list().await?;
    Ok(Json(racoes))
}

/// Get a single product by id
pub async fn get_racao(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RacaoComMetricas>> {
    let service = RacaoService::new(state.db);
    let racao = service.get(id).await?;
    Ok(Json(racao))
}

/// Create a product
pub async fn create_racao(
    State(state): State<AppState>,
    Json(payload): Json<RacaoPayload>,
) -> AppResult<(StatusCode, Json<CreatedBody>)> {
    let nova = validar_racao(&payload)?;
    let service = RacaoService::new(state.db);
    let id = service.create(nova).await?;
    Ok((StatusCode::CREATED, Json(CreatedBody { status: "ok", id })))
}

/// Update a product
pub async fn update_racao(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RacaoPayload>,
) -> AppResult<Json<StatusBody>> {
    let nova = validar_racao(&payload)?;
    let service = RacaoService::new(state.db);
    service.update(id, nova).await?;
    Ok(Json(StatusBody { status: "ok" }))
}

/// Delete a product with no movements referencing it
pub async fn delete_racao(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StatusBody>> {
    let service = RacaoService::new(state.db);
    service.delete(id).await?;
    Ok(Json(StatusBody { status: "ok" }))
}
