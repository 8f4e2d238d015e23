//! Health check and fallback handlers

use axum::Json;

use crate::error::AppError;

use super::StatusBody;

/// Health check endpoint handler
pub async fn health_check() -> Json<StatusBody> {
    Json(StatusBody { status: "ok" })
}

/// Fallback for paths outside the route table
pub async fn endpoint_nao_encontrado() -> AppError {
    AppError::NotFound("Endpoint não encontrado".to_string())
}
