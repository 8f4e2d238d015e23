//! HTTP handler for the dashboard aggregate

use axum::{
    extract::{Query, State},
    Json,
};
use shared::{DashboardTotais, PeriodoConsumo};

use crate::error::AppResult;
use crate::services::dashboard::DashboardService;
use crate::AppState;

/// Aggregate totals for the dashboard cards
///
/// Accepts optional `de` and `ate` query parameters (YYYY-MM-DD) restricting
/// the consumption summary. The stock value and purchase/sale totals always
/// cover the whole history.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(periodo): Query<PeriodoConsumo>,
) -> AppResult<Json<DashboardTotais>> {
    let service = DashboardService::new(state.db);
    let totais = service.totais(periodo).await?;
    Ok(Json(totais))
}
