//! Route definitions for the Rações Stock API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Product catalogue with derived stock metrics
        .nest("/racoes", racao_routes())
        // Stock movement ledger
        .nest("/movimentos", movimento_routes())
        // Aggregate totals
        .nest("/dashboard", dashboard_routes())
}

/// Product routes
fn racao_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_racoes).post(handlers::create_racao))
        .route(
            "/:id",
            get(handlers::get_racao)
                .put(handlers::update_racao)
                .delete(handlers::delete_racao),
        )
}

/// Movement routes
fn movimento_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_movimentos).post(handlers::create_movimento),
        )
        .route(
            "/:id",
            get(handlers::get_movimento)
                .put(handlers::update_movimento)
                .delete(handlers::delete_movimento),
        )
}

/// Dashboard routes
fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::get_dashboard))
}
