//! Error handling for the Rações Stock API
//!
//! Every failure maps to the JSON body the browser client consumes:
//! `{"error": ..., "fields": [...]?, "details": ...?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ValidationError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload failed the validation step
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Movement write naming a SKU no product carries
    #[error("SKU inválido")]
    SkuInvalido,

    /// Lookup miss, carrying the client-facing message
    #[error("{0}")]
    NotFound(String),

    /// A write the storage layer refused (duplicate SKU, referenced delete)
    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    /// Unexpected database failure
    #[error("Erro interno do servidor")]
    Database(#[from] sqlx::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(err) => {
                let fields = match err {
                    ValidationError::CamposEmFalta { fields } => Some(fields.clone()),
                    _ => None,
                };
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        error: err.to_string(),
                        fields,
                        details: None,
                    },
                )
            }
            AppError::SkuInvalido => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: self.to_string(),
                    fields: None,
                    details: None,
                },
            ),
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: message.clone(),
                    fields: None,
                    details: None,
                },
            ),
            AppError::Storage { message, source } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message.clone(),
                    fields: None,
                    details: Some(source.to_string()),
                },
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: self.to_string(),
                    fields: None,
                    details: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
