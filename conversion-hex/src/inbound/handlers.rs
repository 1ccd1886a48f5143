//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use conversion_types::{AppError, CacheStore, ConvertQuery, RateStore};

use crate::ConversionService;

/// Application state shared across handlers.
pub struct AppState<R: RateStore, C: CacheStore> {
    pub service: ConversionService<R, C>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::Validation(fields) => {
                let body = serde_json::json!({
                    "error": "Validation failed",
                    "code": StatusCode::BAD_REQUEST.as_u16(),
                    "fields": fields,
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            // Not-found is an expected outcome: empty body.
            AppError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            AppError::Internal(msg) => {
                tracing::error!("Conversion failed: {}", msg);
                let body = serde_json::json!({
                    "error": msg,
                    "code": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Get the exchange rate between two currencies with an optional date.
#[tracing::instrument(skip(state))]
pub async fn convert<R: RateStore, C: CacheStore>(
    State(state): State<Arc<AppState<R, C>>>,
    Query(query): Query<ConvertQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.service.convert(&query).await?;
    Ok(Json(result))
}
