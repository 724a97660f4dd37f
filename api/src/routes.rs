use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{HistoricalError, HistoricalService, PriceSeries, Transport};
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Debug, Deserialize)]
pub struct HistoricalQuery {
    interval: Option<String>,
}

pub fn router<T: Transport + 'static>(service: HistoricalService<T>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/historical/gdax", get(historical_gdax::<T>))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(service))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn historical_gdax<T: Transport + 'static>(
    State(service): State<Arc<HistoricalService<T>>>,
    Query(query): Query<HistoricalQuery>,
) -> Result<Json<PriceSeries>, ApiError> {
    let interval = query.interval.unwrap_or_default();
    let series = service.get_historical_series(&interval).await?;
    Ok(Json(series))
}

/// Renders a [`HistoricalError`] with its own status code, or 500.
pub struct ApiError(HistoricalError);

impl From<HistoricalError> for ApiError {
    fn from(err: HistoricalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self
            .0
            .status_code()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Historical request failed: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
