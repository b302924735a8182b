use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Extension, Json};

use crate::app::dto::{ClassifyRequest, StatusResponse};
use crate::app::errors::{json_body, json_error};
use crate::app::services::AppServices;

pub async fn classify(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<StatusResponse>, Response> {
    let body = json_body(payload)?;
    let req: ClassifyRequest = serde_json::from_value(body)
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_request", e.to_string()))?;

    let status = services
        .classifier
        .classify_at(req.quantity, req.low_stock_threshold, req.last_sold_at, services.now());

    Ok(Json(StatusResponse { status }))
}
