use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Extension, Json};

use stockwise_inventory::{MovementLog, normalize_movements};
use stockwise_products::normalize_products;
use stockwise_reporting::{DashboardSummary, normalize_groups};

use crate::app::dto::DashboardRequest;
use crate::app::errors::{json_body, json_error};
use crate::app::services::AppServices;

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<DashboardSummary>, Response> {
    let req: DashboardRequest = serde_json::from_value(json_body(payload)?)
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_request", e.to_string()))?;

    let products = normalize_products(&req.products);
    let groups = normalize_groups(&req.monthly_movements);
    let log: MovementLog = normalize_movements(&req.movements).into_iter().collect();

    Ok(Json(DashboardSummary::build(
        &products,
        &groups,
        &log,
        &services.classifier,
        services.now(),
    )))
}
