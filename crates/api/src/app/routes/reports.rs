use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};

use stockwise_inventory::{MovementLog, normalize_movements};
use stockwise_products::normalize_products;
use stockwise_reporting::{
    CategoryBucket, LowStockReport, MonthlyReport, MovementReport, StockValueReport, category_buckets, group_movements,
    normalize_groups,
};

use crate::app::dto::MovementReportRequest;
use crate::app::errors::{json_body, json_error};

pub fn router() -> Router {
    Router::new()
        .route("/monthly", post(monthly))
        .route("/movements", post(movements))
        .route("/movements/monthly", post(movements_monthly))
        .route("/by-category", post(by_category))
        .route("/stock-value", post(stock_value))
        .route("/low-stock", post(low_stock))
}

/// Pre-grouped `{ _id: { year, month, type }, totalQuantity }` rows.
pub async fn monthly(payload: Result<Json<serde_json::Value>, JsonRejection>) -> Result<Json<MonthlyReport>, Response> {
    let groups = normalize_groups(&json_body(payload)?);
    Ok(Json(MonthlyReport::from_groups(&groups)))
}

/// Filtered movement list with its totals.
pub async fn movements(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<MovementReport>, Response> {
    let req = MovementReportRequest::from_json(json_body(payload)?)
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_filter", e.to_string()))?;

    let log: MovementLog = normalize_movements(&req.movements).into_iter().collect();
    Ok(Json(MovementReport::build(&log, &req.filter)))
}

/// Raw movement records, grouped here before pivoting.
pub async fn movements_monthly(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<MonthlyReport>, Response> {
    let req = MovementReportRequest::from_json(json_body(payload)?)
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_filter", e.to_string()))?;

    let log: MovementLog = normalize_movements(&req.movements).into_iter().collect();
    let selected: Vec<_> = log.filtered(&req.filter).into_iter().cloned().collect();
    tracing::debug!(total = log.len(), selected = selected.len(), "movement report");

    Ok(Json(MonthlyReport::from_groups(&group_movements(&selected))))
}

pub async fn by_category(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Vec<CategoryBucket>>, Response> {
    let products = normalize_products(&json_body(payload)?);
    Ok(Json(category_buckets(&products)))
}

pub async fn stock_value(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<StockValueReport>, Response> {
    let products = normalize_products(&json_body(payload)?);
    Ok(Json(StockValueReport::build(&products)))
}

pub async fn low_stock(payload: Result<Json<serde_json::Value>, JsonRejection>) -> Result<Json<LowStockReport>, Response> {
    let products = normalize_products(&json_body(payload)?);
    Ok(Json(LowStockReport::build(&products)))
}
