use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};

use stockwise_products::{export_csv, normalize_products};
use stockwise_reporting::ProductPage;

use crate::app::dto::{ProductQueryRequest, ProductStatusLine};
use crate::app::errors::{domain_error_to_response, export_error_to_response, json_body, json_error};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/statuses", post(statuses))
        .route("/query", post(query))
        .route("/export-csv", post(export))
}

pub async fn statuses(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Vec<ProductStatusLine>>, Response> {
    let products = normalize_products(&json_body(payload)?);
    let now = services.now();

    let lines = products
        .into_iter()
        .map(|p| ProductStatusLine {
            status: services.classifier.classify_product_at(&p, now),
            id: p.id,
            sku: p.sku,
        })
        .collect();

    Ok(Json(lines))
}

pub async fn query(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ProductPage>, Response> {
    let req: ProductQueryRequest = serde_json::from_value(json_body(payload)?)
        .map_err(|e| json_error(StatusCode::BAD_REQUEST, "invalid_request", e.to_string()))?;
    let query = req.to_query().map_err(domain_error_to_response)?;
    let products = normalize_products(&req.products);

    Ok(Json(query.run(&products, &services.classifier, services.now())))
}

pub async fn export(payload: Result<Json<serde_json::Value>, JsonRejection>) -> Result<Response, Response> {
    let products = normalize_products(&json_body(payload)?);
    let csv = export_csv(&products).map_err(export_error_to_response)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"products.csv\""),
        ],
        csv,
    )
        .into_response())
}
