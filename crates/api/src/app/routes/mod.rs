use axum::{Router, routing::post};

pub mod dashboard;
pub mod products;
pub mod reports;
pub mod status;
pub mod system;

/// Router for all computed-field endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/status/classify", post(status::classify))
        .route("/dashboard", post(dashboard::summary))
        .nest("/products", products::router())
        .nest("/reports", reports::router())
}
