use stockwise_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockwise_observability::init();

    let config = ApiConfig::from_env();
    let app = stockwise_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        dead_stock_days = config.dead_stock_days,
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
