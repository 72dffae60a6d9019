use axum::{middleware, routing::get};
use mmt_api::{
    config::ApiConfig,
    metrics::{init_metrics, metrics_handler, track_metrics},
    middleware::{create_cors_layer, request_id_middleware},
    state::ApiState,
    tracing::init_tracing,
};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    init_tracing(&config.env);
    let metrics_handle = init_metrics()?;

    let state = ApiState::new(&config);

    let app = mmt_api::router::router()
        .with_state(state)
        .route("/metrics", get(metrics_handler).with_state(metrics_handle))
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(create_cors_layer(&config.allowed_origins));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, environment = ?config.env, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
