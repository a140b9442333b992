use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router, ServiceExt,
};
use roost_common::{logging, method_override};
use roost_config::load_config;
use roost_db::DbClient;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

mod app_state;

#[axum::debug_handler]
async fn health(State(db): State<DbClient>) -> impl IntoResponse {
    if db.is_healthy().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(load_config()?);
    logging::init_with_level(logging::parse_level(&config.logging.level));

    let db_client = DbClient::new(&config).await?;
    let listings_state = app_state::build_listings_state(config.clone(), db_client.clone()).await?;

    let app = Router::new()
        .route("/", get(|| async { Redirect::to("/listings") }))
        .route("/health", get(health))
        .with_state(db_client)
        .merge(roost_listings::app(listings_state))
        .nest_service(
            &config.uploads.public_path,
            ServeDir::new(&config.uploads.dir),
        )
        .layer(TraceLayer::new_for_http());

    // Outside the router, so the rewritten method is what gets routed
    let app = axum::middleware::from_fn(method_override).layer(app);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
