mod config;
mod error;
mod places;
mod route;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::http::Method;
use axum::{Router, serve};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use crate::places::places_routes;
use crate::route::route_routes;
use crate::state::AppState;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/route", route_routes())
        .nest("/places", places_routes())
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let state = Arc::new(AppState::from_env()?);
    let bind_addr = state.config.bind_addr.clone();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;

    info!("Listening on {}", bind_addr);

    serve(listener, app(state)).await?;

    Ok(())
}
