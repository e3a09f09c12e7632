use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use server_api::ApiContext;
use shared::{
    domain::{Product, ProductId},
    error::{ApiError, ErrorCode},
    protocol::IntroMessage,
};
use storage::Storage;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, prepare_database_url};

const MAX_BODY_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let state = AppState {
        api: ApiContext { storage },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "catalog server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("catalog server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to install ctrl-c handler");
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(intro))
        .route("/healthz", get(healthz))
        .route(
            server_api::products_route(),
            get(http_list_products).post(http_create_product),
        )
        .route(
            server_api::product_route(),
            get(http_get_product)
                .put(http_update_product)
                .delete(http_delete_product),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(err.code), Json(err))
}

async fn intro() -> Json<IntroMessage> {
    Json(IntroMessage::default())
}

async fn healthz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    server_api::health(&state.api).await.map_err(reject)?;
    Ok("ok")
}

async fn http_list_products(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Product>>> {
    let products = server_api::list_products(&state.api)
        .await
        .map_err(reject)?;
    Ok(Json(products))
}

async fn http_get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Product>> {
    let product = server_api::get_product(&state.api, ProductId(id))
        .await
        .map_err(reject)?;
    Ok(Json(product))
}

async fn http_create_product(
    State(state): State<Arc<AppState>>,
    Json(product): Json<Product>,
) -> ApiResult<Json<Product>> {
    let created = server_api::create_product(&state.api, product)
        .await
        .map_err(reject)?;
    Ok(Json(created))
}

async fn http_update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(product): Json<Product>,
) -> ApiResult<Json<Product>> {
    let updated = server_api::update_product(&state.api, ProductId(id), product)
        .await
        .map_err(reject)?;
    Ok(Json(updated))
}

async fn http_delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    server_api::delete_product(&state.api, ProductId(id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
