use axum::{
    routing::get,
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod accounts;
pub mod external;

/// (method, path) pairs served under `/api`, logged at startup.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/api/accounts"),
    ("GET", "/api/accounts/:id"),
    ("POST", "/api/accounts"),
    ("PUT", "/api/accounts/:id"),
    ("DELETE", "/api/accounts/:id"),
    ("GET", "/api/external-data"),
    ("GET", "/api/health"),
    ("GET", "/api/openapi.json"),
];

#[utoipa::path(
    get, path = "/api/health", tag = "health",
    responses((status = 200, description = "Backend server is running", body = crate::openapi::HealthResponseDoc))
)]
pub async fn health() -> Json<Health> {
    Json(Health::now())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/accounts", get(accounts::list_accounts).post(accounts::create_account))
        .route(
            "/api/accounts/:id",
            get(accounts::get_account)
                .put(accounts::update_account)
                .delete(accounts::delete_account),
        )
        .route("/api/external-data", get(external::external_data))
        .route("/api/health", get(health))
        .route("/api/openapi.json", get(openapi_json));

    api.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时记录状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
