use axum::{extract::State, Json};
use common::types::ApiResponse;
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// 转发到固定的第三方接口，原样返回其 JSON
#[utoipa::path(
    get, path = "/api/external-data", tag = "external",
    responses(
        (status = 200, description = "External data fetched"),
        (status = 500, description = "Error fetching external data", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn external_data(State(state): State<ServerState>) -> Result<Json<ApiResponse<serde_json::Value>>, JsonApiError> {
    let data = state.external.fetch().await?;
    info!(url = %state.external.url(), "relayed external data");
    Ok(Json(ApiResponse::ok("External data fetched", data)))
}
