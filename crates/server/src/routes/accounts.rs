use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::{Account, ApiResponse};
use service::accounts::{AccountPatch, NewAccountInput};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::ServerState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, JsonApiError>;

/// Path ids that are not unsigned integers can never match a record.
fn parse_id(raw: &str) -> Result<u64, JsonApiError> {
    raw.parse::<u64>().map_err(|_| JsonApiError::not_found())
}

/// 列出全部账户（保持插入顺序）
#[utoipa::path(
    get, path = "/api/accounts", tag = "accounts",
    responses((status = 200, description = "Fetched all accounts", body = crate::openapi::AccountListResponseDoc))
)]
pub async fn list_accounts(State(state): State<ServerState>) -> Json<ApiResponse<Vec<Account>>> {
    let accounts = state.accounts.list().await;
    info!(count = accounts.len(), "list accounts");
    Json(ApiResponse::ok("Fetched all accounts", accounts))
}

/// 获取指定账户
#[utoipa::path(
    get, path = "/api/accounts/{id}", tag = "accounts",
    params(("id" = u64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account retrieved", body = crate::openapi::AccountResponseDoc),
        (status = 404, description = "Account not found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn get_account(State(state): State<ServerState>, Path(id): Path<String>) -> ApiResult<Account> {
    let id = parse_id(&id)?;
    let account = state.accounts.get(id).await?;
    Ok(Json(ApiResponse::ok("Account retrieved", account)))
}

/// 创建账户，成功返回 201
#[utoipa::path(
    post, path = "/api/accounts", tag = "accounts",
    request_body = crate::openapi::CreateAccountDoc,
    responses(
        (status = 201, description = "Account created successfully", body = crate::openapi::AccountResponseDoc),
        (status = 400, description = "Missing name, balance or email", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create_account(
    State(state): State<ServerState>,
    payload: Result<Json<NewAccountInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Account>>), JsonApiError> {
    let Json(input) = payload?;
    let account = state.accounts.create(input).await?;
    info!(id = account.id, "created account");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok("Account created successfully", account))))
}

/// 部分更新：只覆盖请求体中出现的字段
#[utoipa::path(
    put, path = "/api/accounts/{id}", tag = "accounts",
    params(("id" = u64, Path, description = "Account ID")),
    request_body = crate::openapi::UpdateAccountDoc,
    responses(
        (status = 200, description = "Account updated successfully", body = crate::openapi::AccountResponseDoc),
        (status = 400, description = "Malformed body", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Account not found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn update_account(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<AccountPatch>, JsonRejection>,
) -> ApiResult<Account> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let account = state.accounts.update(id, patch).await?;
    Ok(Json(ApiResponse::ok("Account updated successfully", account)))
}

/// 删除账户，返回删除前的记录
#[utoipa::path(
    delete, path = "/api/accounts/{id}", tag = "accounts",
    params(("id" = u64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account deleted successfully", body = crate::openapi::AccountResponseDoc),
        (status = 404, description = "Account not found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn delete_account(State(state): State<ServerState>, Path(id): Path<String>) -> ApiResult<Account> {
    let id = parse_id(&id)?;
    let account = state.accounts.delete(id).await?;
    info!(id = account.id, "deleted account");
    Ok(Json(ApiResponse::ok("Account deleted successfully", account)))
}
