use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use tracing::instrument;

use docvault_core::{AppError, PaginationParams};
use docvault_models::UserId;
use docvault_models::access::{authorize_self_or_admin, authorize_user_delete};

use crate::middleware::auth::{AdminUser, AuthUser};
use crate::modules::auth::model::{ErrorResponse, MessageResponse};
use crate::state::AppState;
use crate::validator::{ValidatedJson, query_params};

use super::model::{
    ChangePasswordDto, PASSWORD_CHANGED_MESSAGE, SEARCH_QUERY_MISSING_MESSAGE, USER_DELETED_MESSAGE,
    UpdateUserDto, User, UserDocumentsResponse, UserListResponse, UserSearchParams,
};
use super::service::UserService;

/// List every user (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of users", body = UserListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    tag = "Users",
    security(("access_token" = []))
)]
#[instrument(skip(state, admin), fields(user.id = admin.0.0.id))]
pub async fn list_users(
    State(state): State<AppState>,
    admin: AdminUser,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<UserListResponse>, AppError> {
    let params = query_params(params)?;
    let users = UserService::list_users(&state.db, &params).await?;
    Ok(Json(users))
}

/// Search users by name or email (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/search/users",
    params(
        ("query" = String, Query, description = "Case-insensitive substring of first name, last name, or email"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Page of matching users", body = UserListResponse),
        (status = 400, description = "Search query missing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    tag = "Users",
    security(("access_token" = []))
)]
#[instrument(skip(state, admin), fields(user.id = admin.0.0.id))]
pub async fn search_users(
    State(state): State<AppState>,
    admin: AdminUser,
    params: Result<Query<UserSearchParams>, QueryRejection>,
) -> Result<Json<UserListResponse>, AppError> {
    let params = query_params(params)?;
    let query = params
        .query
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!(SEARCH_QUERY_MISSING_MESSAGE)))?;

    let users = UserService::search_users(&state.db, &query, &params.pagination).await?;
    Ok(Json(users))
}

/// The caller's own profile
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Profile", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse)
    ),
    tag = "Users",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = auth_user.0.id))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user(&state.db, auth_user.user_id()).await?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = auth_user.0.id))]
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<User>, AppError> {
    auth_user.permit(authorize_self_or_admin(&auth_user.actor(), id))?;
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}

/// Update names or email
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated profile", body = User),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's account, or email already in use", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = auth_user.0.id))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<User>, AppError> {
    auth_user.permit(authorize_self_or_admin(&auth_user.actor(), id))?;
    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/password/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = auth_user.0.id))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.permit(authorize_self_or_admin(&auth_user.actor(), id))?;
    UserService::change_password(&state.db, id, dto).await?;
    Ok(Json(MessageResponse::new(PASSWORD_CHANGED_MESSAGE)))
}

/// Delete an account that owns no documents
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's account, or the user still owns documents", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = auth_user.0.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.permit(authorize_user_delete(&auth_user.actor(), id))?;
    UserService::delete_user(&state.db, id).await?;
    Ok(Json(MessageResponse::new(USER_DELETED_MESSAGE)))
}

/// Documents owned by a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/documents",
    params(("id" = i32, Path, description = "User id"), PaginationParams),
    responses(
        (status = 200, description = "Page of the user's documents", body = UserDocumentsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = auth_user.0.id))]
pub async fn get_user_documents(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<UserDocumentsResponse>, AppError> {
    auth_user.permit(authorize_self_or_admin(&auth_user.actor(), id))?;
    let params = query_params(params)?;
    let documents = UserService::get_user_documents(&state.db, id, &params).await?;
    Ok(Json(documents))
}
