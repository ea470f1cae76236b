use axum::{Json, extract::State};
use tracing::instrument;

use docvault_core::AppError;

use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;

use super::model::RoleListResponse;
use super::service::RoleService;

/// List roles (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    responses(
        (status = 200, description = "All roles", body = RoleListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("access_token" = []))
)]
#[instrument(skip(state))]
pub async fn list_roles(State(state): State<AppState>) -> Result<Json<RoleListResponse>, AppError> {
    let roles = RoleService::list_roles(&state.db).await?;
    Ok(Json(RoleListResponse { roles }))
}
