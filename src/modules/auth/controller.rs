use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use docvault_core::AppError;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{ErrorResponse, LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use super::service::AuthService;

/// Register a new account with the regular role
#[utoipa::path(
    post,
    path = "/auth/v1/users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Email taken or role assignment attempted", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto), fields(user.email = %dto.email))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let response = AuthService::signup(&state.db, dto, &state.jwt_config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/auth/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto), fields(user.email = %dto.email))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}
