use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use tracing::warn;

use docvault_auth::{AUTH_FAILED_MESSAGE, Claims, verify_token};
use docvault_core::AppError;
use docvault_models::access::{self, Actor, Denial};
use docvault_models::{RoleId, UserId};

use crate::state::AppState;

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Extractor that validates the access token and provides its claims.
///
/// The token is read from `x-access-token`, falling back to
/// `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        UserId(self.0.id)
    }

    pub fn role_id(&self) -> RoleId {
        RoleId(self.0.role_id)
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id(), self.role_id())
    }

    pub fn is_admin(&self) -> bool {
        self.actor().is_admin()
    }

    /// Turns a policy decision into a handler result, recording refusals.
    pub fn permit(&self, decision: Result<(), Denial>) -> Result<(), AppError> {
        decision.map_err(|denial| {
            warn!(
                user.id = self.0.id,
                reason = denial.reason(),
                "Authorization denied"
            );
            crate::metrics::track_authorization_denied(denial.reason());
            denial.into_app_error()
        })
    }
}

pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let from_header = headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty());

    from_header.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized(AUTH_FAILED_MESSAGE))?;

        let claims = verify_token(token, &state.jwt_config);
        crate::metrics::track_jwt_validation(claims.is_ok());

        Ok(AuthUser(claims?))
    }
}

/// Authenticated caller holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        auth_user.permit(access::authorize_admin(&auth_user.actor()))?;
        Ok(AdminUser(auth_user))
    }
}
