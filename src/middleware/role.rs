//! Role-based route guards.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AdminUser;
use crate::state::AppState;

/// Rejects the request unless the caller holds the admin role.
///
/// ```rust,ignore
/// let roles = init_roles_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if let Err(err) = AdminUser::from_request_parts(&mut parts, &state).await {
        return err.into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}
