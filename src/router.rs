use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::ACCESS_TOKEN_HEADER;
use crate::middleware::rate_limit::{auth_rate_limit, general_rate_limit};
use crate::middleware::role::require_admin;
use crate::modules::auth::router::init_auth_router;
use crate::modules::documents::router::{init_document_search_router, init_documents_router};
use crate::modules::roles::router::init_roles_router;
use crate::modules::users::router::{init_user_search_router, init_users_router};
use crate::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(ACCESS_TOKEN_HEADER),
        ])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .nest("/users", init_users_router())
        .nest("/search", init_user_search_router())
        .nest(
            "/roles",
            init_roles_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        );

    let api = Router::new()
        .nest("/v1", api_v1)
        .nest("/documents", init_documents_router())
        .nest("/search", init_document_search_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            general_rate_limit,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest(
            "/auth/v1/users",
            init_auth_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_rate_limit)),
        )
        .nest("/api", api)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
