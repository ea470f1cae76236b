use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use docvault_core::{PaginationMeta, PaginationParams};

use crate::middleware::auth::ACCESS_TOKEN_HEADER;
use crate::modules::auth::model::{
    ErrorResponse, LoginRequest, LoginResponse, MessageResponse, SignupRequest, SignupResponse,
};
use crate::modules::documents::model::{
    AccessLevel, CreateDocumentDto, CreatedDocumentResponse, Document, DocumentListResponse,
    FoundDocumentResponse, UpdateDocumentDto, UpdatedDocumentResponse,
};
use crate::modules::roles::model::{Role, RoleListResponse};
use crate::modules::users::model::{
    ChangePasswordDto, UpdateUserDto, User, UserDocumentsResponse, UserListResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::search_users,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::change_password,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::get_user_documents,
        crate::modules::roles::controller::list_roles,
        crate::modules::documents::controller::create_document,
        crate::modules::documents::controller::list_documents,
        crate::modules::documents::controller::get_document,
        crate::modules::documents::controller::update_document,
        crate::modules::documents::controller::delete_document,
        crate::modules::documents::controller::search_documents,
    ),
    components(
        schemas(
            User,
            UpdateUserDto,
            ChangePasswordDto,
            UserListResponse,
            UserDocumentsResponse,
            Role,
            RoleListResponse,
            Document,
            AccessLevel,
            CreateDocumentDto,
            UpdateDocumentDto,
            CreatedDocumentResponse,
            FoundDocumentResponse,
            UpdatedDocumentResponse,
            DocumentListResponse,
            SignupRequest,
            SignupResponse,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup and login"),
        (name = "Users", description = "Account management"),
        (name = "Roles", description = "Role listing"),
        (name = "Documents", description = "Document management and search")
    ),
    info(
        title = "DocVault API",
        version = "0.1.0",
        description = "Document management REST API with per-document access control, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "access_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(ACCESS_TOKEN_HEADER))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth/v1/users",
            "/auth/v1/users/login",
            "/api/v1/users",
            "/api/v1/users/me",
            "/api/v1/users/{id}",
            "/api/v1/users/password/{id}",
            "/api/v1/users/{id}/documents",
            "/api/v1/search/users",
            "/api/v1/roles",
            "/api/documents",
            "/api/documents/{id}",
            "/api/search/documents/{query}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_access_token_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("access_token"));
    }
}
