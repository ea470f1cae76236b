use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use tracing::instrument;

use docvault_core::{AppError, PaginationParams};
use docvault_models::DocumentId;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::{ErrorResponse, MessageResponse};
use crate::state::AppState;
use crate::validator::{ValidatedJson, query_params};

use super::model::{
    CreateDocumentDto, CreatedDocumentResponse, DOCUMENT_CREATED_MESSAGE,
    DOCUMENT_DELETED_MESSAGE, DOCUMENT_UPDATED_MESSAGE, DocumentListResponse,
    FoundDocumentResponse, SEARCH_QUERY_MISSING_MESSAGE, UpdateDocumentDto,
    UpdatedDocumentResponse,
};
use super::service::DocumentService;

/// Create a document owned by the caller
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocumentDto,
    responses(
        (status = 201, description = "Document created", body = CreatedDocumentResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller already has a document with this title", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = auth_user.0.id))]
pub async fn create_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateDocumentDto>,
) -> Result<(StatusCode, Json<CreatedDocumentResponse>), AppError> {
    let document = DocumentService::create_document(&state.db, &auth_user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedDocumentResponse {
            message: DOCUMENT_CREATED_MESSAGE.to_string(),
            created_document: document,
        }),
    ))
}

/// Documents visible to the caller
#[utoipa::path(
    get,
    path = "/api/documents",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of documents", body = DocumentListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = auth_user.0.id))]
pub async fn list_documents(
    State(state): State<AppState>,
    auth_user: AuthUser,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let params = query_params(params)?;
    let documents = DocumentService::list_documents(&state.db, &auth_user, &params).await?;
    Ok(Json(documents))
}

#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    params(("id" = i32, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document", body = FoundDocumentResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Access Denied", body = ErrorResponse),
        (status = 404, description = "Document Not Found", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = auth_user.0.id))]
pub async fn get_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DocumentId>,
) -> Result<Json<FoundDocumentResponse>, AppError> {
    let document = DocumentService::get_document(&state.db, &auth_user, id).await?;
    Ok(Json(FoundDocumentResponse {
        found_document: document,
    }))
}

/// Edit a document (owner or admin)
#[utoipa::path(
    put,
    path = "/api/documents/{id}",
    params(("id" = i32, Path, description = "Document id")),
    request_body = UpdateDocumentDto,
    responses(
        (status = 200, description = "Document updated", body = UpdatedDocumentResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the owner, or the new title is taken", body = ErrorResponse),
        (status = 404, description = "Document Not Found", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = auth_user.0.id))]
pub async fn update_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DocumentId>,
    ValidatedJson(dto): ValidatedJson<UpdateDocumentDto>,
) -> Result<Json<UpdatedDocumentResponse>, AppError> {
    let document = DocumentService::update_document(&state.db, &auth_user, id, dto).await?;
    Ok(Json(UpdatedDocumentResponse {
        message: DOCUMENT_UPDATED_MESSAGE.to_string(),
        updated_document: document,
    }))
}

/// Delete a document (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(("id" = i32, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Access Denied", body = ErrorResponse),
        (status = 404, description = "Document Not Found", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = auth_user.0.id))]
pub async fn delete_document(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DocumentId>,
) -> Result<Json<MessageResponse>, AppError> {
    DocumentService::delete_document(&state.db, &auth_user, id).await?;
    Ok(Json(MessageResponse::new(DOCUMENT_DELETED_MESSAGE)))
}

/// Search visible documents by title
#[utoipa::path(
    get,
    path = "/api/search/documents/{query}",
    params(
        ("query" = String, Path, description = "Case-insensitive substring of the title"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Page of matching documents", body = DocumentListResponse),
        (status = 400, description = "Search query missing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("access_token" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = auth_user.0.id))]
pub async fn search_documents(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(query): Path<String>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            SEARCH_QUERY_MISSING_MESSAGE
        )));
    }

    let params = query_params(params)?;
    let documents =
        DocumentService::search_documents(&state.db, &auth_user, query, &params).await?;
    Ok(Json(documents))
}
