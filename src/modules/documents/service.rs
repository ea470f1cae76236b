use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use docvault_core::{AppError, PaginationMeta, PaginationParams};
use docvault_db::contains_pattern;
use docvault_models::access::{
    Visibility, authorize_document_mutation, authorize_document_read,
};
use docvault_models::{DocumentId, UserId};

use crate::metrics;
use crate::middleware::auth::AuthUser;

use super::model::{
    CreateDocumentDto, DOCUMENT_NOT_FOUND_MESSAGE, DUPLICATE_TITLE_MESSAGE, Document,
    DocumentListResponse, UpdateDocumentDto,
};

pub const DOCUMENT_COLUMNS: &str =
    "id, title, content, access, user_id, user_role_id, created_at, updated_at";

fn document_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!(DOCUMENT_NOT_FOUND_MESSAGE))
}

pub struct DocumentService;

impl DocumentService {
    async fn title_taken(
        db: &PgPool,
        owner: UserId,
        title: &str,
        except: Option<DocumentId>,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM documents
                WHERE user_id = $1 AND title = $2 AND ($3::INT IS NULL OR id <> $3)
             )",
        )
        .bind(owner)
        .bind(title)
        .bind(except)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }

    async fn find(db: &PgPool, document_id: DocumentId) -> Result<Document, AppError> {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(document_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(document.id = %document_id, error = %e, "Database error fetching document");
            AppError::from(e)
        })?
        .ok_or_else(document_not_found)
    }

    /// Owner and role snapshot come from the caller's token.
    #[instrument(skip(db, auth_user, dto), fields(user.id = auth_user.0.id, db.operation = "INSERT", db.table = "documents"))]
    pub async fn create_document(
        db: &PgPool,
        auth_user: &AuthUser,
        dto: CreateDocumentDto,
    ) -> Result<Document, AppError> {
        let owner = auth_user.user_id();
        let title = dto.title.trim();
        let access = dto.access_level();

        if Self::title_taken(db, owner, title, None).await? {
            debug!(document.title = %title, "Duplicate title for owner");
            return Err(AppError::conflict(DUPLICATE_TITLE_MESSAGE));
        }

        let document = sqlx::query_as::<_, Document>(&format!(
            "INSERT INTO documents (title, content, access, user_id, user_role_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(title)
        .bind(&dto.content)
        .bind(access)
        .bind(owner)
        .bind(auth_user.role_id())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict(DUPLICATE_TITLE_MESSAGE);
                }
                if db_err.is_foreign_key_violation() {
                    warn!(user.id = %owner, "Token refers to a user that no longer exists");
                    return AppError::not_found(anyhow::anyhow!("User Not Found"));
                }
            }
            error!(error = %e, "Database error creating document");
            AppError::from(e)
        })?;

        metrics::track_document_created(access.as_str());
        info!(document.id = %document.id, document.access = %access, "Document created");

        Ok(document)
    }

    /// Documents the caller may read, newest first.
    #[instrument(skip(db, auth_user), fields(user.id = auth_user.0.id, db.operation = "SELECT", db.table = "documents"))]
    pub async fn list_documents(
        db: &PgPool,
        auth_user: &AuthUser,
        params: &PaginationParams,
    ) -> Result<DocumentListResponse, AppError> {
        Self::visible_documents(db, auth_user, None, params).await
    }

    /// Documents the caller may read whose title contains `query`.
    #[instrument(skip(db, auth_user), fields(user.id = auth_user.0.id, db.operation = "SELECT", db.table = "documents"))]
    pub async fn search_documents(
        db: &PgPool,
        auth_user: &AuthUser,
        query: &str,
        params: &PaginationParams,
    ) -> Result<DocumentListResponse, AppError> {
        Self::visible_documents(db, auth_user, Some(query), params).await
    }

    async fn visible_documents(
        db: &PgPool,
        auth_user: &AuthUser,
        title_query: Option<&str>,
        params: &PaginationParams,
    ) -> Result<DocumentListResponse, AppError> {
        let limit = params.limit();
        let offset = params.offset();
        let (is_admin, user_id, role_id) = Visibility::for_actor(&auth_user.actor()).binds();

        let mut where_clause = Visibility::predicate("d", 1);
        let pattern = title_query.map(contains_pattern);
        if pattern.is_some() {
            where_clause.push_str(" AND d.title ILIKE $4");
        }
        let page_binds = if pattern.is_some() { (5, 6) } else { (4, 5) };

        let count_sql = format!("SELECT COUNT(*) FROM documents d WHERE {where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(is_admin)
            .bind(user_id)
            .bind(role_id);
        if let Some(pattern) = &pattern {
            count_query = count_query.bind(pattern);
        }
        let total = count_query.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting documents");
            AppError::from(e)
        })?;

        let data_sql = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents d WHERE {where_clause}
             ORDER BY d.created_at DESC, d.id DESC LIMIT ${} OFFSET ${}",
            page_binds.0, page_binds.1
        );
        let mut data_query = sqlx::query_as::<_, Document>(&data_sql)
            .bind(is_admin)
            .bind(user_id)
            .bind(role_id);
        if let Some(pattern) = &pattern {
            data_query = data_query.bind(pattern);
        }
        let documents = data_query
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching documents");
                AppError::from(e)
            })?;

        debug!(total = %total, returned = documents.len(), "Documents fetched");

        Ok(DocumentListResponse {
            documents,
            pagination: PaginationMeta::from_parts(total, limit, offset),
        })
    }

    #[instrument(skip(db, auth_user), fields(user.id = auth_user.0.id, db.operation = "SELECT", db.table = "documents"))]
    pub async fn get_document(
        db: &PgPool,
        auth_user: &AuthUser,
        document_id: DocumentId,
    ) -> Result<Document, AppError> {
        let document = Self::find(db, document_id).await?;
        auth_user.permit(authorize_document_read(
            &auth_user.actor(),
            &(&document).into(),
        ))?;
        Ok(document)
    }

    #[instrument(skip(db, auth_user, dto), fields(user.id = auth_user.0.id, db.operation = "UPDATE", db.table = "documents"))]
    pub async fn update_document(
        db: &PgPool,
        auth_user: &AuthUser,
        document_id: DocumentId,
        dto: UpdateDocumentDto,
    ) -> Result<Document, AppError> {
        let existing = Self::find(db, document_id).await?;
        auth_user.permit(authorize_document_mutation(
            &auth_user.actor(),
            &(&existing).into(),
        ))?;

        let title = dto.title.as_deref().map(str::trim);
        if let Some(title) = title
            && title != existing.title
            && Self::title_taken(db, existing.user_id, title, Some(document_id)).await?
        {
            debug!(document.id = %document_id, "Rename collides with another title");
            return Err(AppError::conflict(DUPLICATE_TITLE_MESSAGE));
        }

        let document = sqlx::query_as::<_, Document>(&format!(
            "UPDATE documents SET
                title = COALESCE($1, title),
                content = COALESCE($2, content),
                access = COALESCE($3, access),
                updated_at = NOW()
             WHERE id = $4
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(title)
        .bind(dto.content.as_deref())
        .bind(dto.access_level())
        .bind(document_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(DUPLICATE_TITLE_MESSAGE);
            }
            error!(document.id = %document_id, error = %e, "Database error updating document");
            AppError::from(e)
        })?
        .ok_or_else(document_not_found)?;

        info!(document.id = %document.id, "Document updated");
        Ok(document)
    }

    #[instrument(skip(db, auth_user), fields(user.id = auth_user.0.id, db.operation = "DELETE", db.table = "documents"))]
    pub async fn delete_document(
        db: &PgPool,
        auth_user: &AuthUser,
        document_id: DocumentId,
    ) -> Result<(), AppError> {
        let existing = Self::find(db, document_id).await?;
        auth_user.permit(authorize_document_mutation(
            &auth_user.actor(),
            &(&existing).into(),
        ))?;

        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(document_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(document_not_found());
        }

        metrics::track_document_deleted();
        info!(document.id = %document_id, "Document deleted");
        Ok(())
    }
}
