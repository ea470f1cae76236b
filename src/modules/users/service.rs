use std::collections::BTreeMap;

use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use docvault_core::{AppError, PaginationMeta, PaginationParams, hash_password};
use docvault_db::contains_pattern;
use docvault_models::{Document, Email, UserId};

use crate::metrics;
use crate::modules::documents::service::DOCUMENT_COLUMNS;

use super::model::{
    ChangePasswordDto, EMAIL_IN_USE_MESSAGE, PASSWORD_MISMATCH_MESSAGE, UpdateUserDto, User,
    USER_NOT_FOUND_MESSAGE, USER_OWNS_DOCUMENTS_MESSAGE, UserDocumentsResponse,
    UserListResponse,
};

/// Columns of [`User`]; the password hash is selected separately when needed.
pub const USER_COLUMNS: &str = "id, first_name, last_name, email, role_id, created_at, updated_at";

fn user_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!(USER_NOT_FOUND_MESSAGE))
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list_users(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<UserListResponse, AppError> {
        let limit = params.limit();
        let offset = params.offset();

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        debug!(total = %total, returned = users.len(), "Users fetched");

        Ok(UserListResponse {
            users,
            pagination: PaginationMeta::from_parts(total, limit, offset),
        })
    }

    /// Case-insensitive substring match on first name, last name, or email.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn search_users(
        db: &PgPool,
        query: &str,
        params: &PaginationParams,
    ) -> Result<UserListResponse, AppError> {
        let limit = params.limit();
        let offset = params.offset();
        let pattern = contains_pattern(query);

        const MATCH: &str = "first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1";

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM users WHERE {MATCH}"))
                .bind(&pattern)
                .fetch_one(db)
                .await?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {MATCH} ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(UserListResponse {
            users,
            pagination: PaginationMeta::from_parts(total, limit, offset),
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user(db: &PgPool, user_id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(user.id = %user_id, error = %e, "Database error fetching user");
                AppError::from(e)
            })?
            .ok_or_else(user_not_found)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_user(
        db: &PgPool,
        user_id: UserId,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let email = dto
            .email
            .as_deref()
            .map(Email::new)
            .transpose()
            .map_err(|_| {
                let mut fields = BTreeMap::new();
                fields.insert("email".to_string(), "Email is invalid".to_string());
                AppError::with_fields(fields)
            })?;

        if let Some(email) = &email {
            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2)",
            )
            .bind(email)
            .bind(user_id)
            .fetch_one(db)
            .await?;

            if taken {
                debug!(user.id = %user_id, "Email already taken by another user");
                return Err(AppError::conflict(EMAIL_IN_USE_MESSAGE));
            }
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                email = COALESCE($3, email),
                updated_at = NOW()
             WHERE id = $4
             RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.first_name.as_deref().map(str::trim))
        .bind(dto.last_name.as_deref().map(str::trim))
        .bind(email.as_ref())
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(EMAIL_IN_USE_MESSAGE);
            }
            error!(user.id = %user_id, error = %e, "Database error updating user");
            AppError::from(e)
        })?
        .ok_or_else(user_not_found)?;

        info!(user.id = %user.id, "User updated");
        Ok(user)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn change_password(
        db: &PgPool,
        user_id: UserId,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        if !dto.confirmation_matches() {
            let mut fields = BTreeMap::new();
            fields.insert(
                "passwordConfirmation".to_string(),
                PASSWORD_MISMATCH_MESSAGE.to_string(),
            );
            return Err(AppError::with_fields(fields));
        }

        let hashed_password = hash_password(&dto.password)?;

        let result =
            sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
                .bind(&hashed_password)
                .bind(user_id)
                .execute(db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }

        info!(user.id = %user_id, "Password changed");
        Ok(())
    }

    /// Deletes an account that no longer owns any document.
    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "users"))]
    pub async fn delete_user(db: &PgPool, user_id: UserId) -> Result<(), AppError> {
        let owned = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;

        if owned > 0 {
            debug!(user.id = %user_id, documents = owned, "User still owns documents");
            return Err(AppError::conflict(USER_OWNS_DOCUMENTS_MESSAGE));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(db)
            .await
            .map_err(|e| {
                // A document created after the count still blocks the delete.
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_foreign_key_violation()
                {
                    warn!(user.id = %user_id, "User gained a document during delete");
                    return AppError::conflict(USER_OWNS_DOCUMENTS_MESSAGE);
                }
                error!(user.id = %user_id, error = %e, "Database error deleting user");
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }

        metrics::track_user_deleted();
        info!(user.id = %user_id, "User deleted");
        Ok(())
    }

    /// Every document owned by `user_id`, newest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "documents"))]
    pub async fn get_user_documents(
        db: &PgPool,
        user_id: UserId,
        params: &PaginationParams,
    ) -> Result<UserDocumentsResponse, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(user_not_found());
        }

        let limit = params.limit();
        let offset = params.offset();

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;

        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE user_id = $1
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(UserDocumentsResponse {
            documents,
            pagination: PaginationMeta::from_parts(total, limit, offset),
        })
    }
}
