use sqlx::PgPool;
use tracing::{debug, instrument};

use docvault_core::AppError;

use super::model::Role;

pub struct RoleService;

impl RoleService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "roles"))]
    pub async fn list_roles(db: &PgPool) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT id, title, created_at, updated_at FROM roles ORDER BY id",
        )
        .fetch_all(db)
        .await?;

        debug!(count = roles.len(), "Roles fetched");
        Ok(roles)
    }
}
