//! Role domain models.

use crate::ids::RoleId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub title: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleListResponse {
    pub roles: Vec<Role>,
}

/// Well-known role rows seeded by the initial migration.
pub mod system_roles {
    use crate::ids::RoleId;

    pub mod titles {
        pub const ADMIN: &str = "admin";
        pub const REGULAR: &str = "regular";
    }

    /// Full access to every user and document.
    pub const ADMIN: RoleId = RoleId(1);
    /// Assigned to every account created through signup.
    pub const REGULAR: RoleId = RoleId(2);

    pub fn all() -> [RoleId; 2] {
        [ADMIN, REGULAR]
    }

    pub fn is_system_role(role_id: &RoleId) -> bool {
        all().contains(role_id)
    }

    pub fn get_title(role_id: &RoleId) -> Option<&'static str> {
        match *role_id {
            id if id == ADMIN => Some(titles::ADMIN),
            id if id == REGULAR => Some(titles::REGULAR),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_role_ids() {
        assert_eq!(system_roles::ADMIN, RoleId(1));
        assert_eq!(system_roles::REGULAR, RoleId(2));
        assert!(system_roles::is_system_role(&RoleId(2)));
        assert!(!system_roles::is_system_role(&RoleId(3)));
    }

    #[test]
    fn test_get_title() {
        assert_eq!(system_roles::get_title(&system_roles::ADMIN), Some("admin"));
        assert_eq!(system_roles::get_title(&system_roles::REGULAR), Some("regular"));
        assert_eq!(system_roles::get_title(&RoleId(99)), None);
    }
}
