pub use docvault_models::roles::{Role, RoleListResponse, system_roles};
