pub use docvault_models::users::{
    ChangePasswordDto, UpdateUserDto, User, UserDocumentsResponse, UserListResponse,
    UserSearchParams,
};

pub const USER_NOT_FOUND_MESSAGE: &str = "User Not Found";
pub const EMAIL_IN_USE_MESSAGE: &str = "Email already in use";
pub const SEARCH_QUERY_MISSING_MESSAGE: &str = "Search query not found";
pub const USER_OWNS_DOCUMENTS_MESSAGE: &str =
    "User still owns documents. Delete them before deleting the account.";
pub const USER_DELETED_MESSAGE: &str = "User deleted successfully";
pub const PASSWORD_CHANGED_MESSAGE: &str = "Password updated successfully";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
