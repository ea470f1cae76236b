//! # DocVault Models
//!
//! Domain models, DTOs, and the access policy for the DocVault API.
//!
//! # Modules
//!
//! - [`access`]: who may read or change which documents and accounts
//! - [`auth`]: signup and login payloads
//! - [`documents`]: documents and their access levels
//! - [`ids`]: strongly-typed entity ids
//! - [`roles`]: roles and the well-known system roles
//! - [`users`]: users and profile DTOs
//! - [`value_types`]: validated primitives such as [`Email`]
//!
//! # Example
//!
//! ```ignore
//! use docvault_models::access::{Actor, authorize_document_read};
//! use docvault_models::roles::system_roles;
//!
//! let actor = Actor::new(user_id, system_roles::REGULAR);
//! authorize_document_read(&actor, &(&document).into())?;
//! ```

pub mod access;
pub mod auth;
pub mod documents;
pub mod ids;
pub mod roles;
pub mod users;
pub mod value_types;

// Re-export commonly used types at crate root for convenience
pub use access::{Actor, Denial, DocumentAccess, Visibility};
pub use auth::{Claims, LoginRequest, LoginResponse, MessageResponse, SignupRequest, SignupResponse};
pub use documents::{
    AccessLevel, CreateDocumentDto, CreatedDocumentResponse, Document, DocumentListResponse,
    FoundDocumentResponse, UpdateDocumentDto, UpdatedDocumentResponse,
};
pub use ids::{DocumentId, RoleId, UserId};
pub use roles::{Role, RoleListResponse, system_roles};
pub use users::{
    ChangePasswordDto, UpdateUserDto, User, UserDocumentsResponse, UserListResponse,
    UserSearchParams, UserWithPassword,
};
pub use value_types::{Email, ValueTypeError};
