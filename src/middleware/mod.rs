//! Middleware and extractors for request processing.
//!
//! - [`auth`]: access-token extractors (`AuthUser`, `AdminUser`)
//! - [`rate_limit`]: per-client token buckets
//! - [`role`]: admin-only route guard
//!
//! # Authentication Flow
//!
//! 1. Client sends `x-access-token: <token>` (or `Authorization: Bearer <token>`)
//! 2. `AuthUser` verifies the JWT and exposes its claims
//! 3. Handlers ask the access policy through [`auth::AuthUser::permit`]
//!
//! ```ignore
//! async fn get_document(auth_user: AuthUser, ...) -> Result<Json<FoundDocumentResponse>, AppError> {
//!     auth_user.permit(access::authorize_document_read(&auth_user.actor(), &(&doc).into()))?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod rate_limit;
pub mod role;
