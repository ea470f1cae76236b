//! # DocVault Core
//!
//! Core types, errors, and utilities for the DocVault API.
//!
//! This crate provides foundational types used throughout the DocVault application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Offset/limit pagination and the `{totalCount, pages, currentPage, pageSize}` envelope
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use docvault_core::errors::AppError;
//! use docvault_core::pagination::{PaginationParams, PaginationMeta};
//! use docvault_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Document Not Found"));
//!
//! let hash = hash_password("secure_password")?;
//!
//! let params = PaginationParams::default();
//! let meta = PaginationMeta::new(42, &params);
//! assert_eq!(meta.pages, 5);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
