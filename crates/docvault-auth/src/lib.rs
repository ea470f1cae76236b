//! # DocVault Auth
//!
//! Token issuing and verification for the DocVault API.
//!
//! - [`claims`]: the claim set carried by every access token
//! - [`jwt`]: HS256 token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use docvault_auth::{create_access_token, verify_token};
//! use docvault_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(7, 2, "ada@example.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.id, 7);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{AUTH_FAILED_MESSAGE, create_access_token, verify_token};
