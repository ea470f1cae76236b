//! # DocVault Config
//!
//! Configuration types for the DocVault API.
//!
//! Every structure is loaded from environment variables and falls back to a
//! development default when a variable is missing or unparsable:
//!
//! - [`jwt`]: JWT signing secret and token lifetime
//! - [`cors`]: allowed CORS origins
//! - [`rate_limit`]: per-IP rate limiting quotas
//! - [`server`]: HTTP and metrics bind addresses
//!
//! # Example
//!
//! ```ignore
//! use docvault_config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
