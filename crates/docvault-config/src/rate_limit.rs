//! Rate limiting configuration for API endpoints.
//!
//! Rate limits are enforced per client IP with a token bucket from the
//! Governor crate.
//!
//! # Configuration
//!
//! - `RATE_LIMIT_GENERAL_PER_SECOND`: Token replenishment rate for general endpoints (default: 2)
//! - `RATE_LIMIT_GENERAL_BURST_SIZE`: Bucket size for general endpoints (default: 30)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: Token replenishment rate for auth endpoints (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: Bucket size for auth endpoints (default: 5)
//! - `RATE_LIMIT_TRUST_PROXY`: Key clients by `X-Forwarded-For` / `X-Real-IP`
//!   instead of the socket peer (default: false). Only enable it behind a
//!   reverse proxy that overwrites these headers, otherwise any client can pick
//!   its own bucket.
//!
//! The auth bucket is smaller so that signup and login cannot be hammered.
//!
//! # Example
//!
//! ```ignore
//! let config = RateLimitConfig::from_env();
//! let limiter = governor::RateLimiter::keyed(config.auth_quota());
//! ```

use std::num::NonZeroU32;

use governor::Quota;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests per second for general endpoints.
    pub general_per_second: u32,

    /// Maximum burst for general endpoints.
    pub general_burst_size: u32,

    /// Requests per second for auth endpoints.
    pub auth_per_second: u32,

    /// Maximum burst for auth endpoints.
    pub auth_burst_size: u32,

    /// Whether forwarding headers identify the client.
    pub trust_proxy_headers: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_per_second: 2,
            general_burst_size: 30,
            auth_per_second: 10,
            auth_burst_size: 5,
            trust_proxy_headers: false,
        }
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}

/// Zero is not a meaningful quota, so it is raised to one.
fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

impl RateLimitConfig {
    /// Loads the configuration, falling back to defaults for unset or
    /// unparsable variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            general_per_second: env_u32("RATE_LIMIT_GENERAL_PER_SECOND", defaults.general_per_second),
            general_burst_size: env_u32("RATE_LIMIT_GENERAL_BURST_SIZE", defaults.general_burst_size),
            auth_per_second: env_u32("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_u32("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
            trust_proxy_headers: env_bool("RATE_LIMIT_TRUST_PROXY", defaults.trust_proxy_headers),
        }
    }

    /// Quota applied to every API route.
    #[must_use]
    pub fn general_quota(&self) -> Quota {
        Quota::per_second(non_zero(self.general_per_second))
            .allow_burst(non_zero(self.general_burst_size))
    }

    /// Stricter quota applied to signup and login.
    #[must_use]
    pub fn auth_quota(&self) -> Quota {
        Quota::per_second(non_zero(self.auth_per_second))
            .allow_burst(non_zero(self.auth_burst_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.general_per_second, 2);
        assert_eq!(config.general_burst_size, 30);
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
        assert!(!config.trust_proxy_headers);
    }

    #[test]
    fn test_quota_burst_matches_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.general_quota().burst_size().get(), 30);
        assert_eq!(config.auth_quota().burst_size().get(), 5);
    }

    #[test]
    fn test_zero_values_are_raised_to_one() {
        let config = RateLimitConfig {
            general_per_second: 0,
            general_burst_size: 0,
            auth_per_second: 0,
            auth_burst_size: 0,
            trust_proxy_headers: false,
        };
        assert_eq!(config.general_quota().burst_size().get(), 1);
        assert_eq!(config.auth_quota().burst_size().get(), 1);
    }
}
