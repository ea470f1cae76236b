//! Per-client rate limiting.
//!
//! Two keyed token buckets are kept in [`AppState`]: a general one applied to
//! every API route and a stricter one for signup and login. Clients are keyed
//! by the socket peer address. With `trust_proxy_headers` set, the first
//! `X-Forwarded-For` address and then `X-Real-IP` take precedence; that is
//! only sound behind a proxy which overwrites both headers. Requests with no
//! usable key share one bucket.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    DefaultKeyedRateLimiter, RateLimiter,
    clock::{Clock, DefaultClock},
};

use docvault_config::RateLimitConfig;
use docvault_core::AppError;

use crate::state::AppState;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests, please try again later.";

type KeyedLimiter = DefaultKeyedRateLimiter<String>;

#[derive(Clone)]
pub struct RateLimiters {
    pub general: Arc<KeyedLimiter>,
    pub auth: Arc<KeyedLimiter>,
    pub trust_proxy_headers: bool,
}

impl RateLimiters {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            general: Arc::new(RateLimiter::keyed(config.general_quota())),
            auth: Arc::new(RateLimiter::keyed(config.auth_quota())),
            trust_proxy_headers: config.trust_proxy_headers,
        }
    }

    /// Drops buckets of clients that are back to a full quota.
    pub fn retain_recent(&self) {
        self.general.retain_recent();
        self.auth.retain_recent();
    }
}

fn header_ip(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn client_key(req: &Request, trust_proxy_headers: bool) -> String {
    let forwarded = trust_proxy_headers
        .then(|| {
            header_ip(req.headers(), "x-forwarded-for")
                .or_else(|| header_ip(req.headers(), "x-real-ip"))
        })
        .flatten();

    forwarded
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn check(
    limiter: &KeyedLimiter,
    trust_proxy_headers: bool,
    scope: &'static str,
    req: Request,
) -> Result<Request, Response> {
    let key = client_key(&req, trust_proxy_headers);
    match limiter.check_key(&key) {
        Ok(()) => Ok(req),
        Err(not_until) => {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            tracing::warn!(client = %key, scope, path = %req.uri().path(), "rate limit exceeded");
            crate::metrics::track_rate_limited(scope);

            let mut response =
                AppError::new(StatusCode::TOO_MANY_REQUESTS, anyhow!(RATE_LIMITED_MESSAGE))
                    .into_response();
            if let Ok(value) = HeaderValue::from_str(&wait.as_secs().max(1).to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            Err(response)
        }
    }
}

pub async fn general_rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let limiters = &state.rate_limiters;
    match check(&limiters.general, limiters.trust_proxy_headers, "general", req) {
        Ok(req) => next.run(req).await,
        Err(response) => response,
    }
}

pub async fn auth_rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let limiters = &state.rate_limiters;
    match check(&limiters.auth, limiters.trust_proxy_headers, "auth", req) {
        Ok(req) => next.run(req).await,
        Err(response) => response,
    }
}
