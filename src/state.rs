use sqlx::PgPool;

use docvault_config::{CorsConfig, JwtConfig, RateLimitConfig};

use crate::middleware::rate_limit::RateLimiters;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub rate_limiters: RateLimiters,
}

impl AppState {
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
    ) -> Self {
        let rate_limiters = RateLimiters::new(&rate_limit_config);
        Self {
            db,
            jwt_config,
            cors_config,
            rate_limit_config,
            rate_limiters,
        }
    }

    /// State with configuration read from the environment.
    pub fn from_env(db: PgPool) -> Self {
        Self::new(
            db,
            JwtConfig::from_env(),
            CorsConfig::from_env(),
            RateLimitConfig::from_env(),
        )
    }
}

pub async fn init_app_state() -> Result<AppState, sqlx::Error> {
    let db = docvault_db::init_db_pool().await?;
    Ok(AppState::from_env(db))
}
