//! JWT utilities.
//!
//! Tokens are signed with HS256 using the configured secret and expire after
//! `JWT_ACCESS_EXPIRY` seconds. Any verification failure (bad signature,
//! malformed token, expiry) is reported as the same 401 so callers cannot
//! distinguish the cause.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use docvault_config::JwtConfig;
use docvault_core::AppError;

use crate::claims::Claims;

pub const AUTH_FAILED_MESSAGE: &str = "Failed to authenticate token.";

pub fn create_access_token(
    user_id: i32,
    role_id: i32,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        id: user_id,
        role_id,
        email: email.to_string(),
        exp,
        iat: now,
    };

    encode_claims(&claims, jwt_config)
}

/// Signs an arbitrary claim set.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {e}")))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(AUTH_FAILED_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::with_secret("test-secret")
    }

    #[test]
    fn test_token_roundtrip_preserves_identity() {
        let token = create_access_token(7, 2, "ada@example.com", &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.role_id, 2);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_access_token(7, 2, "ada@example.com", &config()).unwrap();
        let err = verify_token(&token, &JwtConfig::with_secret("other")).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), AUTH_FAILED_MESSAGE);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            id: 7,
            role_id: 2,
            email: "ada@example.com".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode_claims(&claims, &config()).unwrap();
        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let err = verify_token("not.a.jwt", &config()).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
