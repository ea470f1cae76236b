use std::collections::BTreeMap;

use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use docvault_auth::create_access_token;
use docvault_config::JwtConfig;
use docvault_core::{AppError, hash_password, verify_password};
use docvault_models::{Email, User, UserWithPassword, system_roles};

use crate::metrics;
use crate::modules::users::service::USER_COLUMNS;

use super::model::{
    INVALID_CREDENTIALS_MESSAGE, LoginRequest, LoginResponse, ROLE_ASSIGNMENT_MESSAGE,
    SIGNUP_SUCCESS_MESSAGE, SignupRequest, SignupResponse, USER_EXISTS_MESSAGE,
    USER_NOT_FOUND_MESSAGE,
};

pub struct AuthService;

fn parse_email(raw: &str) -> Result<Email, AppError> {
    Email::new(raw).map_err(|_| {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), "Email is invalid".to_string());
        AppError::with_fields(fields)
    })
}

fn issue_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let token = create_access_token(
        user.id.into_inner(),
        user.role_id.into_inner(),
        user.email.as_str(),
        jwt_config,
    )?;
    metrics::track_jwt_issued();
    Ok(token)
}

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(db.operation = "INSERT", db.table = "users"))]
    pub async fn signup(
        db: &PgPool,
        dto: SignupRequest,
        jwt_config: &JwtConfig,
    ) -> Result<SignupResponse, AppError> {
        if let Some(role_id) = dto.role_id
            && role_id != system_roles::REGULAR
        {
            warn!(role.id = %role_id, "Signup attempted to assign a role");
            return Err(AppError::forbidden(ROLE_ASSIGNMENT_MESSAGE));
        }

        let email = parse_email(&dto.email)?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&email)
        .fetch_one(db)
        .await?;

        if exists {
            debug!(user.email = %email, "Signup with an existing email");
            return Err(AppError::conflict(USER_EXISTS_MESSAGE));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (first_name, last_name, email, password, role_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.first_name.trim())
        .bind(dto.last_name.trim())
        .bind(&email)
        .bind(&hashed_password)
        .bind(system_roles::REGULAR)
        .fetch_one(db)
        .await
        .map_err(|e| {
            // A concurrent signup can pass the pre-check.
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(user.email = %email, "Signup raced on an existing email");
                return AppError::conflict(USER_EXISTS_MESSAGE);
            }
            error!(error = %e, "Database error creating user");
            AppError::from(e)
        })?;

        let token = issue_token(&user, jwt_config)?;
        metrics::track_user_registered();

        info!(user.id = %user.id, "User signed up");

        Ok(SignupResponse {
            message: SIGNUP_SUCCESS_MESSAGE.to_string(),
            token,
            user,
        })
    }

    #[instrument(skip(db, dto, jwt_config), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let email = parse_email(&dto.email)?;

        let record = sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {USER_COLUMNS}, password FROM users WHERE email = $1"
        ))
        .bind(&email)
        .fetch_optional(db)
        .await?;

        let Some(UserWithPassword { user, password }) = record else {
            metrics::track_user_login_failure("user_not_found");
            return Err(AppError::unauthorized(USER_NOT_FOUND_MESSAGE));
        };

        if !verify_password(&dto.password, &password)? {
            warn!(user.id = %user.id, "Login with a wrong password");
            metrics::track_user_login_failure("invalid_credentials");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        let token = issue_token(&user, jwt_config)?;
        metrics::track_user_login_success(
            system_roles::get_title(&user.role_id).unwrap_or("custom"),
        );

        info!(user.id = %user.id, "User logged in");

        Ok(LoginResponse { token, user })
    }
}
