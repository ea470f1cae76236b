//! Authentication DTOs: signup, login, and the token-bearing responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::RoleId;
use crate::value_types::validate_max_len;
use docvault_core::serde::deserialize_trimmed;
use crate::users::User;

pub use docvault_auth::Claims;

/// Signup payload.
///
/// Missing strings default to empty so that validation reports every absent
/// field at once instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(min = 1, message = "First Name is Required"),
        custom(function = "validate_max_len", message = "First Name must be at most 255 characters")
    )]
    #[schema(example = "Ada")]
    pub first_name: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(min = 1, message = "Last Name is Required"),
        custom(function = "validate_max_len", message = "Last Name must be at most 255 characters")
    )]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        email(message = "Email is invalid"),
        custom(function = "validate_max_len", message = "Email must be at most 255 characters")
    )]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be minimum of 6 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[serde(default, alias = "passwordConfirm")]
    #[validate(
        length(min = 1, message = "Password Confirmation is Required"),
        must_match(other = "password", message = "Passwords do not match")
    )]
    #[schema(example = "password123")]
    pub password_confirmation: String,
    /// Only the regular role may be requested; anything else is refused.
    pub role_id: Option<RoleId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email(message = "Email is invalid"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is Required"))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
