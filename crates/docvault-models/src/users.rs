//! User domain models and DTOs.

use crate::documents::Document;
use crate::ids::{RoleId, UserId};
use crate::value_types::{Email, validate_max_len};
use docvault_core::serde::{deserialize_optional_trimmed, deserialize_trimmed_option};
use docvault_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A user as returned by the API. The password hash is never part of it.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub role_id: RoleId,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A user row including the password hash, used only to check credentials.
#[derive(FromRow, Debug, Clone)]
pub struct UserWithPassword {
    #[sqlx(flatten)]
    pub user: User,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    #[validate(
        length(min = 1, message = "First Name is Required"),
        custom(function = "validate_max_len", message = "First Name must be at most 255 characters")
    )]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    #[validate(
        length(min = 1, message = "Last Name is Required"),
        custom(function = "validate_max_len", message = "Last Name must be at most 255 characters")
    )]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    #[validate(
        email(message = "Email is invalid"),
        custom(function = "validate_max_len", message = "Email must be at most 255 characters")
    )]
    pub email: Option<String>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be minimum of 6 characters"))]
    #[schema(example = "newPassword123")]
    pub password: String,
    /// When present it must equal `password`.
    #[serde(alias = "passwordConfirm")]
    pub password_confirmation: Option<String>,
}

impl ChangePasswordDto {
    pub fn confirmation_matches(&self) -> bool {
        self.password_confirmation
            .as_deref()
            .is_none_or(|c| c == self.password)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSearchParams {
    /// Case-insensitive substring matched against first name, last name, and email
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub query: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDocumentsResponse {
    pub documents: Vec<Document>,
    pub pagination: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_camel_case_without_password() {
        let now = chrono::Utc::now();
        let user = User {
            id: UserId(2),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Email::new("ada@example.com").unwrap(),
            role_id: RoleId(2),
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["roleId"], 2);
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_update_user_dto_blank_and_overlong() {
        let blank: UpdateUserDto = serde_json::from_str(r#"{"firstName":"   "}"#).unwrap();
        assert_eq!(blank.first_name.as_deref(), Some(""));
        assert!(blank.validate().unwrap_err().field_errors().contains_key("first_name"));

        let long = UpdateUserDto {
            last_name: Some("x".repeat(256)),
            ..Default::default()
        };
        assert!(long.validate().unwrap_err().field_errors().contains_key("last_name"));

        let padded: UpdateUserDto = serde_json::from_str(r#"{"lastName":" Dexter "}"#).unwrap();
        assert!(padded.validate().is_ok());
        assert_eq!(padded.last_name.as_deref(), Some("Dexter"));
    }

    #[test]
    fn test_update_user_dto_validation() {
        let dto = UpdateUserDto {
            first_name: Some("Gimli".into()),
            last_name: Some("Dexter".into()),
            email: Some("gdex@yahoo.com".into()),
        };
        assert!(dto.validate().is_ok());

        let bad = UpdateUserDto {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let blank = UpdateUserDto {
            first_name: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_update_user_dto_is_empty() {
        assert!(UpdateUserDto::default().is_empty());
    }

    #[test]
    fn test_change_password_dto() {
        let dto: ChangePasswordDto = serde_json::from_str(r#"{"password":"123456789"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.confirmation_matches());

        let short: ChangePasswordDto = serde_json::from_str(r#"{"password":"123"}"#).unwrap();
        assert!(short.validate().is_err());

        let mismatch: ChangePasswordDto =
            serde_json::from_str(r#"{"password":"123456","passwordConfirm":"654321"}"#).unwrap();
        assert!(!mismatch.confirmation_matches());
    }

    #[test]
    fn test_search_params_blank_query() {
        let params: UserSearchParams = serde_json::from_str(r#"{"query":"  "}"#).unwrap();
        assert!(params.query.is_none());
        assert_eq!(params.pagination.limit(), 10);
    }
}
