//! Document domain models and DTOs.
//!
//! A document's `access` level decides who besides its owner may read it:
//!
//! - `public`: every authenticated user
//! - `private`: only the owner (and admins)
//! - `role`: users holding the role the owner had when the document was created

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::ids::{DocumentId, RoleId, UserId};
use crate::value_types::validate_max_len;
use docvault_core::PaginationMeta;
use docvault_core::serde::{deserialize_trimmed, deserialize_trimmed_option};
use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, FromRow, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    Public,
    Private,
    Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid access level")]
pub struct InvalidAccessLevel(pub String);

impl AccessLevel {
    pub const ALL: [AccessLevel; 3] = [Self::Public, Self::Private, Self::Role];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Role => "role",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = InvalidAccessLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "role" => Ok(Self::Role),
            _ => Err(InvalidAccessLevel(s.to_string())),
        }
    }
}

// Stored as VARCHAR guarded by a CHECK constraint.
impl Type<sqlx::Postgres> for AccessLevel {
    fn type_info() -> PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, sqlx::Postgres> for AccessLevel {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, sqlx::Postgres>>::encode(self.as_str(), buf)
    }
}

impl<'r> Decode<'r, sqlx::Postgres> for AccessLevel {
    fn decode(
        value: <sqlx::Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

impl PgHasArrayType for AccessLevel {
    fn array_type_info() -> PgTypeInfo {
        <String as PgHasArrayType>::array_type_info()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    pub access: AccessLevel,
    /// Owner
    pub user_id: UserId,
    /// Owner's role when the document was created
    pub user_role_id: RoleId,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn validate_access(access: &str) -> Result<(), ValidationError> {
    access.parse::<AccessLevel>().map(|_| ()).map_err(|_| {
        ValidationError::new("access")
            .with_message(Cow::Borrowed("Access must be one of public, private or role"))
    })
}

/// Owner and role snapshot are taken from the caller's token, so any
/// `userId` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(min = 1, message = "Title is Required"),
        custom(function = "validate_max_len", message = "Title must be at most 255 characters")
    )]
    #[schema(example = "Meeting notes")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "Content is Required"))]
    pub content: String,
    /// Defaults to `public`
    #[validate(custom(function = "validate_access"))]
    #[schema(example = "public")]
    pub access: Option<String>,
}

impl CreateDocumentDto {
    /// Access level after validation; unset means public.
    pub fn access_level(&self) -> AccessLevel {
        self.access
            .as_deref()
            .and_then(|a| a.parse().ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentDto {
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    #[validate(
        length(min = 1, message = "Title is Required"),
        custom(function = "validate_max_len", message = "Title must be at most 255 characters")
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    #[validate(length(min = 1, message = "Content is Required"))]
    pub content: Option<String>,
    #[validate(custom(function = "validate_access"))]
    pub access: Option<String>,
}

impl UpdateDocumentDto {
    pub fn access_level(&self) -> Option<AccessLevel> {
        self.access.as_deref().and_then(|a| a.parse().ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDocumentResponse {
    pub message: String,
    pub created_document: Document,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoundDocumentResponse {
    pub found_document: Document,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedDocumentResponse {
    pub message: String,
    pub updated_document: Document,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentListResponse {
    pub documents: Vec<Document>,
    pub pagination: PaginationMeta,
}
