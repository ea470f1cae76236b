//! Strongly-typed ID newtypes for domain entities.
//!
//! Every table uses a `SERIAL` primary key. Wrapping the raw `i32` per entity
//! keeps a `UserId` from being passed where a `DocumentId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use docvault_models::ids::{DocumentId, UserId};
//!
//! fn owner_of(id: DocumentId) -> UserId { /* ... */ }
//!
//! owner_of(DocumentId(3));   // OK
//! // owner_of(UserId(3));    // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;

/// Generates a newtype over `i32` with the sqlx, serde, and utoipa impls an
/// entity id needs.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = i32)]
        pub struct $name(pub i32);

        impl $name {
            #[inline]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            #[inline]
            fn from(v: i32) -> Self {
                Self(v)
            }
        }

        impl From<$name> for i32 {
            #[inline]
            fn from(id: $name) -> i32 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i32>().map(Self)
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <i32 as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <i32 as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <i32 as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <i32 as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <i32 as PgHasArrayType>::array_type_info()
            }
        }

        // Path segments arrive as strings and JSON bodies as numbers; i32's
        // own impl handles both.
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                i32::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for User entities.
    UserId
);

define_id!(
    /// Strongly-typed ID for Role entities.
    RoleId
);

define_id!(
    /// Strongly-typed ID for Document entities.
    DocumentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&UserId(42)).unwrap(), "42");
        let id: DocumentId = serde_json::from_str("7").unwrap();
        assert_eq!(id, DocumentId(7));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("12".parse::<RoleId>().unwrap(), RoleId(12));
        assert!("abc".parse::<RoleId>().is_err());
    }

    #[test]
    fn test_debug_names_the_entity() {
        assert_eq!(format!("{:?}", UserId(3)), "UserId(3)");
        assert_eq!(UserId(3).to_string(), "3");
    }

    #[test]
    fn test_conversions() {
        let id = DocumentId::from(9);
        assert_eq!(i32::from(id), 9);
        assert_eq!(id.into_inner(), 9);
    }
}
