//! JWT claim set for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in every access token.
///
/// The token carries the caller's identity and role so that authorization
/// decisions need no database lookup.
///
/// ```json
/// { "id": 7, "roleId": 2, "email": "ada@example.com", "exp": 1700086400, "iat": 1700000000 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User id
    pub id: i32,
    /// Role id of the user at the time the token was issued
    pub role_id: i32,
    pub email: String,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}
