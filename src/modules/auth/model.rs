use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

pub use docvault_models::auth::{
    LoginRequest, LoginResponse, MessageResponse, SignupRequest, SignupResponse,
};

pub const ROLE_ASSIGNMENT_MESSAGE: &str = "Role cannot be directly assigned!";
pub const USER_EXISTS_MESSAGE: &str = "User already exists!";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid Credentials";
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful";

/// Error body shared by every endpoint.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Present on validation failures, keyed by camelCase field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}
