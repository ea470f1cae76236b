//! Application error type.
//!
//! Every handler returns `Result<T, AppError>`. An `AppError` carries the HTTP
//! status to answer with, the underlying error, and optionally a map of
//! per-field validation messages.
//!
//! The response body is always `{"message": "..."}`. Validation failures add an
//! `errors` object keyed by camelCase field name. Server errors are logged and
//! answered with a generic message so internal details never reach the client.

use std::collections::BTreeMap;

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub fields: Option<BTreeMap<String, String>>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            fields: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow!(message.into()))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message.into()))
    }

    /// Uniqueness and ownership conflicts are reported as 403.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message.into()))
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// Builds a 400 response carrying the first message for each invalid field.
    pub fn validation(errors: &ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .iter()
            .filter_map(|(field, errs)| {
                let message = errs.first().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", to_camel_case(field)))
                })?;
                Some((to_camel_case(field), message))
            })
            .collect::<BTreeMap<_, _>>();

        Self::with_fields(fields)
    }

    /// Builds a 400 response from an already assembled field map.
    pub fn with_fields(fields: BTreeMap<String, String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow!("Validation failed"),
            fields: Some(fields),
        }
    }

    /// The message sent to the client.
    pub fn message(&self) -> String {
        if self.status.is_server_error() {
            INTERNAL_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

/// Converts a `snake_case` identifier to `camelCase`.
pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = ?self.error, status = %self.status, "request failed");
        }

        let message = self.message();
        let body = match self.fields {
            Some(fields) => json!({ "message": message, "errors": fields }),
            None => json!({ "message": message }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(length(min = 1, message = "First Name is Required"))]
        first_name: String,
        #[validate(email(message = "Email is invalid"))]
        email: String,
    }

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_camel_case_conversion() {
        assert_eq!(to_camel_case("first_name"), "firstName");
        assert_eq!(to_camel_case("password_confirmation"), "passwordConfirmation");
        assert_eq!(to_camel_case("email"), "email");
    }

    #[test]
    fn test_conflict_maps_to_forbidden() {
        assert_eq!(AppError::conflict("taken").status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_json(AppError::not_found(anyhow!("Document Not Found"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Document Not Found");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = body_json(AppError::internal_error("connection reset")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_validation_errors_keyed_by_camel_case() {
        let input = Signup {
            first_name: String::new(),
            email: "nope".into(),
        };
        let errors = input.validate().unwrap_err();
        let (status, body) = body_json(AppError::validation(&errors)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["firstName"], "First Name is Required");
        assert_eq!(body["errors"]["email"], "Email is invalid");
    }

    #[test]
    fn test_blanket_from_is_internal() {
        let err: AppError = std::io::Error::other("disk").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
