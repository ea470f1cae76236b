use std::collections::BTreeMap;

use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::de::DeserializeOwned;
use validator::Validate;

use docvault_core::AppError;
use docvault_core::errors::to_camel_case;

/// JSON body extractor that runs `validator` rules before the handler sees
/// the payload.
///
/// Rule failures become a 400 whose `errors` object is keyed by camelCase
/// field name. Malformed bodies are also 400s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        let mut fields = BTreeMap::new();
        fields.insert(to_camel_case(field), format!("{field} is required"));
        return AppError::with_fields(fields);
    }

    if error_msg.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate().map_err(|errors| AppError::validation(&errors))?;

        Ok(ValidatedJson(value))
    }
}

/// Unwraps an optional query extraction, answering 400 in the JSON error shape.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| AppError::bad_request(anyhow!("Invalid query parameters: {}", e)))
}
