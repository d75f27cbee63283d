use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use slateroom_core::AppError;

/// JSON extractor that also runs `validator` rules on the payload.
///
/// Malformed bodies are a 400; well-formed bodies failing field validation
/// are a 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

/// Turn a serde/axum body rejection into a client-facing 400. Missing fields
/// are called out by name, everything else gets a generic message.
fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let detail = rejection.body_text();

    let message = if let Some(field) = detail
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
    {
        format!("{field} is required")
    } else if detail.contains("invalid type") {
        "Invalid field type in request".to_string()
    } else if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        "Missing 'Content-Type: application/json' header".to_string()
    } else {
        "Invalid request body".to_string()
    };

    AppError::new(StatusCode::BAD_REQUEST, anyhow::anyhow!(message))
}

/// Flatten field errors into one sorted, comma-joined message. Sorting keeps
/// the output stable across runs since the underlying map is unordered.
fn collect_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
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

        value.validate().map_err(|errors| {
            AppError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                anyhow::anyhow!("{}", collect_messages(&errors)),
            )
        })?;

        Ok(ValidatedJson(value))
    }
}
