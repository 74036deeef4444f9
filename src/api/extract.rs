//! Extractors whose rejections go through [`AppError`], so a bad body or id
//! gets the same `{"error": ...}` response as every other failure.
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// `axum::Json` with rejections mapped to 400. Only a JSON object is
/// accepted; arrays would otherwise bind positionally to struct fields.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match axum::Json::<Value>::from_request(req, state).await {
            Ok(axum::Json(value)) => value,
            Err(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                return Err(AppError::BadRequest(rejection_message(&rejection).to_string()));
            }
        };

        if !value.is_object() {
            return Err(AppError::BadRequest("JSON body must be an object".to_string()));
        }

        serde_json::from_value::<T>(value).map(JsonBody).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            AppError::BadRequest("JSON body is missing fields or has wrong types".to_string())
        })
    }
}

fn rejection_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "Expected Content-Type: application/json",
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON body",
        JsonRejection::BytesRejection(_) => "Failed to read request body",
        _ => "Invalid request body",
    }
}

/// The `{id}` path segment of `/todos/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("Rejected path: {}", e.body_text());
                AppError::BadRequest("Missing todo id".to_string())
            })?;

        raw.parse::<i64>()
            .map(TodoId)
            .map_err(|_| AppError::BadRequest(format!("Invalid todo id: {}", raw)))
    }
}
