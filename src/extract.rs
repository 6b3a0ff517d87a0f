//! Request body extraction for the write endpoints.
//!
//! Bodies arrive either form-encoded or as JSON objects. An absent body decodes
//! to the form's `Default`, so the service's own checks decide the outcome.

use axum::Form;
use axum::async_trait;
use axum::body::{Body, to_bytes};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::Display;

use crate::error::ApiError;

/// Largest body accepted, matching axum's default limit.
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Reason code logged when a body cannot be decoded at all.
pub const UNREADABLE_BODY: u8 = 0;

/// A form body decoded from `application/x-www-form-urlencoded` or `application/json`.
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);

        let (parts, body) = req.into_parts();
        let bytes = to_bytes(body, BODY_LIMIT).await.map_err(unreadable)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload(T::default()));
        }

        if is_json {
            return decode_json(&bytes).map(Payload);
        }

        let request = Request::from_parts(parts, Body::from(bytes));
        let Form(form) = Form::<T>::from_request(request, state)
            .await
            .map_err(unreadable)?;
        Ok(Payload(form))
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Decodes a JSON object, reading scalar values as their text so numeric
/// `MaxGroupSize` or `GroupId` reach validation the same way form fields do.
fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let Value::Object(fields) = serde_json::from_slice::<Value>(bytes).map_err(unreadable)? else {
        return Err(unreadable("body is not a JSON object"));
    };

    let fields: Map<String, Value> = fields
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::Number(n) => Some((key, Value::String(n.to_string()))),
            Value::Bool(b) => Some((key, Value::String(b.to_string()))),
            other => Some((key, other)),
        })
        .collect();

    serde_json::from_value(Value::Object(fields)).map_err(unreadable)
}

fn unreadable(detail: impl Display) -> ApiError {
    tracing::debug!("Unreadable request body: {}", detail);
    ApiError::Validation {
        code: UNREADABLE_BODY,
        reason: "unreadable request body",
    }
}
