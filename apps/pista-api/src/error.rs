use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::store::StoreError;

/// A single field-level validation failure.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Error returned by route handlers, mapped to a structured JSON response.
///
/// Validation failures carry a field→messages map under `error`; everything
/// else is a status code plus a human-readable `msg`.
#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    Message { status: StatusCode, msg: String },
}

impl ApiError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }

    pub fn bad_request(msg: &str) -> Self {
        Self::Message {
            status: StatusCode::BAD_REQUEST,
            msg: msg.to_string(),
        }
    }

    pub fn forbidden(msg: &str) -> Self {
        Self::Message {
            status: StatusCode::FORBIDDEN,
            msg: msg.to_string(),
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self::Message {
            status: StatusCode::NOT_FOUND,
            msg: msg.to_string(),
        }
    }

    pub fn not_acceptable(msg: &str) -> Self {
        Self::Message {
            status: StatusCode::NOT_ACCEPTABLE,
            msg: msg.to_string(),
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self::Message {
            status: StatusCode::CONFLICT,
            msg: msg.to_string(),
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self::Message {
            status: StatusCode::UNAUTHORIZED,
            msg: msg.to_string(),
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self::Message {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            msg: msg.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let mut map = serde_json::Map::new();
                for err in errors {
                    if let Some(msgs) = map
                        .entry(err.field)
                        .or_insert_with(|| json!([]))
                        .as_array_mut()
                    {
                        msgs.push(json!(err.message));
                    }
                }
                (StatusCode::BAD_REQUEST, Json(json!({ "error": map }))).into_response()
            }
            ApiError::Message { status, msg } => {
                (status, Json(json!({ "msg": msg }))).into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::not_found("Record not found"),
            StoreError::AlreadyLocked => ApiError::conflict("This account is already locked"),
            StoreError::Conflict(msg) => ApiError::conflict(&msg),
            other => {
                tracing::error!(error = %other, "store operation failed");
                ApiError::internal("Unexpected storage failure")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_groups_messages_by_field() {
        let err = ApiError::validation(vec![
            FieldError::new("email", "The email is required"),
            FieldError::new("email", "The email must be valid"),
            FieldError::new("name", "The name is required"),
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_not_found_maps_to_404() {
        let err = ApiError::from(StoreError::NotFound);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn already_locked_maps_to_conflict() {
        let err = ApiError::from(StoreError::AlreadyLocked);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
