use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::auth::policy::Role;
use crate::auth::tokens::{self, TokenError};
use crate::AppState;

/// Authenticated principal extracted from the `Authorization: Bearer <token>`
/// header, resolved against the user store so downstream handlers can trust
/// the role without re-verifying it.
///
/// Use as an Axum extractor in any handler that requires authentication:
///
/// ```ignore
/// async fn handler(principal: Principal) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: i64,
    pub role: Role,
}

/// Rejection returned when the bearer token is missing, invalid, or expired.
pub struct AuthError {
    status: &'static str,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "status": self.status });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract the Bearer token from the Authorization header.
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError {
                status: "Token authentication failed",
            })?;

        let token = header.strip_prefix("Bearer ").ok_or(AuthError {
            status: "Token authentication failed",
        })?;

        let user_id =
            tokens::verify_token(&state.config.jwt_secret, token).map_err(|e| match e {
                TokenError::Expired => AuthError {
                    status: "The token has expired",
                },
                TokenError::Invalid => AuthError {
                    status: "The token is not valid",
                },
            })?;

        // The token subject must still resolve to a stored account.
        let user = state
            .store
            .find_user(user_id)
            .await
            .map_err(|_| AuthError {
                status: "Token authentication failed",
            })?
            .ok_or(AuthError {
                status: "The token is not valid",
            })?;

        Ok(Principal {
            id: user.id,
            role: Role::from_id(user.role_id),
        })
    }
}
