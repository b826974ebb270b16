//! Registration and login — the credential-issuing edge of the identity gate.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::tokens;
use crate::error::{ApiError, FieldError};
use crate::models::user::{NewUser, User};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

// =========================================================================
// POST /api/register — Register a new account
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub image_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub msg: &'static str,
    pub user: User,
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let mut errors: Vec<FieldError> = Vec::new();

    let name = body.name.as_deref().map(str::trim).unwrap_or("").to_string();
    if name.is_empty() || name.len() > 30 {
        errors.push(FieldError::new("name", "The name must be 1-30 characters"));
    }

    let surname = body
        .surname
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .to_string();
    if surname.is_empty() || surname.len() > 60 {
        errors.push(FieldError::new(
            "surname",
            "The surname must be 1-60 characters",
        ));
    }

    let email = body
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if !email.contains('@') || email.len() < 3 {
        errors.push(FieldError::new("email", "The email must be a valid address"));
    }

    let password = body.password.unwrap_or_default();
    if password.len() < 6 || password.len() > 50 {
        errors.push(FieldError::new(
            "password",
            "The password must be 6-50 characters",
        ));
    }

    let role_id = match body.role_id {
        Some(role_id) => role_id,
        None => {
            errors.push(FieldError::new("role_id", "The role id is required"));
            0
        }
    };

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::validation(vec![FieldError::new(
            "email",
            "The email has already been taken",
        )]));
    }

    let password_hash = hash_password(&password)?;

    let user = state
        .store
        .insert_user(NewUser {
            name,
            surname,
            image_path: body.image_path,
            email,
            password_hash,
            role_id,
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "user registered");

    Ok((
        StatusCode::ACCEPTED,
        Json(RegisterResponse {
            msg: "User created",
            user,
        }),
    ))
}

// =========================================================================
// POST /api/login — Exchange credentials for a bearer token
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: User,
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let mut errors: Vec<FieldError> = Vec::new();

    let email = body
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if !email.contains('@') {
        errors.push(FieldError::new("email", "The email must be a valid address"));
    }

    let password = body.password.unwrap_or_default();
    if password.len() < 6 || password.len() > 50 {
        errors.push(FieldError::new(
            "password",
            "The password must be 6-50 characters",
        ));
    }

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !verify_password(&password, &user.password_hash) {
        return Err(ApiError::unauthorized("Login failed"));
    }

    // Locked accounts keep their credentials but cannot sign in.
    if !user.active {
        return Err(ApiError::forbidden("Account locked"));
    }

    let token = tokens::mint_token(&state.config.jwt_secret, user.id)?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok((
        StatusCode::ACCEPTED,
        Json(LoginResponse {
            success: true,
            token,
            user,
        }),
    ))
}

/// Hash a password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    use argon2::Argon2;
    use password_hash::rand_core::OsRng;
    use password_hash::{PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            tracing::error!(?e, "password hashing failed");
            ApiError::internal("Failed to process password")
        })
}

fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::Argon2;
    use password_hash::{PasswordHash, PasswordVerifier};

    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
