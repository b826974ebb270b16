//! Account administration and self-service profile operations.
//!
//! Warnings are a two-strike ladder: the first strike records a note, the
//! second locks the account, a third attempt is refused outright.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::Principal;
use crate::auth::policy::{authorize, Capability, Role};
use crate::db::store::{StoreError, WarningOutcome};
use crate::error::{ApiError, FieldError};
use crate::models::user::User;
use crate::routes::MsgResponse;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get-users", get(get_users))
        .route("/get-user/{id}", get(get_user))
        .route("/get-role", get(get_role))
        .route("/get-warnings", get(get_warnings))
        .route("/add-warning/{id}", post(add_warning))
        .route("/edit-user", put(edit_own_name))
        .route("/edit-user/{id}", put(edit_user_name))
        .route("/edit-email", put(edit_own_email))
        .route("/edit-email/{id}", put(edit_user_email))
        .route(
            "/active-desactive-account/{id}",
            put(active_desactive_account),
        )
        .route("/delete-account", delete(delete_own_account))
        .route("/delete-account/{id}", delete(delete_account))
}

fn require_user_admin(principal: &Principal) -> Result<(), ApiError> {
    if !authorize(principal.role, Capability::ManageUsers) {
        return Err(ApiError::forbidden(
            "To perform this operation you must be an Administrator",
        ));
    }
    Ok(())
}

// =========================================================================
// Reads
// =========================================================================

#[derive(Debug, Serialize)]
struct UsersResponse {
    users: Vec<User>,
}

async fn get_users(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<(StatusCode, Json<UsersResponse>), ApiError> {
    if !authorize(principal.role, Capability::ViewUsers) {
        return Err(ApiError::forbidden(
            "To perform this operation you must be an Administrator or a Moderator",
        ));
    }

    let users = state.store.list_users().await?;
    Ok((StatusCode::ACCEPTED, Json(UsersResponse { users })))
}

#[derive(Debug, Serialize)]
struct UserResponse {
    user: User,
}

async fn get_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if !authorize(principal.role, Capability::ViewUsers) {
        return Err(ApiError::forbidden(
            "To perform this operation you must be an Administrator or a Moderator",
        ));
    }

    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::bad_request("This user does not exist"))?;

    Ok((StatusCode::ACCEPTED, Json(UserResponse { user })))
}

#[derive(Debug, Serialize)]
struct RoleResponse {
    role: Role,
}

async fn get_role(principal: Principal) -> (StatusCode, Json<RoleResponse>) {
    (
        StatusCode::ACCEPTED,
        Json(RoleResponse {
            role: principal.role,
        }),
    )
}

#[derive(Debug, Serialize)]
struct WarningsResponse {
    warning_count: i32,
    warning_1: Option<String>,
    warning_2: Option<String>,
}

async fn get_warnings(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<(StatusCode, Json<WarningsResponse>), ApiError> {
    let user = state
        .store
        .find_user(principal.id)
        .await?
        .ok_or_else(|| ApiError::bad_request("This user does not exist"))?;

    Ok((
        StatusCode::ACCEPTED,
        Json(WarningsResponse {
            warning_count: user.warning_count,
            warning_1: user.warning_1,
            warning_2: user.warning_2,
        }),
    ))
}

// =========================================================================
// POST /api/add-warning/{id}
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct WarningRequest {
    #[serde(default)]
    pub text: Option<String>,
}

async fn add_warning(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(body): Json<WarningRequest>,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    if !authorize(principal.role, Capability::IssueWarnings) {
        return Err(ApiError::forbidden(
            "To perform this operation you must be an Administrator or a Moderator",
        ));
    }

    let text = body.text.as_deref().map(str::trim).unwrap_or("");
    if text.len() < 5 || text.len() > 100 {
        return Err(ApiError::validation(vec![FieldError::new(
            "text",
            "The text must be 5-100 characters",
        )]));
    }

    let outcome = state.store.add_warning(id, text).await.map_err(|e| match e {
        StoreError::NotFound => ApiError::bad_request("This user does not exist"),
        other => ApiError::from(other),
    })?;

    let msg = match outcome {
        WarningOutcome::First => "First warning added successfully",
        WarningOutcome::SecondLocked => {
            "Second warning added successfully. The account has been locked"
        }
    };

    tracing::info!(user_id = %id, issued_by = %principal.id, ?outcome, "warning issued");

    Ok((StatusCode::ACCEPTED, Json(MsgResponse::new(msg))))
}

// =========================================================================
// Name and email edits — self-service and admin variants
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct EditNameRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditEmailRequest {
    #[serde(default)]
    pub email: Option<String>,
}

fn validate_name(body: &EditNameRequest) -> Result<String, ApiError> {
    let name = body.name.as_deref().map(str::trim).unwrap_or("").to_string();
    if name.is_empty() || name.len() > 30 {
        return Err(ApiError::validation(vec![FieldError::new(
            "name",
            "The name must be 1-30 characters",
        )]));
    }
    Ok(name)
}

fn validate_email(body: &EditEmailRequest) -> Result<String, ApiError> {
    let email = body
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if !email.contains('@') || email.len() < 3 {
        return Err(ApiError::validation(vec![FieldError::new(
            "email",
            "The email must be a valid address",
        )]));
    }
    Ok(email)
}

async fn apply_name_edit(state: &AppState, id: i64, name: &str) -> Result<(), ApiError> {
    if state.store.find_user(id).await?.is_none() {
        return Err(ApiError::bad_request("This user does not exist"));
    }
    if !state.store.update_user_name(id, name).await? {
        return Err(ApiError::not_acceptable("The user could not be updated"));
    }
    Ok(())
}

async fn apply_email_edit(state: &AppState, id: i64, email: &str) -> Result<(), ApiError> {
    if state.store.find_user(id).await?.is_none() {
        return Err(ApiError::bad_request("This user does not exist"));
    }
    if let Some(existing) = state.store.find_user_by_email(email).await? {
        if existing.id != id {
            return Err(ApiError::validation(vec![FieldError::new(
                "email",
                "The email has already been taken",
            )]));
        }
    }
    if !state.store.update_user_email(id, email).await? {
        return Err(ApiError::not_acceptable("The user could not be updated"));
    }
    Ok(())
}

async fn edit_own_name(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<EditNameRequest>,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    let name = validate_name(&body)?;
    apply_name_edit(&state, principal.id, &name).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MsgResponse::new("The name has been updated successfully")),
    ))
}

async fn edit_user_name(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(body): Json<EditNameRequest>,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    require_user_admin(&principal)?;
    let name = validate_name(&body)?;
    apply_name_edit(&state, id, &name).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MsgResponse::new("The name has been updated successfully")),
    ))
}

async fn edit_own_email(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<EditEmailRequest>,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    let email = validate_email(&body)?;
    apply_email_edit(&state, principal.id, &email).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MsgResponse::new("The email has been updated successfully")),
    ))
}

async fn edit_user_email(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(body): Json<EditEmailRequest>,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    require_user_admin(&principal)?;
    let email = validate_email(&body)?;
    apply_email_edit(&state, id, &email).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MsgResponse::new("The email has been updated successfully")),
    ))
}

// =========================================================================
// PUT /api/active-desactive-account/{id}
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct ToggleActiveRequest {
    #[serde(default)]
    pub value: Option<i32>,
}

async fn active_desactive_account(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(body): Json<ToggleActiveRequest>,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    require_user_admin(&principal)?;

    let active = match body.value {
        Some(1) => true,
        Some(0) => false,
        _ => return Err(ApiError::not_acceptable("Value not allowed")),
    };

    if !state.store.set_user_active(id, active).await? {
        return Err(ApiError::bad_request("This user does not exist"));
    }

    let msg = if active {
        "The account has been activated successfully"
    } else {
        "The account has been deactivated successfully"
    };

    tracing::info!(user_id = %id, active, changed_by = %principal.id, "account toggled");

    Ok((StatusCode::ACCEPTED, Json(MsgResponse::new(msg))))
}

// =========================================================================
// Account deletion — self-service and admin variants
// =========================================================================

async fn delete_own_account(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    if !state.store.delete_user(principal.id).await? {
        return Err(ApiError::not_found("This user does not exist"));
    }

    tracing::info!(user_id = %principal.id, "account self-deleted");

    Ok((
        StatusCode::ACCEPTED,
        Json(MsgResponse::new("The account has been deleted successfully")),
    ))
}

async fn delete_account(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    require_user_admin(&principal)?;

    if !state.store.delete_user(id).await? {
        return Err(ApiError::not_found("This user does not exist"));
    }

    tracing::info!(user_id = %id, deleted_by = %principal.id, "account deleted");

    Ok((
        StatusCode::ACCEPTED,
        Json(MsgResponse::new("The account has been deleted successfully")),
    ))
}
