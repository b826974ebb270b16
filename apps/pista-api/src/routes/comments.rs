//! Per-court comments with a like/dislike flag.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::Principal;
use crate::auth::policy::{authorize, Capability};
use crate::error::{ApiError, FieldError};
use crate::models::comment::{Comment, NewComment};
use crate::routes::MsgResponse;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get-comments/{court_id}", get(get_comments))
        .route("/add-comment/{court_id}", post(add_comment))
        .route("/delete-comment/{id}", delete(delete_comment))
}

// =========================================================================
// GET /api/get-comments/{court_id}
// =========================================================================

#[derive(Debug, Serialize)]
struct CommentsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<Vec<Comment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    msg: Option<&'static str>,
}

async fn get_comments(
    State(state): State<AppState>,
    Path(court_id): Path<i64>,
) -> Result<(StatusCode, Json<CommentsResponse>), ApiError> {
    let comments = state.store.comments_for_court(court_id).await?;

    if comments.is_empty() {
        return Ok((
            StatusCode::ACCEPTED,
            Json(CommentsResponse {
                comments: None,
                msg: Some("This court has no comments"),
            }),
        ));
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(CommentsResponse {
            comments: Some(comments),
            msg: None,
        }),
    ))
}

// =========================================================================
// POST /api/add-comment/{court_id}
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    // The field must be present; an empty string is a valid comment.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "like")]
    pub liked: Option<bool>,
}

#[derive(Debug, Serialize)]
struct AddCommentResponse {
    msg: &'static str,
    comment: Comment,
}

async fn add_comment(
    State(state): State<AppState>,
    principal: Principal,
    Path(court_id): Path<i64>,
    Json(body): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<AddCommentResponse>), ApiError> {
    let mut errors: Vec<FieldError> = Vec::new();

    let text = match body.text {
        Some(text) => text,
        None => {
            errors.push(FieldError::new("text", "The text field is required"));
            String::new()
        }
    };

    let liked = match body.liked {
        Some(liked) => liked,
        None => {
            errors.push(FieldError::new("like", "The like field is required"));
            false
        }
    };

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    if state.store.find_court(court_id).await?.is_none() {
        return Err(ApiError::not_found("This court does not exist"));
    }

    let comment = state
        .store
        .insert_comment(NewComment {
            text,
            liked,
            user_id: principal.id,
            court_id,
        })
        .await?;

    tracing::info!(comment_id = %comment.id, court_id, "comment added");

    Ok((
        StatusCode::ACCEPTED,
        Json(AddCommentResponse {
            msg: "Comment added successfully",
            comment,
        }),
    ))
}

// =========================================================================
// DELETE /api/delete-comment/{id}
// =========================================================================

async fn delete_comment(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    let comment = state
        .store
        .find_comment(id)
        .await?
        .ok_or_else(|| ApiError::not_found("This comment does not exist"))?;

    if comment.user_id != principal.id && !authorize(principal.role, Capability::ModerateComments) {
        return Err(ApiError::forbidden(
            "You need to be a Moderator or the owner of this comment to perform this operation",
        ));
    }

    state.store.delete_comment(id).await?;

    tracing::info!(comment_id = %id, deleted_by = %principal.id, "comment deleted");

    Ok((
        StatusCode::ACCEPTED,
        Json(MsgResponse::new("The comment has been deleted successfully")),
    ))
}
