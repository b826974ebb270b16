//! Court catalog: public reads, admin-gated writes.
//!
//! The write path shares its slot-shape rule with reservation admission: a
//! climbing-wall court carries a capacity, every other court carries opening
//! hours, and never both.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::Principal;
use crate::auth::policy::{authorize, Capability};
use crate::error::{ApiError, FieldError};
use crate::models::court::{Court, CourtChanges, NewCourt};
use crate::routes::MsgResponse;
use crate::slots::{validate_slot_shape, SlotShapeError};
use crate::AppState;

const DEFAULT_COURT_IMAGE: &str = "public/images/court/default.svg";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get-courts", get(get_courts))
        .route("/get-court/{id}", get(get_court))
        .route(
            "/get-likes-and-dislikes/{id}",
            get(get_likes_and_dislikes),
        )
        .route("/add-court", post(add_court))
        .route("/edit-court/{id}", put(edit_court))
        .route("/delete-court/{id}", delete(delete_court))
}

fn require_court_admin(principal: &Principal) -> Result<(), ApiError> {
    if !authorize(principal.role, Capability::ManageCourts) {
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
struct CourtsResponse {
    courts: Vec<Court>,
}

async fn get_courts(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CourtsResponse>), ApiError> {
    let courts = state.store.list_courts().await?;
    Ok((StatusCode::ACCEPTED, Json(CourtsResponse { courts })))
}

#[derive(Debug, Serialize)]
struct CourtResponse {
    court: Court,
}

async fn get_court(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<CourtResponse>), ApiError> {
    let court = state
        .store
        .find_court(id)
        .await?
        .ok_or_else(|| ApiError::not_found("This court does not exist"))?;
    Ok((StatusCode::ACCEPTED, Json(CourtResponse { court })))
}

#[derive(Debug, Serialize)]
struct LikesResponse {
    likes: i64,
    dislikes: i64,
}

async fn get_likes_and_dislikes(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<LikesResponse>), ApiError> {
    let (likes, dislikes) = state.store.like_counts(id).await?;
    Ok((StatusCode::ACCEPTED, Json(LikesResponse { likes, dislikes })))
}

// =========================================================================
// Writes (admin only)
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct CourtRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub price_per_hour: Option<f64>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub open_air: Option<bool>,
    #[serde(default)]
    pub lighting: Option<bool>,
    #[serde(default)]
    pub floor_id: Option<i64>,
    #[serde(default)]
    pub sport_id: Option<i64>,
}

/// Validated write payload, shared by create and edit.
struct ValidatedCourt {
    name: String,
    address: String,
    start_time: Option<String>,
    end_time: Option<String>,
    capacity: Option<i32>,
    price_per_hour: f64,
    available: bool,
    open_air: bool,
    lighting: bool,
    floor_id: i64,
    sport_id: i64,
}

fn validate_court(body: &CourtRequest) -> Result<ValidatedCourt, ApiError> {
    let mut errors: Vec<FieldError> = Vec::new();

    let name = body.name.as_deref().map(str::trim).unwrap_or("").to_string();
    if name.is_empty() || name.len() > 50 {
        errors.push(FieldError::new("name", "The name must be 1-50 characters"));
    }

    let address = body
        .address
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .to_string();
    if address.is_empty() || address.len() > 100 {
        errors.push(FieldError::new(
            "address",
            "The address must be 1-100 characters",
        ));
    }

    let price_per_hour = match body.price_per_hour {
        Some(price) => price,
        None => {
            errors.push(FieldError::new(
                "price_per_hour",
                "The price per hour is required",
            ));
            0.0
        }
    };

    let available = match body.available {
        Some(v) => v,
        None => {
            errors.push(FieldError::new("available", "The availability is required"));
            false
        }
    };

    let open_air = match body.open_air {
        Some(v) => v,
        None => {
            errors.push(FieldError::new("open_air", "The open air flag is required"));
            false
        }
    };

    let lighting = match body.lighting {
        Some(v) => v,
        None => {
            errors.push(FieldError::new("lighting", "The lighting flag is required"));
            false
        }
    };

    let floor_id = match body.floor_id {
        Some(v) => v,
        None => {
            errors.push(FieldError::new("floor_id", "The floor id is required"));
            0
        }
    };

    let sport_id = match body.sport_id {
        Some(v) => v,
        None => {
            errors.push(FieldError::new("sport_id", "The sport id is required"));
            0
        }
    };

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    // The mode is dictated by the submitted sport: switching a court between
    // sports re-validates the slot fields against the new mode.
    validate_slot_shape(
        sport_id,
        body.start_time.clone(),
        body.end_time.clone(),
        body.capacity,
    )
    .map_err(|e| match e {
        SlotShapeError::NeedsSlot => {
            ApiError::bad_request("The climbing wall must have a capacity, not a schedule")
        }
        SlotShapeError::NeedsSchedule => {
            ApiError::bad_request("This court must have a schedule, not a capacity")
        }
    })?;

    Ok(ValidatedCourt {
        name,
        address,
        start_time: body.start_time.clone(),
        end_time: body.end_time.clone(),
        capacity: body.capacity,
        price_per_hour,
        available,
        open_air,
        lighting,
        floor_id,
        sport_id,
    })
}

async fn add_court(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<CourtRequest>,
) -> Result<(StatusCode, Json<CourtResponse>), ApiError> {
    require_court_admin(&principal)?;
    let valid = validate_court(&body)?;

    let court = state
        .store
        .insert_court(NewCourt {
            name: valid.name,
            address: valid.address,
            image_path: body
                .image_path
                .unwrap_or_else(|| DEFAULT_COURT_IMAGE.to_string()),
            start_time: valid.start_time,
            end_time: valid.end_time,
            capacity: valid.capacity,
            price_per_hour: valid.price_per_hour,
            available: valid.available,
            open_air: valid.open_air,
            lighting: valid.lighting,
            floor_id: valid.floor_id,
            sport_id: valid.sport_id,
        })
        .await?;

    tracing::info!(court_id = %court.id, "court added");

    Ok((StatusCode::ACCEPTED, Json(CourtResponse { court })))
}

async fn edit_court(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(body): Json<CourtRequest>,
) -> Result<(StatusCode, Json<CourtResponse>), ApiError> {
    require_court_admin(&principal)?;
    let valid = validate_court(&body)?;

    let court = state
        .store
        .update_court(
            id,
            CourtChanges {
                name: valid.name,
                address: valid.address,
                start_time: valid.start_time,
                end_time: valid.end_time,
                capacity: valid.capacity,
                price_per_hour: valid.price_per_hour,
                available: valid.available,
                open_air: valid.open_air,
                lighting: valid.lighting,
                floor_id: valid.floor_id,
                sport_id: valid.sport_id,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("This court does not exist"))?;

    tracing::info!(court_id = %court.id, "court edited");

    Ok((StatusCode::ACCEPTED, Json(CourtResponse { court })))
}

async fn delete_court(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    require_court_admin(&principal)?;

    if !state.store.delete_court(id).await? {
        return Err(ApiError::not_found("This court does not exist"));
    }

    tracing::info!(court_id = %id, "court deleted");

    Ok((
        StatusCode::ACCEPTED,
        Json(MsgResponse::new("The court has been deleted successfully")),
    ))
}
