//! Reservation admission and lifecycle.
//!
//! The shape of a booking depends on the court's sport: schedule courts take
//! a start/end time pair, the climbing wall takes a position in its capacity
//! list. Admission checks the court exists and is available before the shape
//! is validated.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::middleware::Principal;
use crate::auth::policy::{authorize, Capability, Role};
use crate::error::{ApiError, FieldError};
use crate::models::reservation::{NewReservation, Reservation};
use crate::routes::MsgResponse;
use crate::slots::{validate_slot_shape, SlotShapeError};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get-bookings", get(get_bookings))
        .route("/exists-reserve/{court_id}/{user_id}", get(exists_reserve))
        .route("/get-booking-user/{user_id}", get(get_booking_user))
        .route("/add-reserve", post(add_reserve))
        .route("/delete-reserve/{id}", delete(delete_reserve))
}

// =========================================================================
// GET /api/get-bookings — Every reservation in the system (admin only)
// =========================================================================

#[derive(Debug, Serialize)]
struct BookingsResponse {
    bookings: Vec<Reservation>,
}

async fn get_bookings(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<(StatusCode, Json<BookingsResponse>), ApiError> {
    if !authorize(principal.role, Capability::ViewAllReservations) {
        return Err(ApiError::forbidden(
            "You need to be an Administrator to perform this operation",
        ));
    }

    let bookings = state.store.list_reservations().await?;
    Ok((StatusCode::ACCEPTED, Json(BookingsResponse { bookings })))
}

// =========================================================================
// GET /api/exists-reserve/{court_id}/{user_id}
// =========================================================================

#[derive(Debug, Serialize)]
struct ExistsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    booking: Option<Vec<Reservation>>,
    exists: bool,
}

/// Probe whether a user holds any reservation on a court. The negative case
/// is reported as 404 with `exists: false` rather than an error body.
async fn exists_reserve(
    State(state): State<AppState>,
    _principal: Principal,
    Path((court_id, user_id)): Path<(i64, i64)>,
) -> Result<(StatusCode, Json<ExistsResponse>), ApiError> {
    let bookings = state
        .store
        .reservations_for_court_and_user(court_id, user_id)
        .await?;

    if bookings.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(ExistsResponse {
                booking: None,
                exists: false,
            }),
        ));
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(ExistsResponse {
            booking: Some(bookings),
            exists: true,
        }),
    ))
}

// =========================================================================
// GET /api/get-booking-user/{user_id}
// =========================================================================

#[derive(Debug, Serialize)]
struct UserBookingsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    bookings: Option<Vec<Reservation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    msg: Option<&'static str>,
}

async fn get_booking_user(
    State(state): State<AppState>,
    _principal: Principal,
    Path(user_id): Path<i64>,
) -> Result<(StatusCode, Json<UserBookingsResponse>), ApiError> {
    let bookings = state.store.reservations_for_user(user_id).await?;

    if bookings.is_empty() {
        return Ok((
            StatusCode::ACCEPTED,
            Json(UserBookingsResponse {
                bookings: None,
                msg: Some("You have no reservations"),
            }),
        ));
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(UserBookingsResponse {
            bookings: Some(bookings),
            msg: None,
        }),
    ))
}

// =========================================================================
// POST /api/add-reserve
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct AddReserveRequest {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub list_number: Option<i32>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub court_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct AddReserveResponse {
    msg: &'static str,
    reserve: Reservation,
}

async fn add_reserve(
    State(state): State<AppState>,
    _principal: Principal,
    Json(body): Json<AddReserveRequest>,
) -> Result<(StatusCode, Json<AddReserveResponse>), ApiError> {
    let mut errors: Vec<FieldError> = Vec::new();

    let user_id = match body.user_id {
        Some(user_id) => user_id,
        None => {
            errors.push(FieldError::new("user_id", "The user id is required"));
            0
        }
    };

    let court_id = match body.court_id {
        Some(court_id) => court_id,
        None => {
            errors.push(FieldError::new("court_id", "The court id is required"));
            0
        }
    };

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let court = state
        .store
        .find_court(court_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("The court for this reservation does not exist"))?;

    if !court.available {
        return Err(ApiError::not_found("This court is not available"));
    }

    validate_slot_shape(
        court.sport_id,
        body.start_time.clone(),
        body.end_time.clone(),
        body.list_number,
    )
    .map_err(|e| match e {
        SlotShapeError::NeedsSlot => {
            ApiError::bad_request("This reservation must have a list number, not a schedule")
        }
        SlotShapeError::NeedsSchedule => {
            ApiError::bad_request("This reservation must have a schedule, not a list number")
        }
    })?;

    let reserve = state
        .store
        .insert_reservation(NewReservation {
            start_time: body.start_time,
            end_time: body.end_time,
            list_number: body.list_number,
            user_id,
            court_id,
        })
        .await?;

    tracing::info!(reservation_id = %reserve.id, court_id, user_id, "reservation added");

    Ok((
        StatusCode::ACCEPTED,
        Json(AddReserveResponse {
            msg: "Reservation added successfully",
            reserve,
        }),
    ))
}

// =========================================================================
// DELETE /api/delete-reserve/{id}
// =========================================================================

async fn delete_reserve(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<MsgResponse>), ApiError> {
    let reservation = state
        .store
        .find_reservation(id)
        .await?
        .ok_or_else(|| ApiError::bad_request("This reservation does not exist"))?;

    if reservation.user_id != principal.id && principal.role != Role::Admin {
        return Err(ApiError::forbidden(
            "You need to be an Administrator or the owner of this reservation to perform this operation",
        ));
    }

    state.store.delete_reservation(id).await?;

    tracing::info!(reservation_id = %id, deleted_by = %principal.id, "reservation deleted");

    Ok((
        StatusCode::ACCEPTED,
        Json(MsgResponse::new(
            "The reservation has been deleted successfully",
        )),
    ))
}
