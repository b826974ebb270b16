use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::db::schema::reservations;

/// Reservation row. The slot fields mirror the court's mode at creation
/// time: a schedule pair for schedule-mode courts, a list number for the
/// climbing wall.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Reservation {
    pub id: i64,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub list_number: Option<i32>,
    pub user_id: i64,
    pub court_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservations)]
pub struct NewReservation {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub list_number: Option<i32>,
    pub user_id: i64,
    pub court_id: i64,
}
