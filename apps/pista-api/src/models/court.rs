use diesel::prelude::*;
use serde::Serialize;

use crate::db::schema::courts;

/// Court ("pista") row. Exactly one of the schedule pair or the capacity is
/// populated, decided by the sport (see [`crate::slots`]).
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = courts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Court {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub image_path: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_hour: f64,
    pub available: bool,
    pub open_air: bool,
    pub lighting: bool,
    pub floor_id: i64,
    pub sport_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courts)]
pub struct NewCourt {
    pub name: String,
    pub address: String,
    pub image_path: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_hour: f64,
    pub available: bool,
    pub open_air: bool,
    pub lighting: bool,
    pub floor_id: i64,
    pub sport_id: i64,
}

/// Full replacement of an existing court. `None` writes NULL so that an edit
/// switching the court's mode clears the fields of the previous mode.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courts)]
#[diesel(treat_none_as_null = true)]
pub struct CourtChanges {
    pub name: String,
    pub address: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_hour: f64,
    pub available: bool,
    pub open_air: bool,
    pub lighting: bool,
    pub floor_id: i64,
    pub sport_id: i64,
}
