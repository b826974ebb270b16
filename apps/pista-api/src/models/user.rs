use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::db::schema::users;

/// Full user row from the database.
///
/// The password hash never leaves the service; the rest of the row is what
/// the admin and self-service endpoints return under the `user` key.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub image_path: Option<String>,
    pub warning_count: i32,
    pub active: bool,
    pub warning_1: Option<String>,
    pub warning_2: Option<String>,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for registration. Warning counters and the active flag
/// start at their column defaults (0, true).
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub image_path: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role_id: i64,
}
