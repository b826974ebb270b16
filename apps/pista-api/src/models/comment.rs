use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::db::schema::comments;

/// Per-court comment with a like/dislike flag, owned by its author.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: i64,
    pub text: String,
    #[serde(rename = "like")]
    pub liked: bool,
    pub user_id: i64,
    pub court_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment {
    pub text: String,
    pub liked: bool,
    pub user_id: i64,
    pub court_id: i64,
}
