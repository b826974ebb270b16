pub mod auth;
pub mod comments;
pub mod courts;
pub mod health;
pub mod reservations;
pub mod users;

use axum::Router;
use serde::Serialize;

use crate::AppState;

/// Plain acknowledgment body used by every mutation that has nothing else
/// to return.
#[derive(Debug, Serialize)]
pub struct MsgResponse {
    pub msg: String,
}

impl MsgResponse {
    pub fn new(msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().merge(health::router()).nest(
        "/api",
        auth::router()
            .merge(courts::router())
            .merge(comments::router())
            .merge(reservations::router())
            .merge(users::router()),
    )
}
