//! Storage surface of the service.
//!
//! Handlers talk to a [`Store`] trait object held in the application state;
//! [`crate::db::pg::PgStore`] backs production and
//! [`crate::db::memory::MemoryStore`] backs the integration tests and local
//! demos. Each method is one independent operation against the relational
//! store; the warning transition is the only multi-step mutation and is
//! specified to be atomic.

use async_trait::async_trait;

use crate::models::comment::{Comment, NewComment};
use crate::models::court::{Court, CourtChanges, NewCourt};
use crate::models::reservation::{NewReservation, Reservation};
use crate::models::user::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("account already carries two warnings")]
    AlreadyLocked,
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Pool(#[from] diesel_async::pooled_connection::deadpool::PoolError),
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
}

/// Which warning slot a transition filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningOutcome {
    /// First strike recorded; account stays active.
    First,
    /// Second strike recorded; account locked.
    SecondLocked,
}

/// Decide the warning transition for the current strike count.
///
/// Two strikes lock the account; a third attempt is rejected explicitly
/// rather than silently re-saved.
pub fn warning_transition(warning_count: i32) -> Result<WarningOutcome, StoreError> {
    match warning_count {
        0 => Ok(WarningOutcome::First),
        1 => Ok(WarningOutcome::SecondLocked),
        _ => Err(StoreError::AlreadyLocked),
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    // --- Users ---
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError>;
    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn update_user_name(&self, id: i64, name: &str) -> Result<bool, StoreError>;
    async fn update_user_email(&self, id: i64, email: &str) -> Result<bool, StoreError>;
    async fn set_user_active(&self, id: i64, active: bool) -> Result<bool, StoreError>;
    /// Record a warning strike atomically: read the count, fill the matching
    /// slot, bump the count, and lock the account on the second strike.
    async fn add_warning(&self, id: i64, text: &str) -> Result<WarningOutcome, StoreError>;
    async fn delete_user(&self, id: i64) -> Result<bool, StoreError>;

    // --- Courts ---
    async fn insert_court(&self, new: NewCourt) -> Result<Court, StoreError>;
    async fn update_court(&self, id: i64, changes: CourtChanges)
        -> Result<Option<Court>, StoreError>;
    async fn find_court(&self, id: i64) -> Result<Option<Court>, StoreError>;
    async fn list_courts(&self) -> Result<Vec<Court>, StoreError>;
    async fn delete_court(&self, id: i64) -> Result<bool, StoreError>;

    // --- Reservations ---
    async fn insert_reservation(&self, new: NewReservation) -> Result<Reservation, StoreError>;
    async fn find_reservation(&self, id: i64) -> Result<Option<Reservation>, StoreError>;
    async fn list_reservations(&self) -> Result<Vec<Reservation>, StoreError>;
    async fn reservations_for_user(&self, user_id: i64) -> Result<Vec<Reservation>, StoreError>;
    async fn reservations_for_court_and_user(
        &self,
        court_id: i64,
        user_id: i64,
    ) -> Result<Vec<Reservation>, StoreError>;
    async fn delete_reservation(&self, id: i64) -> Result<bool, StoreError>;

    // --- Comments ---
    async fn insert_comment(&self, new: NewComment) -> Result<Comment, StoreError>;
    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError>;
    async fn comments_for_court(&self, court_id: i64) -> Result<Vec<Comment>, StoreError>;
    async fn delete_comment(&self, id: i64) -> Result<bool, StoreError>;
    /// (likes, dislikes) for a court, computed from its comments.
    async fn like_counts(&self, court_id: i64) -> Result<(i64, i64), StoreError>;
}
