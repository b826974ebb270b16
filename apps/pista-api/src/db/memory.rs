//! In-memory [`Store`] implementation.
//!
//! Backs the integration tests and local demos with the same observable
//! behavior as the PostgreSQL store: sequential ids, insertion order on
//! listings, and the same warning-transition rules.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::db::store::{warning_transition, Store, StoreError, WarningOutcome};
use crate::models::comment::{Comment, NewComment};
use crate::models::court::{Court, CourtChanges, NewCourt};
use crate::models::reservation::{NewReservation, Reservation};
use crate::models::user::{NewUser, User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    courts: Vec<Court>,
    reservations: Vec<Reservation>,
    comments: Vec<Comment>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut tables = self.inner.lock().await;
        if tables.users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::Conflict(
                "The email has already been taken".to_string(),
            ));
        }
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            name: new.name,
            surname: new.surname,
            image_path: new.image_path,
            warning_count: 0,
            active: true,
            warning_1: None,
            warning_2: None,
            email: new.email,
            password_hash: new.password_hash,
            role_id: new.role_id,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables.users.clone())
    }

    async fn update_user_name(&self, id: i64, name: &str) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().await;
        match tables.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.name = name.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_user_email(&self, id: i64, email: &str) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().await;
        match tables.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.email = email.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_user_active(&self, id: i64, active: bool) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().await;
        match tables.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.active = active;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_warning(&self, id: i64, text: &str) -> Result<WarningOutcome, StoreError> {
        let mut tables = self.inner.lock().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;

        let outcome = warning_transition(user.warning_count)?;
        match outcome {
            WarningOutcome::First => {
                user.warning_1 = Some(text.to_string());
                user.warning_count = 1;
            }
            WarningOutcome::SecondLocked => {
                user.warning_2 = Some(text.to_string());
                user.warning_count = 2;
                user.active = false;
            }
        }
        user.updated_at = Utc::now();
        Ok(outcome)
    }

    async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() < before)
    }

    async fn insert_court(&self, new: NewCourt) -> Result<Court, StoreError> {
        let mut tables = self.inner.lock().await;
        let court = Court {
            id: tables.next_id(),
            name: new.name,
            address: new.address,
            image_path: new.image_path,
            start_time: new.start_time,
            end_time: new.end_time,
            capacity: new.capacity,
            price_per_hour: new.price_per_hour,
            available: new.available,
            open_air: new.open_air,
            lighting: new.lighting,
            floor_id: new.floor_id,
            sport_id: new.sport_id,
        };
        tables.courts.push(court.clone());
        Ok(court)
    }

    async fn update_court(
        &self,
        id: i64,
        changes: CourtChanges,
    ) -> Result<Option<Court>, StoreError> {
        let mut tables = self.inner.lock().await;
        match tables.courts.iter_mut().find(|c| c.id == id) {
            Some(court) => {
                court.name = changes.name;
                court.address = changes.address;
                court.start_time = changes.start_time;
                court.end_time = changes.end_time;
                court.capacity = changes.capacity;
                court.price_per_hour = changes.price_per_hour;
                court.available = changes.available;
                court.open_air = changes.open_air;
                court.lighting = changes.lighting;
                court.floor_id = changes.floor_id;
                court.sport_id = changes.sport_id;
                Ok(Some(court.clone()))
            }
            None => Ok(None),
        }
    }

    async fn find_court(&self, id: i64) -> Result<Option<Court>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables.courts.iter().find(|c| c.id == id).cloned())
    }

    async fn list_courts(&self) -> Result<Vec<Court>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables.courts.clone())
    }

    async fn delete_court(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().await;
        let before = tables.courts.len();
        tables.courts.retain(|c| c.id != id);
        Ok(tables.courts.len() < before)
    }

    async fn insert_reservation(&self, new: NewReservation) -> Result<Reservation, StoreError> {
        let mut tables = self.inner.lock().await;
        let reservation = Reservation {
            id: tables.next_id(),
            start_time: new.start_time,
            end_time: new.end_time,
            list_number: new.list_number,
            user_id: new.user_id,
            court_id: new.court_id,
            created_at: Utc::now(),
        };
        tables.reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn find_reservation(&self, id: i64) -> Result<Option<Reservation>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables.reservations.iter().find(|r| r.id == id).cloned())
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables.reservations.clone())
    }

    async fn reservations_for_user(&self, user_id: i64) -> Result<Vec<Reservation>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn reservations_for_court_and_user(
        &self,
        court_id: i64,
        user_id: i64,
    ) -> Result<Vec<Reservation>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .reservations
            .iter()
            .filter(|r| r.court_id == court_id && r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_reservation(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().await;
        let before = tables.reservations.len();
        tables.reservations.retain(|r| r.id != id);
        Ok(tables.reservations.len() < before)
    }

    async fn insert_comment(&self, new: NewComment) -> Result<Comment, StoreError> {
        let mut tables = self.inner.lock().await;
        let comment = Comment {
            id: tables.next_id(),
            text: new.text,
            liked: new.liked,
            user_id: new.user_id,
            court_id: new.court_id,
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn comments_for_court(&self, court_id: i64) -> Result<Vec<Comment>, StoreError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.court_id == court_id)
            .cloned()
            .collect())
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.inner.lock().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        Ok(tables.comments.len() < before)
    }

    async fn like_counts(&self, court_id: i64) -> Result<(i64, i64), StoreError> {
        let tables = self.inner.lock().await;
        let likes = tables
            .comments
            .iter()
            .filter(|c| c.court_id == court_id && c.liked)
            .count() as i64;
        let dislikes = tables
            .comments
            .iter()
            .filter(|c| c.court_id == court_id && !c.liked)
            .count() as i64;
        Ok((likes, dislikes))
    }
}
