//! PostgreSQL-backed [`Store`] implementation (diesel-async over deadpool).

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::pool::DbPool;
use crate::db::schema::{comments, courts, reservations, users};
use crate::db::store::{warning_transition, Store, StoreError, WarningOutcome};
use crate::models::comment::{Comment, NewComment};
use crate::models::court::{Court, CourtChanges, NewCourt};
use crate::models::reservation::{NewReservation, Reservation};
use crate::models::user::{NewUser, User};

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut conn = self.pool.get().await?;
        diesel::insert_into(users::table)
            .values(&new)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => StoreError::Conflict("The email has already been taken".to_string()),
                other => StoreError::Query(other),
            })
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await?;
        let user = users::table
            .find(id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await?;
        let user = users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows = users::table
            .order(users::id.asc())
            .select(User::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    async fn update_user_name(&self, id: i64, name: &str) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let updated = diesel::update(users::table.find(id))
            .set((users::name.eq(name), users::updated_at.eq(Utc::now())))
            .execute(&mut conn)
            .await?;
        Ok(updated > 0)
    }

    async fn update_user_email(&self, id: i64, email: &str) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let updated = diesel::update(users::table.find(id))
            .set((users::email.eq(email), users::updated_at.eq(Utc::now())))
            .execute(&mut conn)
            .await?;
        Ok(updated > 0)
    }

    async fn set_user_active(&self, id: i64, active: bool) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let updated = diesel::update(users::table.find(id))
            .set((users::active.eq(active), users::updated_at.eq(Utc::now())))
            .execute(&mut conn)
            .await?;
        Ok(updated > 0)
    }

    async fn add_warning(&self, id: i64, text: &str) -> Result<WarningOutcome, StoreError> {
        let mut conn = self.pool.get().await?;
        let text = text.to_string();

        // Row lock so concurrent strikes on the same account serialize
        // instead of both reading the same count.
        conn.transaction::<WarningOutcome, StoreError, _>(|conn| {
            async move {
                let user = users::table
                    .find(id)
                    .for_update()
                    .select(User::as_select())
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or(StoreError::NotFound)?;

                let outcome = warning_transition(user.warning_count)?;
                match outcome {
                    WarningOutcome::First => {
                        diesel::update(users::table.find(id))
                            .set((
                                users::warning_1.eq(&text),
                                users::warning_count.eq(1),
                                users::updated_at.eq(Utc::now()),
                            ))
                            .execute(conn)
                            .await?;
                    }
                    WarningOutcome::SecondLocked => {
                        diesel::update(users::table.find(id))
                            .set((
                                users::warning_2.eq(&text),
                                users::warning_count.eq(2),
                                users::active.eq(false),
                                users::updated_at.eq(Utc::now()),
                            ))
                            .execute(conn)
                            .await?;
                    }
                }
                Ok(outcome)
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(deleted > 0)
    }

    async fn insert_court(&self, new: NewCourt) -> Result<Court, StoreError> {
        let mut conn = self.pool.get().await?;
        let court = diesel::insert_into(courts::table)
            .values(&new)
            .returning(Court::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(court)
    }

    async fn update_court(
        &self,
        id: i64,
        changes: CourtChanges,
    ) -> Result<Option<Court>, StoreError> {
        let mut conn = self.pool.get().await?;
        let court = diesel::update(courts::table.find(id))
            .set(&changes)
            .returning(Court::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;
        Ok(court)
    }

    async fn find_court(&self, id: i64) -> Result<Option<Court>, StoreError> {
        let mut conn = self.pool.get().await?;
        let court = courts::table
            .find(id)
            .select(Court::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(court)
    }

    async fn list_courts(&self) -> Result<Vec<Court>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows = courts::table
            .order(courts::id.asc())
            .select(Court::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    async fn delete_court(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(courts::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(deleted > 0)
    }

    async fn insert_reservation(&self, new: NewReservation) -> Result<Reservation, StoreError> {
        let mut conn = self.pool.get().await?;
        let reservation = diesel::insert_into(reservations::table)
            .values(&new)
            .returning(Reservation::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(reservation)
    }

    async fn find_reservation(&self, id: i64) -> Result<Option<Reservation>, StoreError> {
        let mut conn = self.pool.get().await?;
        let reservation = reservations::table
            .find(id)
            .select(Reservation::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(reservation)
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows = reservations::table
            .order(reservations::id.asc())
            .select(Reservation::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    async fn reservations_for_user(&self, user_id: i64) -> Result<Vec<Reservation>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows = reservations::table
            .filter(reservations::user_id.eq(user_id))
            .order(reservations::id.asc())
            .select(Reservation::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    async fn reservations_for_court_and_user(
        &self,
        court_id: i64,
        user_id: i64,
    ) -> Result<Vec<Reservation>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows = reservations::table
            .filter(reservations::court_id.eq(court_id))
            .filter(reservations::user_id.eq(user_id))
            .order(reservations::id.asc())
            .select(Reservation::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    async fn delete_reservation(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(reservations::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(deleted > 0)
    }

    async fn insert_comment(&self, new: NewComment) -> Result<Comment, StoreError> {
        let mut conn = self.pool.get().await?;
        let comment = diesel::insert_into(comments::table)
            .values(&new)
            .returning(Comment::as_returning())
            .get_result(&mut conn)
            .await?;
        Ok(comment)
    }

    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, StoreError> {
        let mut conn = self.pool.get().await?;
        let comment = comments::table
            .find(id)
            .select(Comment::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(comment)
    }

    async fn comments_for_court(&self, court_id: i64) -> Result<Vec<Comment>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows = comments::table
            .filter(comments::court_id.eq(court_id))
            .order(comments::id.asc())
            .select(Comment::as_select())
            .load(&mut conn)
            .await?;
        Ok(rows)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(comments::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(deleted > 0)
    }

    async fn like_counts(&self, court_id: i64) -> Result<(i64, i64), StoreError> {
        let mut conn = self.pool.get().await?;
        let likes: i64 = comments::table
            .filter(comments::court_id.eq(court_id))
            .filter(comments::liked.eq(true))
            .count()
            .get_result(&mut conn)
            .await?;
        let dislikes: i64 = comments::table
            .filter(comments::court_id.eq(court_id))
            .filter(comments::liked.eq(false))
            .count()
            .get_result(&mut conn)
            .await?;
        Ok((likes, dislikes))
    }
}
