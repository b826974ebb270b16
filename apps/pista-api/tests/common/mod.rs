use std::sync::Arc;

use axum::Router;
use pista_api::auth::tokens;
use pista_api::config::Config;
use pista_api::db::memory::MemoryStore;
use pista_api::models::court::{Court, NewCourt};
use pista_api::models::reservation::{NewReservation, Reservation};
use pista_api::models::user::{NewUser, User};
use pista_api::AppState;

pub const TEST_PASSWORD: &str = "password123";

/// Build the full application [`Router`] over a fresh in-memory store.
pub fn test_app() -> (Router, AppState) {
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config: Arc::new(Config {
            database_url: String::new(),
            jwt_secret: "test-secret".to_string(),
            port: 0,
        }),
    };
    let app = pista_api::routes::router().with_state(state.clone());
    (app, state)
}

/// Create a user with the given role id and a unique email.
///
/// The password hash matches [`TEST_PASSWORD`] so login tests can use it.
pub async fn create_test_user(state: &AppState, role_id: i64) -> User {
    let suffix: u32 = rand::random();

    let password_hash = pista_api::routes::auth::hash_password(TEST_PASSWORD).expect("argon2 hash");

    state
        .store
        .insert_user(NewUser {
            name: format!("Test{suffix}"),
            surname: "User".to_string(),
            image_path: None,
            email: format!("test_{suffix}@example.com"),
            password_hash,
            role_id,
        })
        .await
        .expect("insert test user")
}

/// Mint a bearer token for the given user id with the test signing secret.
pub fn token_for(state: &AppState, user_id: i64) -> String {
    tokens::mint_token(&state.config.jwt_secret, user_id).expect("mint token")
}

/// Create a schedule-mode court (opening hours, no capacity).
pub async fn create_schedule_court(state: &AppState, available: bool) -> Court {
    state
        .store
        .insert_court(NewCourt {
            name: "Center Court".to_string(),
            address: "1 Main St".to_string(),
            image_path: "public/images/court/default.svg".to_string(),
            start_time: Some("09:00".to_string()),
            end_time: Some("21:00".to_string()),
            capacity: None,
            price_per_hour: 12.5,
            available,
            open_air: true,
            lighting: true,
            floor_id: 1,
            sport_id: 1,
        })
        .await
        .expect("insert test court")
}

/// Create a capacity-mode court (the climbing wall).
pub async fn create_capacity_court(state: &AppState) -> Court {
    state
        .store
        .insert_court(NewCourt {
            name: "Climbing Wall".to_string(),
            address: "1 Main St".to_string(),
            image_path: "public/images/court/default.svg".to_string(),
            start_time: None,
            end_time: None,
            capacity: Some(20),
            price_per_hour: 8.0,
            available: true,
            open_air: false,
            lighting: true,
            floor_id: 2,
            sport_id: 5,
        })
        .await
        .expect("insert test court")
}

/// Insert a schedule reservation directly through the store.
pub async fn create_test_reservation(
    state: &AppState,
    court_id: i64,
    user_id: i64,
) -> Reservation {
    state
        .store
        .insert_reservation(NewReservation {
            start_time: Some("10:00".to_string()),
            end_time: Some("11:00".to_string()),
            list_number: None,
            user_id,
            court_id,
        })
        .await
        .expect("insert test reservation")
}
