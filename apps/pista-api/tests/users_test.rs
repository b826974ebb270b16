//! Integration tests for account administration: listing, warnings,
//! activation toggles, profile edits, and deletion.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

// =========================================================================
// GET /api/get-users and /api/get-user/{id}
// =========================================================================

#[tokio::test]
async fn moderator_can_list_users() {
    let (app, state) = common::test_app();
    let moderator = common::create_test_user(&state, 2).await;
    common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, moderator.id);
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/api/get-users").authorization_bearer(&token).await;

    resp.assert_status(StatusCode::ACCEPTED);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["users"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn regular_cannot_list_users() {
    let (app, state) = common::test_app();
    let regular = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, regular.id);
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/api/get-users").authorization_bearer(&token).await;

    resp.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn get_user_returns_account() {
    let (app, state) = common::test_app();
    let admin = common::create_test_user(&state, 1).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, admin.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get(&format!("/api/get-user/{}", user.id))
        .authorization_bearer(&token)
        .await;

    resp.assert_status(StatusCode::ACCEPTED);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["user"]["id"].as_i64(), Some(user.id));
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn get_unknown_user_is_400() {
    let (app, state) = common::test_app();
    let admin = common::create_test_user(&state, 1).await;
    let token = common::token_for(&state, admin.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/api/get-user/9999")
        .authorization_bearer(&token)
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["msg"].as_str(), Some("This user does not exist"));
}

// =========================================================================
// POST /api/add-warning/{id} — the two-strike ladder
// =========================================================================

#[tokio::test]
async fn first_warning_records_note() {
    let (app, state) = common::test_app();
    let moderator = common::create_test_user(&state, 2).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, moderator.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post(&format!("/api/add-warning/{}", user.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "text": "No-show on a booked slot" }))
        .await;

    resp.assert_status(StatusCode::ACCEPTED);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["msg"].as_str(), Some("First warning added successfully"));

    let stored = state
        .store
        .find_user(user.id)
        .await
        .expect("store lookup")
        .expect("user exists");
    assert_eq!(stored.warning_count, 1);
    assert_eq!(stored.warning_1.as_deref(), Some("No-show on a booked slot"));
    assert!(stored.active);
}

#[tokio::test]
async fn second_warning_locks_account() {
    let (app, state) = common::test_app();
    let admin = common::create_test_user(&state, 1).await;
    let user = common::create_test_user(&state, 3).await;
    state
        .store
        .add_warning(user.id, "First strike text")
        .await
        .expect("first warning");
    let token = common::token_for(&state, admin.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post(&format!("/api/add-warning/{}", user.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "text": "Second strike text" }))
        .await;

    resp.assert_status(StatusCode::ACCEPTED);
    let body: serde_json::Value = resp.json();
    assert_eq!(
        body["msg"].as_str(),
        Some("Second warning added successfully. The account has been locked")
    );

    let stored = state
        .store
        .find_user(user.id)
        .await
        .expect("store lookup")
        .expect("user exists");
    assert_eq!(stored.warning_count, 2);
    assert!(!stored.active);
}

#[tokio::test]
async fn third_warning_is_refused_with_conflict() {
    let (app, state) = common::test_app();
    let admin = common::create_test_user(&state, 1).await;
    let user = common::create_test_user(&state, 3).await;
    state
        .store
        .add_warning(user.id, "First strike text")
        .await
        .expect("first warning");
    state
        .store
        .add_warning(user.id, "Second strike text")
        .await
        .expect("second warning");
    let token = common::token_for(&state, admin.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post(&format!("/api/add-warning/{}", user.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "text": "Third strike text" }))
        .await;

    resp.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["msg"].as_str(), Some("This account is already locked"));
}

#[tokio::test]
async fn warning_text_length_is_validated() {
    let (app, state) = common::test_app();
    let moderator = common::create_test_user(&state, 2).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, moderator.id);
    let server = TestServer::new(app).unwrap();

    for text in ["shrt", "x".repeat(101).as_str()] {
        let resp = server
            .post(&format!("/api/add-warning/{}", user.id))
            .authorization_bearer(&token)
            .json(&serde_json::json!({ "text": text }))
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = resp.json();
        assert!(body["error"]["text"].is_array());
    }
}

#[tokio::test]
async fn regular_cannot_issue_warnings() {
    let (app, state) = common::test_app();
    let regular = common::create_test_user(&state, 3).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, regular.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post(&format!("/api/add-warning/{}", user.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "text": "Not your call" }))
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn warning_unknown_user_is_400() {
    let (app, state) = common::test_app();
    let admin = common::create_test_user(&state, 1).await;
    let token = common::token_for(&state, admin.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .post("/api/add-warning/9999")
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "text": "Nobody home here" }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["msg"].as_str(), Some("This user does not exist"));
}

// =========================================================================
// GET /api/get-warnings
// =========================================================================

#[tokio::test]
async fn get_warnings_reports_own_strikes() {
    let (app, state) = common::test_app();
    let user = common::create_test_user(&state, 3).await;
    state
        .store
        .add_warning(user.id, "Left the lights on")
        .await
        .expect("warning");
    let token = common::token_for(&state, user.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/api/get-warnings")
        .authorization_bearer(&token)
        .await;

    resp.assert_status(StatusCode::ACCEPTED);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["warning_count"].as_i64(), Some(1));
    assert_eq!(body["warning_1"].as_str(), Some("Left the lights on"));
    assert!(body["warning_2"].is_null());
}

// =========================================================================
// PUT /api/active-desactive-account/{id}
// =========================================================================

#[tokio::test]
async fn admin_toggles_account_active_flag() {
    let (app, state) = common::test_app();
    let admin = common::create_test_user(&state, 1).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, admin.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .put(&format!("/api/active-desactive-account/{}", user.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "value": 0 }))
        .await;

    resp.assert_status(StatusCode::ACCEPTED);
    let body: serde_json::Value = resp.json();
    assert_eq!(
        body["msg"].as_str(),
        Some("The account has been deactivated successfully")
    );

    let stored = state
        .store
        .find_user(user.id)
        .await
        .expect("store lookup")
        .expect("user exists");
    assert!(!stored.active);

    let resp = server
        .put(&format!("/api/active-desactive-account/{}", user.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "value": 1 }))
        .await;

    resp.assert_status(StatusCode::ACCEPTED);
}

#[tokio::test]
async fn toggle_rejects_unknown_value() {
    let (app, state) = common::test_app();
    let admin = common::create_test_user(&state, 1).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, admin.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .put(&format!("/api/active-desactive-account/{}", user.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "value": 2 }))
        .await;

    resp.assert_status(StatusCode::NOT_ACCEPTABLE);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["msg"].as_str(), Some("Value not allowed"));
}

#[tokio::test]
async fn toggle_requires_admin() {
    let (app, state) = common::test_app();
    let moderator = common::create_test_user(&state, 2).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, moderator.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .put(&format!("/api/active-desactive-account/{}", user.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "value": 0 }))
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
}

// =========================================================================
// Profile edits
// =========================================================================

#[tokio::test]
async fn user_edits_own_name() {
    let (app, state) = common::test_app();
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, user.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .put("/api/edit-user")
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "name": "Renamed" }))
        .await;

    resp.assert_status(StatusCode::ACCEPTED);

    let stored = state
        .store
        .find_user(user.id)
        .await
        .expect("store lookup")
        .expect("user exists");
    assert_eq!(stored.name, "Renamed");
}

#[tokio::test]
async fn admin_edits_other_users_email() {
    let (app, state) = common::test_app();
    let admin = common::create_test_user(&state, 1).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, admin.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .put(&format!("/api/edit-email/{}", user.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "email": "fresh@example.com" }))
        .await;

    resp.assert_status(StatusCode::ACCEPTED);

    let stored = state
        .store
        .find_user(user.id)
        .await
        .expect("store lookup")
        .expect("user exists");
    assert_eq!(stored.email, "fresh@example.com");
}

#[tokio::test]
async fn edit_email_rejects_taken_address() {
    let (app, state) = common::test_app();
    let user = common::create_test_user(&state, 3).await;
    let other = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, user.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .put("/api/edit-email")
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "email": other.email }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json();
    assert_eq!(
        body["error"]["email"][0].as_str(),
        Some("The email has already been taken")
    );
}

#[tokio::test]
async fn regular_cannot_edit_other_accounts() {
    let (app, state) = common::test_app();
    let regular = common::create_test_user(&state, 3).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, regular.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .put(&format!("/api/edit-user/{}", user.id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "name": "Hijacked" }))
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
}

// =========================================================================
// Account deletion
// =========================================================================

#[tokio::test]
async fn user_deletes_own_account() {
    let (app, state) = common::test_app();
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, user.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .delete("/api/delete-account")
        .authorization_bearer(&token)
        .await;

    resp.assert_status(StatusCode::ACCEPTED);

    let stored = state.store.find_user(user.id).await.expect("store lookup");
    assert!(stored.is_none());
}

#[tokio::test]
async fn admin_deletes_other_account() {
    let (app, state) = common::test_app();
    let admin = common::create_test_user(&state, 1).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, admin.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .delete(&format!("/api/delete-account/{}", user.id))
        .authorization_bearer(&token)
        .await;

    resp.assert_status(StatusCode::ACCEPTED);
    let body: serde_json::Value = resp.json();
    assert_eq!(
        body["msg"].as_str(),
        Some("The account has been deleted successfully")
    );
}

#[tokio::test]
async fn admin_delete_unknown_account_is_404() {
    let (app, state) = common::test_app();
    let admin = common::create_test_user(&state, 1).await;
    let token = common::token_for(&state, admin.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .delete("/api/delete-account/9999")
        .authorization_bearer(&token)
        .await;

    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn regular_cannot_delete_other_accounts() {
    let (app, state) = common::test_app();
    let regular = common::create_test_user(&state, 3).await;
    let user = common::create_test_user(&state, 3).await;
    let token = common::token_for(&state, regular.id);
    let server = TestServer::new(app).unwrap();

    let resp = server
        .delete(&format!("/api/delete-account/{}", user.id))
        .authorization_bearer(&token)
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
}
