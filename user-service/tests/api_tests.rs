mod common;

use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/startup/check-health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::spawn().await;
    app.create_user("Alice", "alice@example.com", "secret123")
        .await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "Other Alice",
            "email": "alice@example.com",
            "password": "secret456"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], 409);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "Alice",
            "email": "not-an-email",
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], 422);
    assert!(body["fieldErrors"]["email"].is_string());
    assert!(body["fieldErrors"].get("name").is_none());
}

#[tokio::test]
async fn test_create_user_reports_every_invalid_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": " ",
            "email": "not-an-email",
            "password": "abc"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["message"], "Invalid input data");
    let fields = body["fieldErrors"].as_object().unwrap();
    assert_eq!(fields.len(), 3);
    assert!(fields.contains_key("name"));
    assert!(fields.contains_key("email"));
    assert!(fields.contains_key("password"));
}

#[tokio::test]
async fn test_create_user_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "email": "alice@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_login_returns_access_token_for_email() {
    let app = TestApp::spawn().await;
    app.create_user("Alice", "alice@example.com", "secret123")
        .await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["accessToken"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
    assert_eq!(body.as_object().unwrap().len(), 1);

    assert_eq!(
        app.authenticator.validate_token(token),
        Ok("alice@example.com".to_string())
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.create_user("Alice", "alice@example.com", "secret123")
        .await;

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "wrong_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let unknown_email = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password["message"], unknown_email["message"]);
    assert_eq!(wrong_password["error"], unknown_email["error"]);
}

#[tokio::test]
async fn test_protected_routes_require_identity() {
    let app = TestApp::spawn().await;
    let user_id = app
        .create_user("Alice", "alice@example.com", "secret123")
        .await;

    let anonymous = app
        .get(&format!("/api/users/{}", user_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let bad_token = app
        .get_authenticated(&format!("/api/users/{}", user_id), "invalid")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_anonymous() {
    let app = TestApp::spawn().await;
    let user_id = app
        .create_user("Alice", "alice@example.com", "secret123")
        .await;

    let expired = app
        .authenticator
        .issue_token_at("alice@example.com", Utc::now() - chrono::Duration::hours(2))
        .unwrap();

    let response = app
        .get_authenticated(&format!("/api/users/{}", user_id), &expired)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = TestApp::spawn().await;
    app.create_user("Alice", "alice@example.com", "secret123")
        .await;
    let token = app.login("alice@example.com", "secret123").await;

    let fake_uuid = uuid::Uuid::new_v4().to_string();
    let response = app
        .get_authenticated(&format!("/api/users/{}", fake_uuid), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], 404);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_list_users_paginates_live_users() {
    let app = TestApp::spawn().await;
    let alice_id = app
        .create_user("Alice", "alice@example.com", "secret123")
        .await;
    app.create_user("Bob", "bob@example.com", "secret123").await;
    let carol_id = app
        .create_user("Carol", "carol@example.com", "secret123")
        .await;
    let token = app.login("alice@example.com", "secret123").await;

    let response = app
        .delete_authenticated(&format!("/api/users/{}", carol_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated("/api/users?page=1&size=1&orderBy=-name", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"][0]["name"], "Bob");
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["totalItems"], 2);
    assert_eq!(body["pageSize"], 1);
    assert_eq!(body["isLastPage"], false);

    let response = app
        .get_authenticated("/api/users?page=2&size=1&orderBy=-name", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"][0]["id"], alice_id);
    assert_eq!(body["isLastPage"], true);

    let response = app
        .get_authenticated("/api/users?orderBy=passwordHash", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user_changes_name_only() {
    let app = TestApp::spawn().await;
    let user_id = app
        .create_user("Alice", "alice@example.com", "secret123")
        .await;
    let token = app.login("alice@example.com", "secret123").await;

    let response = app
        .put_authenticated(&format!("/api/users/{}", user_id), &token)
        .json(&json!({ "name": "Alice Smith" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Alice Smith");
    assert_eq!(body["email"], "alice@example.com");

    let response = app
        .put_authenticated(&format!("/api/users/{}", user_id), &token)
        .json(&json!({ "name": "A" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["fieldErrors"]["name"].is_string());
}

#[tokio::test]
async fn test_soft_deleted_user_token_stops_resolving() {
    let app = TestApp::spawn().await;

    // 1. Create alice and log in
    let alice_id = app
        .create_user("Alice", "alice@example.com", "secret123")
        .await;
    app.create_user("Bob", "bob@example.com", "secret456").await;
    let alice_token = app.login("alice@example.com", "secret123").await;
    let bob_token = app.login("bob@example.com", "secret456").await;

    // 2. Alice's token resolves to alice
    let response = app
        .get_authenticated(&format!("/api/users/{}", alice_id), &alice_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "alice@example.com");

    // 3. Soft-delete alice
    let response = app
        .delete_authenticated(&format!("/api/users/{}", alice_id), &bob_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // 4. Same unexpired, correctly signed token is now anonymous
    assert!(app.authenticator.validate_token(&alice_token).is_ok());
    let response = app
        .get_authenticated(&format!("/api/users/{}", alice_id), &alice_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 5. Deleted accounts cannot log in either
    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 6. The record is gone for everyone else, and cannot be deleted twice
    let response = app
        .get_authenticated(&format!("/api/users/{}", alice_id), &bob_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete_authenticated(&format!("/api/users/{}", alice_id), &bob_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // 7. The email stays reserved
    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "New Alice",
            "email": "alice@example.com",
            "password": "secret789"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_concurrent_registration_same_email() {
    let app = TestApp::spawn().await;

    let request = |name: &str| {
        app.post("/api/users")
            .json(&json!({
                "name": name,
                "email": "alice@example.com",
                "password": "secret123"
            }))
            .send()
    };

    let (first, second) = tokio::join!(request("Alice One"), request("Alice Two"));
    let mut statuses = vec![first.unwrap().status(), second.unwrap().status()];
    statuses.sort();

    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
}
