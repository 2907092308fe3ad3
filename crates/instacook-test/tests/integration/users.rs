//! Tests for registration, activation and user lookups.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

fn registration(username: &str, email: &str) -> serde_json::Value {
    json!({"username": username, "email": email, "password": "s3cret-password"})
}

#[test_log::test(tokio::test)]
async fn register_creates_inactive_account() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let service = test_db.service().await;

    let body = TestRequest::post("/users")
        .json(registration("dave", "dave@example.com"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(body["username"], "dave");
    assert_eq!(body["email"], "dave@example.com");
    assert_eq!(body["is_active"], false);
    assert!(body.get("password").is_none());
    assert_eq!(test_db.user_count().await.expect("count"), 1);
}

#[test_log::test(tokio::test)]
async fn duplicate_username_or_email_writes_nothing() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    test_db.seed_user("alice", true).await.expect("seed alice");
    let service = test_db.service().await;

    let response = TestRequest::post("/users")
        .json(registration("alice", "fresh@example.com"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "username already used");

    let response = TestRequest::post("/users")
        .json(registration("fresh", "alice@example.com"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "email already used");

    assert_eq!(test_db.user_count().await.expect("count"), 1);
}

#[test_log::test(tokio::test)]
async fn invalid_registration_lists_field_errors() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let service = test_db.service().await;

    let response = TestRequest::post("/users")
        .json(json!({"username": "has space", "email": "nope", "password": "short"}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let errors = &response.json()["errors"];
    assert!(errors["username"].is_array());
    assert!(errors["email"].is_array());
    assert!(errors["password"].is_array());
    assert_eq!(test_db.user_count().await.expect("count"), 0);
}

#[test_log::test(tokio::test)]
async fn activation_enables_login_once() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    test_db.seed_user("carol", false).await.expect("seed carol");
    let service = test_db.service().await;
    let path = format!("/users/activate/{}", activation_token("carol@example.com"));

    TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    TestRequest::post("/token")
        .json(json!({"email": "carol@example.com", "password": PASSWORD}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let response = TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "The user account is already activated");
}

#[test_log::test(tokio::test)]
async fn activation_rejects_bad_tokens_and_unknown_accounts() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let service = test_db.service().await;

    TestRequest::get("/users/activate/not-a-token")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::get(&format!(
        "/users/activate/{}",
        activation_token("ghost@example.com")
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn access_token_is_not_an_activation_token() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let carol = test_db.seed_user("carol", false).await.expect("seed carol");
    let service = test_db.service().await;

    TestRequest::get(&format!("/users/activate/{}", access_token(carol, true)))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn profile_detail_depends_on_caller() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let bob = test_db.seed_user("bob", true).await.expect("seed bob");
    let service = test_db.service().await;

    let own = TestRequest::get("/users/alice")
        .bearer(&access_token(alice, false))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(own["email"], "alice@example.com");

    let other = TestRequest::get("/users/alice")
        .bearer(&access_token(bob, false))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(other["username"], "alice");
    assert!(other.get("email").is_none());

    let anonymous = TestRequest::get("/users/alice")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(anonymous.get("email").is_none());

    TestRequest::get("/users/nobody")
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn me_returns_the_callers_account() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let service = test_db.service().await;

    let body = TestRequest::get("/me")
        .bearer(&access_token(alice, false))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["id"], alice.to_string());
    assert_eq!(body["email"], "alice@example.com");

    TestRequest::get("/me")
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::get("/me")
        .bearer(&access_token(uuid::Uuid::now_v7(), false))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
