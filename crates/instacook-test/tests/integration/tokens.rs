//! Tests for login, refresh and revocation.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

async fn login(service: &salvo::Service, email: &str, password: &str) -> TestResponse {
    TestRequest::post("/token")
        .json(json!({"email": email, "password": password}))
        .send(service)
        .await
}

#[test_log::test(tokio::test)]
async fn login_issues_fresh_access_and_refresh_tokens() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let service = test_db.service().await;

    let body = login(&service, "alice@example.com", PASSWORD)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let access = claims_of(body["access_token"].as_str().expect("access token"));
    let refresh = claims_of(body["refresh_token"].as_str().expect("refresh token"));
    assert_eq!(access.sub, alice);
    assert!(access.is_access());
    assert!(access.fresh);
    assert_eq!(refresh.sub, alice);
    assert!(!refresh.is_access());
    assert_ne!(access.jti, refresh.jti);
}

#[test_log::test(tokio::test)]
async fn wrong_password_and_unknown_email_are_unauthorized() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    test_db.seed_user("alice", true).await.expect("seed alice");
    let service = test_db.service().await;

    let wrong = login(&service, "alice@example.com", "not the password")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    let unknown = login(&service, "nobody@example.com", PASSWORD)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(wrong.message(), unknown.message());
}

#[test_log::test(tokio::test)]
async fn inactive_account_cannot_log_in() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    test_db.seed_user("carol", false).await.expect("seed carol");
    let service = test_db.service().await;

    login(&service, "carol@example.com", PASSWORD)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn token_types_are_not_interchangeable() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let service = test_db.service().await;

    TestRequest::get("/me")
        .bearer(&refresh_token(alice))
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::post("/refresh")
        .bearer(&access_token(alice, true))
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn refreshed_access_token_is_not_fresh() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let recipe = test_db
        .seed_recipe(alice, SeedRecipe::public("Stew"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;

    let body = TestRequest::post("/refresh")
        .bearer(&refresh_token(alice))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let access = body["access_token"].as_str().expect("access token").to_string();

    let claims = claims_of(&access);
    assert!(claims.is_access());
    assert!(!claims.fresh);

    TestRequest::get("/me")
        .bearer(&access)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    TestRequest::put(&format!("/recipes/{recipe}"))
        .bearer(&access)
        .json(json!({"name": "Stew"}))
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn revoked_token_is_rejected_everywhere() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let service = test_db.service().await;
    let token = access_token(alice, true);

    let response = TestRequest::post("/revoke")
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(response.message(), "Successfully logged out");
    assert!(
        test_db
            .is_blacklisted(&claims_of(&token).jti)
            .await
            .expect("blacklist lookup")
    );

    TestRequest::get("/me")
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::get("/recipes")
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    TestRequest::get("/users/alice")
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::post("/revoke")
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
