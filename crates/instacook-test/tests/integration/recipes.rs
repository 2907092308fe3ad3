//! Tests for the single-recipe endpoints.
//!
//! Covers creation, reads under the visibility rules, full and partial
//! updates, publishing, and soft delete with restore.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

// ============================================================================
// Create
// ============================================================================

#[test_log::test(tokio::test)]
async fn create_recipe_is_owned_by_caller_and_unpublished() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let service = test_db.service().await;

    let response = TestRequest::post("/recipes")
        .bearer(&access_token(alice, false))
        .json(json!({
            "name": "  Tomato soup ",
            "description": "Warm",
            "num_of_servings": 4,
            "cook_time": 30,
            "is_publish": true,
            "id": "ignored"
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let body = response.json();
    assert_eq!(body["name"], "Tomato soup");
    assert_eq!(body["user_id"], alice.to_string());
    assert_eq!(body["is_publish"], false);
    assert_eq!(body["directions"], "");
    assert_eq!(body["num_of_servings"], 4);
}

#[test_log::test(tokio::test)]
async fn create_recipe_reports_every_invalid_field() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let service = test_db.service().await;

    let response = TestRequest::post("/recipes")
        .bearer(&access_token(alice, true))
        .json(json!({
            "name": "x".repeat(101),
            "num_of_servings": 0,
            "cook_time": 301
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let errors = &response.json()["errors"];
    assert!(errors["name"].is_array());
    assert!(errors["num_of_servings"].is_array());
    assert!(errors["cook_time"].is_array());
}

#[test_log::test(tokio::test)]
async fn create_recipe_requires_a_name() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let service = test_db.service().await;

    let response = TestRequest::post("/recipes")
        .bearer(&access_token(alice, true))
        .json(json!({"description": "nameless"}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(response.json()["errors"]["name"].is_array());
}

// ============================================================================
// Read
// ============================================================================

#[test_log::test(tokio::test)]
async fn unpublished_recipe_is_visible_to_owner_only() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let bob = test_db.seed_user("bob", true).await.expect("seed bob");
    let draft = test_db
        .seed_recipe(alice, SeedRecipe::private("Draft"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;
    let path = format!("/recipes/{draft}");

    TestRequest::get(&path)
        .bearer(&access_token(alice, false))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("Draft");

    TestRequest::get(&path)
        .bearer(&access_token(bob, false))
        .send(&service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn deleted_recipe_is_not_found_even_for_owner() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let gone = test_db
        .seed_recipe(alice, SeedRecipe::deleted("Gone"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;

    TestRequest::get(&format!("/recipes/{gone}"))
        .bearer(&access_token(alice, false))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn unknown_recipe_is_not_found() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let service = test_db.service().await;

    let response = TestRequest::get(&format!("/recipes/{}", uuid::Uuid::now_v7()))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    assert_eq!(response.message(), "Recipe not found");
}

// ============================================================================
// Update
// ============================================================================

#[test_log::test(tokio::test)]
async fn replace_requires_a_fresh_token() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let recipe = test_db
        .seed_recipe(alice, SeedRecipe::public("Stew").description("Hearty"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;
    let path = format!("/recipes/{recipe}");

    TestRequest::put(&path)
        .bearer(&access_token(alice, false))
        .json(json!({"name": "Better stew"}))
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = TestRequest::put(&path)
        .bearer(&access_token(alice, true))
        .json(json!({"name": "Better stew", "cook_time": 90}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["name"], "Better stew");
    assert_eq!(body["description"], "");
    assert_eq!(body["cook_time"], 90);
    assert_eq!(body["is_publish"], true);
}

#[test_log::test(tokio::test)]
async fn patch_changes_only_present_fields() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let recipe = test_db
        .seed_recipe(
            alice,
            SeedRecipe::public("Pancakes").description("Fluffy").cook_time(20),
        )
        .await
        .expect("seed recipe");
    let service = test_db.service().await;

    let response = TestRequest::patch(&format!("/recipes/{recipe}"))
        .bearer(&access_token(alice, false))
        .json(json!({"cook_time": null, "num_of_servings": 2}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["name"], "Pancakes");
    assert_eq!(body["description"], "Fluffy");
    assert!(body["cook_time"].is_null());
    assert_eq!(body["num_of_servings"], 2);
}

#[test_log::test(tokio::test)]
async fn patch_with_invalid_name_is_rejected() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let recipe = test_db
        .seed_recipe(alice, SeedRecipe::public("Pancakes"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;

    TestRequest::patch(&format!("/recipes/{recipe}"))
        .bearer(&access_token(alice, false))
        .json(json!({"name": ""}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn non_owner_cannot_modify_recipe() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let bob = test_db.seed_user("bob", true).await.expect("seed bob");
    let recipe = test_db
        .seed_recipe(alice, SeedRecipe::public("Pancakes"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;
    let path = format!("/recipes/{recipe}");
    let token = access_token(bob, true);

    TestRequest::patch(&path)
        .bearer(&token)
        .json(json!({"name": "Mine now"}))
        .send(&service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    TestRequest::delete(&path)
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    TestRequest::delete(&format!("{path}/publish"))
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(
        test_db.recipe_flags(recipe).await.expect("flags"),
        (true, false)
    );
}

#[test_log::test(tokio::test)]
async fn update_bodies_cannot_change_the_owner() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let bob = test_db.seed_user("bob", true).await.expect("seed bob");
    let recipe = test_db
        .seed_recipe(alice, SeedRecipe::public("Stew"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;
    let path = format!("/recipes/{recipe}");

    let response = TestRequest::put(&path)
        .bearer(&access_token(alice, true))
        .json(json!({"name": "x", "user_id": bob.to_string()}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(response.json()["user_id"], alice.to_string());

    let response = TestRequest::patch(&path)
        .bearer(&access_token(alice, false))
        .json(json!({"user_id": bob.to_string()}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(response.json()["user_id"], alice.to_string());

    assert_eq!(
        test_db.recipe_owner(recipe).await.expect("owner"),
        Some(alice)
    );
}

#[test_log::test(tokio::test)]
async fn database_refuses_to_reassign_an_owned_recipe() {
    use diesel::result::{DatabaseErrorKind, Error};

    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let bob = test_db.seed_user("bob", true).await.expect("seed bob");
    let recipe = test_db
        .seed_recipe(alice, SeedRecipe::public("Stew"))
        .await
        .expect("seed recipe");

    let result = test_db
        .reassign_recipe(recipe, bob)
        .await
        .expect("connection");

    assert!(
        matches!(
            result,
            Err(Error::DatabaseError(DatabaseErrorKind::CheckViolation, _))
        ),
        "expected a check violation, got {result:?}"
    );
    assert_eq!(
        test_db.recipe_owner(recipe).await.expect("owner"),
        Some(alice)
    );
}

#[test_log::test(tokio::test)]
async fn every_mutation_advances_updated_at() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let recipe = test_db
        .seed_recipe(alice, SeedRecipe::private("Bread"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;
    let path = format!("/recipes/{recipe}");
    let token = access_token(alice, true);

    let mutations = [
        TestRequest::put(&path).json(json!({"name": "Rye bread"})),
        TestRequest::patch(&path).json(json!({"cook_time": 45})),
        TestRequest::put(&format!("{path}/publish")),
        TestRequest::delete(&format!("{path}/publish")),
        TestRequest::delete(&path),
        TestRequest::put(&format!("{path}/restore")),
    ];

    let mut stamps = vec![test_db.recipe_updated_at(recipe).await.expect("updated_at")];
    for mutation in mutations {
        let response = mutation.bearer(&token).send(&service).await;
        assert!(
            response.status.is_success(),
            "mutation failed with {}: {}",
            response.status,
            response.body_string()
        );
        stamps.push(test_db.recipe_updated_at(recipe).await.expect("updated_at"));
    }

    // The seeded stamp comes from the database clock, the rest from the
    // server, so only compare stamps the server wrote.
    assert!(
        stamps[1..].windows(2).all(|pair| pair[0] < pair[1]),
        "updated_at did not strictly increase: {stamps:?}"
    );
}

// ============================================================================
// Publish, delete, restore
// ============================================================================

#[test_log::test(tokio::test)]
async fn publish_then_unpublish_returns_to_original_state() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let recipe = test_db
        .seed_recipe(alice, SeedRecipe::private("Bread"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;
    let path = format!("/recipes/{recipe}/publish");
    let token = access_token(alice, false);

    TestRequest::put(&path)
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(
        test_db.recipe_flags(recipe).await.expect("flags"),
        (true, false)
    );

    TestRequest::delete(&path)
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(
        test_db.recipe_flags(recipe).await.expect("flags"),
        (false, false)
    );
}

#[test_log::test(tokio::test)]
async fn soft_delete_then_restore_returns_recipe_to_listings() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let recipe = test_db
        .seed_recipe(alice, SeedRecipe::public("Curry"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;
    let path = format!("/recipes/{recipe}");
    let token = access_token(alice, false);

    TestRequest::delete(&path)
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let listing = TestRequest::get("/recipes")
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    assert!(listing.recipe_names().is_empty());

    TestRequest::delete(&path)
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    TestRequest::put(&format!("{path}/restore"))
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    let listing = TestRequest::get("/recipes")
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(listing.recipe_names(), vec!["Curry".to_string()]);
}

#[test_log::test(tokio::test)]
async fn restoring_a_live_recipe_is_not_found() {
    let Some(test_db) = TestDb::new().await.expect("test database") else {
        return;
    };
    let alice = test_db.seed_user("alice", true).await.expect("seed alice");
    let recipe = test_db
        .seed_recipe(alice, SeedRecipe::public("Curry"))
        .await
        .expect("seed recipe");
    let service = test_db.service().await;

    TestRequest::put(&format!("/recipes/{recipe}/restore"))
        .bearer(&access_token(alice, false))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
