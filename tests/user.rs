mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn created_when_absent() {
    let app = test_app();
    let (status, body) = post(&app, "/user", user()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_message(&body, "OK");
}

#[tokio::test]
async fn second_create_conflicts() {
    let app = test_app();
    assert_eq!(post(&app, "/user", user()).await.0, StatusCode::CREATED);
    let (status, body) = post(&app, "/user", user()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_message(&body, "Already present");
}

#[tokio::test]
async fn fetch_never_echoes_password() {
    let app = test_app();
    post(&app, "/user", user()).await;
    let (status, body) = get(&app, "/user/Silvio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "Silvio");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
    assert_eq!(body["plants"], json!([]));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = test_app();
    post(&app, "/user", user()).await;
    let (status, body) = get(&app, "/user/Mario").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_message(&body, "Not found");
}

#[tokio::test]
async fn usernames_are_case_sensitive() {
    let app = test_app();
    post(&app, "/user", user()).await;
    assert_eq!(get(&app, "/user/silvio").await.0, StatusCode::NOT_FOUND);
    let (status, _) = post(&app, "/user", json!({ "username": "silvio", "password": "x" })).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn created_with_nested_collections() {
    let app = test_app();
    let (status, _) = post(
        &app,
        "/user",
        json!({
            "username": "Silvio",
            "password": "test",
            "plants": [{ "name": "Sage" }],
            "hubs": [{ "name": "kitchen", "location": "window", "slots": 2 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, body) = get(&app, "/user/Silvio").await;
    assert_eq!(body["plants"][0]["name"], "Sage");
    assert_eq!(body["hubs"][0]["name"], "kitchen");
}

#[tokio::test]
async fn login_checks_password() {
    let app = test_app();
    post(&app, "/user", user()).await;

    let (status, body) = post(&app, "/user/login", json!({ "username": "Silvio", "password": "test" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "Silvio");
    assert!(body.get("password").is_none());

    let (status, body) = post(&app, "/user/login", json!({ "username": "Silvio", "password": "nope" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_message(&body, "Not found");

    let (status, _) = post(&app, "/user/login", json!({ "username": "Mario", "password": "test" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn adding_plant_shows_in_user() {
    let app = test_app();
    post(&app, "/user", user()).await;
    let (status, body) = put(&app, "/user/Silvio", plant()).await;
    assert_eq!(status, StatusCode::OK);
    assert_message(&body, "OK");
    let (_, body) = get(&app, "/user/Silvio").await;
    assert_eq!(body["username"], "Silvio");
    assert_eq!(body["plants"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn post_on_user_path_adds_plant_with_created() {
    let app = test_app();
    post(&app, "/user", user()).await;
    let (status, _) = post(&app, "/user/Silvio", plant()).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn adding_plant_to_missing_user_is_not_found() {
    let app = test_app();
    let (status, body) = put(&app, "/user/Silvio", plant()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_message(&body, "Not found");
}

#[tokio::test]
async fn adding_same_plant_twice_conflicts() {
    let app = test_app();
    post(&app, "/user", user()).await;
    assert_eq!(put(&app, "/user/Silvio", plant()).await.0, StatusCode::OK);
    let (status, body) = put(&app, "/user/Silvio", plant()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_message(&body, "Already present");
}

#[tokio::test]
async fn same_plant_name_for_different_users() {
    let app = test_app();
    post(&app, "/user", user()).await;
    post(&app, "/user", json!({ "username": "Mario", "password": "x" })).await;
    assert_eq!(put(&app, "/user/Silvio", plant()).await.0, StatusCode::OK);
    assert_eq!(put(&app, "/user/Mario", plant()).await.0, StatusCode::OK);
}

#[tokio::test]
async fn concurrent_duplicate_adds_yield_one_conflict() {
    let app = test_app();
    post(&app, "/user", user()).await;
    let (a, b) = tokio::join!(put(&app, "/user/Silvio", plant()), put(&app, "/user/Silvio", plant()));
    let mut statuses = vec![a.0, b.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);
    let (_, body) = get(&app, "/plant/Silvio").await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn delete_returns_no_content() {
    let app = test_app();
    post(&app, "/user", user()).await;
    let (status, body) = delete(&app, "/user/Silvio").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert_eq!(get(&app, "/user/Silvio").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_missing_user_is_not_found() {
    let app = test_app();
    let (status, body) = delete(&app, "/user/Silvio").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_message(&body, "Not found");
}

#[tokio::test]
async fn rename_to_free_name() {
    let app = test_app();
    post(&app, "/user", user()).await;
    let (status, body) = patch(&app, "/user/Silvio", json!({ "newName": "Luigi" })).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert_eq!(get(&app, "/user/Silvio").await.0, StatusCode::NOT_FOUND);
    let (status, body) = get(&app, "/user/Luigi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "Luigi");
    // The password survives the rename.
    let (status, _) = post(&app, "/user/login", json!({ "username": "Luigi", "password": "test" })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rename_to_taken_name_changes_nothing() {
    let app = test_app();
    post(&app, "/user", user()).await;
    post(&app, "/user", json!({ "username": "Mario", "password": "x" })).await;
    put(&app, "/user/Silvio", plant()).await;

    let (status, body) = patch(&app, "/user/Silvio", json!({ "newName": "Mario" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_message(&body, "Already present");

    let (_, silvio) = get(&app, "/user/Silvio").await;
    assert_eq!(silvio["plants"].as_array().map(Vec::len), Some(1));
    let (_, mario) = get(&app, "/user/Mario").await;
    assert_eq!(mario["plants"], json!([]));
}

#[tokio::test]
async fn rename_missing_user_is_not_found() {
    let app = test_app();
    let (status, _) = patch(&app, "/user/Silvio", json!({ "newName": "Luigi" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_required_fields_are_rejected() {
    let app = test_app();
    let (status, body) = post(&app, "/user", json!({ "username": "Silvio" })).await;
    assert_invalid_body(status, &body);
    assert_eq!(get(&app, "/user/Silvio").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_json_body_gets_error_envelope() {
    let app = test_app();
    let (status, body) = post(&app, "/user/login", json!("not an object")).await;
    assert_invalid_body(status, &body);
}

#[tokio::test]
async fn create_rejects_duplicate_nested_plants() {
    let app = test_app();
    let sage = json!({ "name": "Sage" });
    let (status, body) = post(
        &app,
        "/user",
        json!({ "username": "Silvio", "password": "test", "plants": [sage.clone(), sage] }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_message(&body, "Already present");
    assert_eq!(get(&app, "/user/Silvio").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_rejects_duplicate_hubs() {
    let app = test_app();
    let hub = json!({ "name": "kitchen", "location": "window", "slots": 1 });
    let (status, body) = post(
        &app,
        "/user",
        json!({ "username": "Silvio", "password": "test", "hubs": [hub.clone(), hub] }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Hub already exists");
    assert_eq!(get(&app, "/user/Silvio").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_rejects_overfull_hub() {
    let app = test_app();
    let hub = json!({
        "name": "kitchen",
        "location": "window",
        "slots": 1,
        "plants": [{ "name": "Mint" }, { "name": "Basil" }]
    });
    let (status, body) = post(&app, "/user", json!({ "username": "Silvio", "password": "test", "hubs": [hub] })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Hub is full");
    assert_eq!(get(&app, "/user/Silvio").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_rejects_duplicate_plants_inside_hub() {
    let app = test_app();
    let hub = json!({
        "name": "kitchen",
        "location": "window",
        "slots": 3,
        "plants": [{ "name": "Mint" }, { "name": "Mint" }]
    });
    let (status, body) = post(&app, "/user", json!({ "username": "Silvio", "password": "test", "hubs": [hub] })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_message(&body, "Already present");
}

#[tokio::test]
async fn create_with_valid_nested_hub() {
    let app = test_app();
    let hub = json!({
        "name": "kitchen",
        "location": "window",
        "slots": 2,
        "plants": [{ "name": "Mint" }, { "name": "Sage" }]
    });
    let (status, _) = post(
        &app,
        "/user",
        json!({ "username": "Silvio", "password": "test", "plants": [{ "name": "Sage" }], "hubs": [hub] }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, body) = get(&app, "/hub/Silvio/kitchen").await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}
