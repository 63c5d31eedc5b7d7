mod common;

use axum::http::StatusCode;
use dran_backend::modules::auth::model::UserRole;
use serde_json::json;

use common::{authed_request, json_request, seed_user, send, test_app};

fn training_body(title: &str, category: &str, level: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "ytLink": "https://youtu.be/abc123",
        "category": category,
        "level": level,
        "duration": "2h",
    })
}

#[tokio::test]
async fn test_create_validates_youtube_url() {
    let (app, state) = test_app();
    let editor = seed_user(&state, "ed@example.com", "password123", UserRole::Editor).await;

    let mut body = training_body("Docker", "devops", "beginner");
    body["ytLink"] = json!("https://vimeo.com/12345");

    let (status, json) = send(&app, authed_request("POST", "/v1/training", &editor, Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid YouTube URL");
}

#[tokio::test]
async fn test_soft_delete_hides_from_public_keeps_for_admin() {
    let (app, state) = test_app();
    let admin = seed_user(&state, "ad@example.com", "password123", UserRole::Admin).await;

    let (_, body) = send(
        &app,
        authed_request("POST", "/v1/training", &admin, Some(training_body("Docker", "devops", "beginner"))),
    )
    .await;
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, authed_request("DELETE", &format!("/v1/training/{id}"), &admin, None)).await;
    assert_eq!(status, StatusCode::OK);

    // Public views act as if it never existed.
    let (status, _) = send(&app, json_request("GET", &format!("/v1/training/{id}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = send(&app, json_request("GET", "/v1/training", None)).await;
    assert!(body["trainings"].as_array().unwrap().is_empty());

    // The admin view keeps the record and its audit trail.
    let (status, body) = send(
        &app,
        authed_request("GET", &format!("/v1/training/admin/{id}"), &admin, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["training"]["isActive"], false);
    assert_eq!(body["training"]["deletedBy"], "ad@example.com");
}

#[tokio::test]
async fn test_status_toggle() {
    let (app, state) = test_app();
    let admin = seed_user(&state, "ad@example.com", "password123", UserRole::Admin).await;

    let (_, body) = send(
        &app,
        authed_request("POST", "/v1/training", &admin, Some(training_body("K8s", "devops", "advanced"))),
    )
    .await;
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        authed_request(
            "PATCH",
            &format!("/v1/training/{id}/status"),
            &admin,
            Some(json!({ "isActive": false })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Training deactivated successfully");

    let (status, _) = send(&app, json_request("GET", &format!("/v1/training/{id}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        authed_request(
            "PATCH",
            &format!("/v1/training/{id}/status"),
            &admin,
            Some(json!({ "isActive": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, json_request("GET", &format!("/v1/training/{id}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["training"]["reactivatedAt"].as_str().is_some(), true);
}

#[tokio::test]
async fn test_admin_list_is_active_filter() {
    let (app, state) = test_app();
    let admin = seed_user(&state, "ad@example.com", "password123", UserRole::Admin).await;

    send(
        &app,
        authed_request("POST", "/v1/training", &admin, Some(training_body("A", "devops", "beginner"))),
    )
    .await;
    let (_, body) = send(
        &app,
        authed_request("POST", "/v1/training", &admin, Some(training_body("B", "devops", "beginner"))),
    )
    .await;
    let gone = body["id"].as_str().unwrap().to_string();
    send(&app, authed_request("DELETE", &format!("/v1/training/{gone}"), &admin, None)).await;

    let (status, body) = send(&app, authed_request("GET", "/v1/training/admin", &admin, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trainings"].as_array().unwrap().len(), 2);

    let (_, body) = send(
        &app,
        authed_request("GET", "/v1/training/admin?isActive=false", &admin, None),
    )
    .await;
    let trainings = body["trainings"].as_array().unwrap();
    assert_eq!(trainings.len(), 1);
    assert_eq!(trainings[0]["title"], "B");

    let (status, body) = send(
        &app,
        authed_request("GET", "/v1/training/admin?isActive=maybe", &admin, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "isActive must be true or false");
}

#[tokio::test]
async fn test_admin_list_requires_auth() {
    let (app, _state) = test_app();
    let (status, _) = send(&app, json_request("GET", "/v1/training/admin", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_category_and_level_routes() {
    let (app, state) = test_app();
    let editor = seed_user(&state, "ed@example.com", "password123", UserRole::Editor).await;

    send(
        &app,
        authed_request("POST", "/v1/training", &editor, Some(training_body("A", "devops", "beginner"))),
    )
    .await;
    send(
        &app,
        authed_request("POST", "/v1/training", &editor, Some(training_body("B", "cloud", "beginner"))),
    )
    .await;
    send(
        &app,
        authed_request("POST", "/v1/training", &editor, Some(training_body("C", "devops", "advanced"))),
    )
    .await;

    let (status, body) = send(&app, json_request("GET", "/v1/training/category/devops", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trainings"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, json_request("GET", "/v1/training/level/beginner", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trainings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_permanent_delete_removes_record() {
    let (app, state) = test_app();
    let admin = seed_user(&state, "ad@example.com", "password123", UserRole::Admin).await;

    let (_, body) = send(
        &app,
        authed_request("POST", "/v1/training", &admin, Some(training_body("X", "c", "l"))),
    )
    .await;
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        authed_request("DELETE", &format!("/v1/training/{id}/permanent"), &admin, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        authed_request("GET", &format!("/v1/training/admin/{id}"), &admin, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_editor_cannot_delete() {
    let (app, state) = test_app();
    let editor = seed_user(&state, "ed@example.com", "password123", UserRole::Editor).await;

    let (_, body) = send(
        &app,
        authed_request("POST", "/v1/training", &editor, Some(training_body("X", "c", "l"))),
    )
    .await;
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, authed_request("DELETE", &format!("/v1/training/{id}"), &editor, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
