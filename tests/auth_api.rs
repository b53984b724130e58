mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, TestApp};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_register_login_and_use_token() {
    let app = TestApp::new().await;

    let registered = app
        .expect(
            Method::POST,
            "/api/auth/register",
            Some(json!({"username": "bilal", "password": "correct-horse"})),
            None,
            StatusCode::CREATED,
        )
        .await;
    assert_eq!(registered["data"]["is_staff"], false);

    let login = app
        .expect(
            Method::POST,
            "/api/auth/login",
            Some(json!({"username": "bilal", "password": "correct-horse"})),
            None,
            StatusCode::OK,
        )
        .await;
    let token = login["data"]["token"].as_str().unwrap().to_string();

    let created = app
        .expect(
            Method::POST,
            "/api/vehicle-models",
            Some(json!({"vendor": "Toyota", "model": "Vitz", "vehicle_type": "HATCHBACK"})),
            Some(&token),
            StatusCode::CREATED,
        )
        .await;
    assert_eq!(created["data"]["created_by"], registered["data"]["id"]);
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let app = TestApp::new().await;
    app.expect(
        Method::POST,
        "/api/auth/register",
        Some(json!({"username": "bilal", "password": "correct-horse"})),
        None,
        StatusCode::CREATED,
    )
    .await;

    app.expect(
        Method::POST,
        "/api/auth/login",
        Some(json!({"username": "bilal", "password": "wrong-password"})),
        None,
        StatusCode::UNAUTHORIZED,
    )
    .await;
}

#[tokio::test]
async fn test_system_principal_cannot_log_in() {
    let app = TestApp::new().await;
    app.expect(
        Method::POST,
        "/api/auth/login",
        Some(json!({"username": "system", "password": "anything"})),
        None,
        StatusCode::UNAUTHORIZED,
    )
    .await;
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = TestApp::new().await;
    app.principal("taken", false).await;

    app.expect(
        Method::POST,
        "/api/auth/register",
        Some(json!({"username": "taken", "password": "long-enough"})),
        None,
        StatusCode::CONFLICT,
    )
    .await;
}

#[tokio::test]
async fn test_invalid_token_is_rejected_even_on_open_routes() {
    let app = TestApp::new().await;
    app.expect(
        Method::POST,
        "/api/vehicle-models",
        Some(json!({"vendor": "Toyota", "model": "Vitz", "vehicle_type": "HATCHBACK"})),
        Some("not-a-jwt"),
        StatusCode::UNAUTHORIZED,
    )
    .await;
}
