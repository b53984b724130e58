mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, TestApp};

#[tokio::test]
async fn test_create_vehicle_defaults_and_display_name() {
    let app = TestApp::new().await;
    let (owner, token) = app.principal("owner", false).await;
    let model = app.create_model("Toyota", "Corolla", "SEDAN").await;

    let json = app
        .expect(
            Method::POST,
            "/api/vehicles",
            Some(json!({"registration_number": " LEA-123 ", "model_uuid": model})),
            Some(&token),
            StatusCode::CREATED,
        )
        .await;

    assert_eq!(json["data"]["registration_number"], "LEA-123");
    assert_eq!(json["data"]["colour"], "#FFFFFF");
    assert_eq!(json["data"]["status"], "AVAILABLE");
    assert_eq!(json["data"]["owner_id"], owner.id);
    assert_eq!(json["data"]["model_uuid"], model);
    assert_eq!(json["data"]["display_name"], "Toyota Corolla #FFFFFF");
}

#[tokio::test]
async fn test_named_colour_is_rejected() {
    let app = TestApp::new().await;
    let (owner, _) = app.principal("owner", false).await;
    let model = app.create_model("Toyota", "Corolla", "SEDAN").await;

    let json = app
        .expect(
            Method::POST,
            "/api/vehicles",
            Some(json!({
                "registration_number": "ABC-877",
                "colour": "blue",
                "model_uuid": model,
                "owner_id": owner.id,
            })),
            None,
            StatusCode::BAD_REQUEST,
        )
        .await;
    assert!(json["details"]["colour"].is_array());
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected_even_when_voided() {
    let app = TestApp::new().await;
    let (staff, token) = app.staff().await;
    let model = app.create_model("Toyota", "Corolla", "SEDAN").await;
    let first = app.create_vehicle("ABC-877", &model, staff.id).await;

    app.expect(
        Method::DELETE,
        &format!("/api/vehicles/{}", first),
        None,
        Some(&token),
        StatusCode::OK,
    )
    .await;

    let json = app
        .expect(
            Method::POST,
            "/api/vehicles",
            Some(json!({"registration_number": "ABC-877", "model_uuid": model, "owner_id": staff.id})),
            None,
            StatusCode::BAD_REQUEST,
        )
        .await;
    assert_eq!(json["message"], "A vehicle with this registration number already exists");
}

#[tokio::test]
async fn test_unknown_model_or_owner_is_a_validation_error() {
    let app = TestApp::new().await;
    let model = app.create_model("Toyota", "Corolla", "SEDAN").await;

    let json = app
        .expect(
            Method::POST,
            "/api/vehicles",
            Some(json!({
                "registration_number": "ABC-1",
                "model_uuid": "00000000-0000-0000-0000-000000000000",
            })),
            None,
            StatusCode::BAD_REQUEST,
        )
        .await;
    assert!(json["details"]["model_uuid"].is_array());

    let json = app
        .expect(
            Method::POST,
            "/api/vehicles",
            Some(json!({"registration_number": "ABC-2", "model_uuid": model, "owner_id": 9999})),
            None,
            StatusCode::BAD_REQUEST,
        )
        .await;
    assert!(json["details"]["owner_id"].is_array());
}

#[tokio::test]
async fn test_delete_voids_with_reason_and_revoid_keeps_it() {
    let app = TestApp::new().await;
    let (staff, token) = app.staff().await;
    let model = app.create_model("Honda", "City", "SEDAN").await;
    let vehicle = app.create_vehicle("KHI-42", &model, staff.id).await;
    let uri = format!("/api/vehicles/{}", vehicle);

    let voided = app
        .expect(
            Method::DELETE,
            &uri,
            Some(json!({"reason": "Sold"})),
            Some(&token),
            StatusCode::OK,
        )
        .await;
    assert_eq!(voided["data"]["voided"], true);
    assert_eq!(voided["data"]["void_reason"], "Sold");
    assert_eq!(voided["data"]["voided_by"], staff.id);

    let revoided = app.expect(Method::DELETE, &uri, None, Some(&token), StatusCode::OK).await;
    assert_eq!(revoided["data"]["void_reason"], "Sold");

    // Un vehículo anulado no aparece en el listado pero sigue accesible
    let list = body_json(app.get("/api/vehicles", None).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
    assert_eq!(app.get(&uri, None).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_void_requires_staff() {
    let app = TestApp::new().await;
    let (owner, token) = app.principal("owner", false).await;
    let model = app.create_model("Honda", "City", "SEDAN").await;
    let vehicle = app.create_vehicle("KHI-43", &model, owner.id).await;

    app.expect(
        Method::DELETE,
        &format!("/api/vehicles/{}", vehicle),
        None,
        Some(&token),
        StatusCode::FORBIDDEN,
    )
    .await;
}

#[tokio::test]
async fn test_restore_on_active_vehicle_is_a_no_op() {
    let app = TestApp::new().await;
    let (staff, token) = app.staff().await;
    let model = app.create_model("Honda", "City", "SEDAN").await;
    let vehicle = app.create_vehicle("KHI-44", &model, staff.id).await;

    let json = app
        .expect(
            Method::POST,
            &format!("/api/vehicles/{}/restore", vehicle),
            None,
            Some(&token),
            StatusCode::OK,
        )
        .await;
    assert_eq!(json["data"]["voided"], false);
    assert!(json["data"]["date_updated"].is_null());
}

#[tokio::test]
async fn test_update_registration_to_an_existing_one_fails() {
    let app = TestApp::new().await;
    let (staff, _) = app.staff().await;
    let model = app.create_model("Honda", "City", "SEDAN").await;
    app.create_vehicle("KHI-1", &model, staff.id).await;
    let second = app.create_vehicle("KHI-2", &model, staff.id).await;

    app.expect(
        Method::PUT,
        &format!("/api/vehicles/{}", second),
        Some(json!({"registration_number": "KHI-1"})),
        None,
        StatusCode::BAD_REQUEST,
    )
    .await;

    let json = app
        .expect(
            Method::PUT,
            &format!("/api/vehicles/{}", second),
            Some(json!({"colour": "#00FF00", "status": "FULL"})),
            None,
            StatusCode::OK,
        )
        .await;
    assert_eq!(json["data"]["colour"], "#00FF00");
    assert_eq!(json["data"]["status"], "FULL");
    assert_eq!(json["data"]["registration_number"], "KHI-2");
}

#[tokio::test]
async fn test_delete_with_malformed_body_is_rejected() {
    let app = TestApp::new().await;
    let (staff, token) = app.staff().await;
    let model = app.create_model("Toyota", "Yaris", "SEDAN").await;
    let vehicle = app.create_vehicle("KHI-77", &model, staff.id).await;
    let uri = format!("/api/vehicles/{}", vehicle);

    let response = app.send_raw(Method::DELETE, &uri, "{reason: Sold", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");

    let stored = body_json(app.get(&uri, None).await).await;
    assert_eq!(stored["data"]["voided"], false);
}
