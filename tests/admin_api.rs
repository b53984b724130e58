mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, TestApp};

#[tokio::test]
async fn test_admin_requires_staff() {
    let app = TestApp::new().await;
    let (_, token) = app.principal("rider", false).await;

    let response = app.get("/admin/vehicle-models", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("/admin/vehicle-models", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_list_includes_voided_and_filters() {
    let app = TestApp::new().await;
    let (_, token) = app.staff().await;

    let voided = app.create_model("Honda", "City", "SEDAN").await;
    app.create_model("Honda", "CD 70", "MOTORCYCLE").await;
    app.create_model("Toyota", "Hiace", "VAN").await;
    app.expect(
        Method::POST,
        &format!("/api/vehicle-models/{}/purge", voided),
        None,
        Some(&token),
        StatusCode::OK,
    )
    .await;

    let all = body_json(app.get("/admin/vehicle-models", Some(&token)).await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);

    let hondas = body_json(app.get("/admin/vehicle-models?vendor=honda", Some(&token)).await).await;
    assert_eq!(hondas["data"].as_array().unwrap().len(), 2);

    let sedans = body_json(app.get("/admin/vehicle-models?vehicle_type=SEDAN", Some(&token)).await).await;
    let sedans = sedans["data"].as_array().unwrap();
    assert_eq!(sedans.len(), 1);
    assert_eq!(sedans[0]["voided"], true);
}

#[tokio::test]
async fn test_admin_save_reconciles_void_state() {
    let app = TestApp::new().await;
    let (staff, token) = app.staff().await;
    let model = app.create_model("Kia", "Sportage", "SUV").await;
    let uri = format!("/admin/vehicle-models/{}", model);

    let voided = app
        .expect(
            Method::PUT,
            &uri,
            Some(json!({"voided": true, "void_reason": "   "})),
            Some(&token),
            StatusCode::OK,
        )
        .await;
    assert_eq!(voided["data"]["voided"], true);
    assert_eq!(voided["data"]["voided_by"], staff.id);
    assert_eq!(voided["data"]["void_reason"], "Voided without providing a reason");
    assert!(voided["data"]["date_voided"].is_string());
    assert_eq!(voided["data"]["updated_by"], staff.id);

    let cleared = app
        .expect(Method::PUT, &uri, Some(json!({"voided": false})), Some(&token), StatusCode::OK)
        .await;
    assert_eq!(cleared["data"]["voided"], false);
    assert!(cleared["data"]["voided_by"].is_null());
    assert!(cleared["data"]["date_voided"].is_null());
    assert!(cleared["data"]["void_reason"].is_null());
}

#[tokio::test]
async fn test_admin_add_model_stamps_creation() {
    let app = TestApp::new().await;
    let (staff, token) = app.staff().await;

    let json = app
        .expect(
            Method::POST,
            "/admin/vehicle-models",
            Some(json!({"vendor": "Hyundai", "model": "Tucson", "vehicle_type": "SUV", "capacity": 1})),
            Some(&token),
            StatusCode::CREATED,
        )
        .await;
    assert_eq!(json["data"]["created_by"], staff.id);
    assert_eq!(json["data"]["capacity"], 4);
    assert_eq!(json["data"]["voided"], false);
}

#[tokio::test]
async fn test_admin_rejects_vehicle_add_and_all_deletes() {
    let app = TestApp::new().await;
    let (staff, token) = app.staff().await;
    let model = app.create_model("Kia", "Sportage", "SUV").await;
    let vehicle = app.create_vehicle("ISB-7", &model, staff.id).await;
    let profile = app.create_profile(staff.id, "OWNER").await;

    app.expect(
        Method::POST,
        "/admin/vehicles",
        Some(json!({"registration_number": "ISB-8"})),
        Some(&token),
        StatusCode::FORBIDDEN,
    )
    .await;

    for uri in [
        format!("/admin/vehicle-models/{}", model),
        format!("/admin/vehicles/{}", vehicle),
        format!("/admin/user-profiles/{}", profile),
    ] {
        app.expect(Method::DELETE, &uri, None, Some(&token), StatusCode::FORBIDDEN).await;
    }

    // Nada fue eliminado
    assert_eq!(
        app.get(&format!("/api/vehicle-models/{}", model), None).await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_admin_vehicle_filters_and_change() {
    let app = TestApp::new().await;
    let (staff, token) = app.staff().await;
    let (other, _) = app.principal("other", false).await;
    let model = app.create_model("Suzuki", "Bolan", "VAN").await;
    let vehicle = app.create_vehicle("KHI-11", &model, staff.id).await;
    app.create_vehicle("KHI-12", &model, other.id).await;

    let mine = body_json(
        app.get(&format!("/admin/vehicles?owner_id={}", staff.id), Some(&token))
            .await,
    )
    .await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);

    let changed = app
        .expect(
            Method::PUT,
            &format!("/admin/vehicles/{}", vehicle),
            Some(json!({"status": "INACTIVE", "voided": true, "void_reason": "Retired"})),
            Some(&token),
            StatusCode::OK,
        )
        .await;
    assert_eq!(changed["data"]["status"], "INACTIVE");
    assert_eq!(changed["data"]["void_reason"], "Retired");

    let inactive = body_json(app.get("/admin/vehicles?status=INACTIVE", Some(&token)).await).await;
    assert_eq!(inactive["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_profile_list_filters() {
    let app = TestApp::new().await;
    let (staff, token) = app.staff().await;
    let (rider, _) = app.principal("rider", false).await;
    app.create_profile(staff.id, "OWNER").await;
    app.create_profile(rider.id, "COMPANION").await;

    let companions = body_json(
        app.get("/admin/user-profiles?user_type=COMPANION", Some(&token))
            .await,
    )
    .await;
    let companions = companions["data"].as_array().unwrap();
    assert_eq!(companions.len(), 1);
    assert_eq!(companions[0]["user_id"], rider.id);
}

#[tokio::test]
async fn test_admin_change_without_void_flag_keeps_void_state() {
    let app = TestApp::new().await;
    let (staff, token) = app.staff().await;
    let model = app.create_model("Suzuki", "Alto", "HATCHBACK").await;
    let vehicle = app.create_vehicle("KHI-40", &model, staff.id).await;

    app.expect(
        Method::DELETE,
        &format!("/api/vehicles/{}", vehicle),
        Some(json!({"reason": "Sold"})),
        Some(&token),
        StatusCode::OK,
    )
    .await;

    let changed = app
        .expect(
            Method::PUT,
            &format!("/admin/vehicles/{}", vehicle),
            Some(json!({"colour": "#000000"})),
            Some(&token),
            StatusCode::OK,
        )
        .await;
    assert_eq!(changed["data"]["colour"], "#000000");
    assert_eq!(changed["data"]["voided"], true);
    assert_eq!(changed["data"]["void_reason"], "Sold");
    assert!(changed["data"]["date_voided"].is_string());

    // Un registro activo sigue activo aunque llegue un motivo suelto
    let active = app.create_model("Suzuki", "Mehran", "HATCHBACK").await;
    let json = app
        .expect(
            Method::PUT,
            &format!("/admin/vehicle-models/{}", active),
            Some(json!({"model": "Mehran VXR", "void_reason": "ignored"})),
            Some(&token),
            StatusCode::OK,
        )
        .await;
    assert_eq!(json["data"]["voided"], false);
    assert!(json["data"]["void_reason"].is_null());
}

#[tokio::test]
async fn test_admin_rejects_oversized_void_reason() {
    let app = TestApp::new().await;
    let (_, token) = app.staff().await;
    let model = app.create_model("Kia", "Picanto", "HATCHBACK").await;

    app.expect(
        Method::PUT,
        &format!("/admin/vehicle-models/{}", model),
        Some(json!({"voided": true, "void_reason": "x".repeat(1025)})),
        Some(&token),
        StatusCode::BAD_REQUEST,
    )
    .await;

    let stored = body_json(app.get("/admin/vehicle-models?vendor=kia", Some(&token)).await).await;
    assert_eq!(stored["data"][0]["voided"], false);
}
