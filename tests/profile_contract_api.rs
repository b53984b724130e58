mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, profile_body, TestApp};

#[tokio::test]
async fn test_one_profile_per_principal() {
    let app = TestApp::new().await;
    let (user, _) = app.principal("companion", false).await;
    app.create_profile(user.id, "COMPANION").await;

    let json = app
        .expect(
            Method::POST,
            "/api/user-profiles",
            Some(profile_body(user.id, "COMPANION")),
            None,
            StatusCode::CONFLICT,
        )
        .await;
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn test_profile_defaults_to_the_caller() {
    let app = TestApp::new().await;
    let (user, token) = app.principal("owner", false).await;

    let mut body = profile_body(0, "OWNER");
    body.as_object_mut().unwrap().remove("user_id");

    let json = app
        .expect(Method::POST, "/api/user-profiles", Some(body), Some(&token), StatusCode::CREATED)
        .await;
    assert_eq!(json["data"]["user_id"], user.id);
    assert_eq!(json["data"]["active"], true);
}

#[tokio::test]
async fn test_profile_validation() {
    let app = TestApp::new().await;
    let (user, _) = app.principal("owner", false).await;

    let mut body = profile_body(user.id, "OWNER");
    body["town"] = json!("Lahore");
    body["address_latitude"] = json!(24.8607);

    let json = app
        .expect(Method::POST, "/api/user-profiles", Some(body), None, StatusCode::BAD_REQUEST)
        .await;
    assert!(json["details"]["town"].is_array());
    assert!(json["details"]["address_longitude"].is_array() || json["details"]["address_latitude"].is_array());
}

#[tokio::test]
async fn test_deactivate_and_activate_profile() {
    let app = TestApp::new().await;
    let (user, token) = app.principal("owner", false).await;
    let profile = app.create_profile(user.id, "OWNER").await;

    let json = app
        .expect(
            Method::POST,
            &format!("/api/user-profiles/{}/deactivate", profile),
            None,
            Some(&token),
            StatusCode::OK,
        )
        .await;
    assert_eq!(json["data"]["active"], false);
    assert!(json["data"]["date_deactivated"].is_string());
    assert_eq!(json["data"]["updated_by"], user.id);
    assert_eq!(json["data"]["voided"], false);

    let json = app
        .expect(
            Method::POST,
            &format!("/api/user-profiles/{}/activate", profile),
            None,
            Some(&token),
            StatusCode::OK,
        )
        .await;
    assert_eq!(json["data"]["active"], true);
    assert!(json["data"]["date_deactivated"].is_null());
}

async fn contract_fixture(app: &TestApp) -> (String, String) {
    let (owner, _) = app.principal("owner", false).await;
    let (companion, _) = app.principal("companion", false).await;
    let model = app.create_model("Suzuki", "Cultus", "HATCHBACK").await;
    let vehicle = app.create_vehicle("KHI-900", &model, owner.id).await;
    let profile = app.create_profile(companion.id, "COMPANION").await;
    (vehicle, profile)
}

#[tokio::test]
async fn test_create_contract() {
    let app = TestApp::new().await;
    let (vehicle, companion) = contract_fixture(&app).await;

    let json = app
        .expect(
            Method::POST,
            "/api/contracts",
            Some(json!({
                "vehicle_uuid": vehicle,
                "companion_uuid": companion,
                "effective_start_date": "2024-01-01",
                "expiry_date": "2024-06-30",
                "fuel_share": 40,
                "maintenance_share": 25,
                "schedule": "Mon-Fri 08:00",
            })),
            None,
            StatusCode::CREATED,
        )
        .await;
    assert_eq!(json["data"]["fuel_share"], 40);
    assert_eq!(json["data"]["is_active"], true);
    assert_eq!(json["data"]["created_by"], app.state.lifecycle.system_principal().id);
    assert_eq!(json["data"]["vehicle_uuid"], vehicle.as_str());
    assert_eq!(json["data"]["companion_uuid"], companion.as_str());

    let listed = body_json(app.get("/api/contracts", None).await).await;
    assert_eq!(listed["data"][0]["vehicle_uuid"], vehicle.as_str());
    assert_eq!(listed["data"][0]["companion_uuid"], companion.as_str());

    let uri = format!("/api/contracts/{}", json["data"]["uuid"].as_str().unwrap());
    let fetched = body_json(app.get(&uri, None).await).await;
    assert_eq!(fetched["data"]["vehicle_uuid"], vehicle.as_str());
    assert_eq!(fetched["data"]["companion_uuid"], companion.as_str());
}

#[tokio::test]
async fn test_contract_rejects_bad_shares_and_dates() {
    let app = TestApp::new().await;
    let (vehicle, companion) = contract_fixture(&app).await;

    app.expect(
        Method::POST,
        "/api/contracts",
        Some(json!({
            "vehicle_uuid": vehicle,
            "companion_uuid": companion,
            "effective_start_date": "2024-01-01",
            "expiry_date": "2024-06-30",
            "fuel_share": 101,
            "maintenance_share": 25,
            "schedule": "Mon-Fri 08:00",
        })),
        None,
        StatusCode::BAD_REQUEST,
    )
    .await;

    let json = app
        .expect(
            Method::POST,
            "/api/contracts",
            Some(json!({
                "vehicle_uuid": vehicle,
                "companion_uuid": companion,
                "effective_start_date": "2024-06-30",
                "expiry_date": "2024-01-01",
                "fuel_share": 50,
                "maintenance_share": 50,
                "schedule": "Mon-Fri 08:00",
            })),
            None,
            StatusCode::BAD_REQUEST,
        )
        .await;
    assert!(json["details"]["expiry_date"].is_array());
}

#[tokio::test]
async fn test_contract_void_and_restore() {
    let app = TestApp::new().await;
    let (_, token) = app.staff().await;
    let (vehicle, companion) = contract_fixture(&app).await;

    let created = app
        .expect(
            Method::POST,
            "/api/contracts",
            Some(json!({
                "vehicle_uuid": vehicle,
                "companion_uuid": companion,
                "effective_start_date": "2024-01-01",
                "expiry_date": "2024-12-31",
                "fuel_share": 50,
                "maintenance_share": 50,
                "schedule": "Daily 07:30",
            })),
            None,
            StatusCode::CREATED,
        )
        .await;
    let uri = format!("/api/contracts/{}", created["data"]["uuid"].as_str().unwrap());

    let voided = app.expect(Method::DELETE, &uri, None, Some(&token), StatusCode::OK).await;
    assert_eq!(voided["data"]["void_reason"], "Voided without providing a reason");

    let restored = app
        .expect(Method::POST, &format!("{}/restore", uri), None, Some(&token), StatusCode::OK)
        .await;
    assert_eq!(restored["data"]["voided"], false);
    assert!(restored["data"]["void_reason"].is_null());
}
