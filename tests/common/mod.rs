//! Helpers compartidos por los tests de integración: router completo sobre
//! el repositorio en memoria y requests vía `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use baham::build_router;
use baham::config::EnvironmentConfig;
use baham::models::Principal;
use baham::repositories::{CarpoolStore, MemoryRepository, PrincipalStore};
use baham::state::AppState;
use baham::utils::jwt::{generate_token, JwtConfig};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let store: Arc<dyn CarpoolStore> = Arc::new(MemoryRepository::new());
        let state = AppState::bootstrap(store, EnvironmentConfig::default())
            .await
            .expect("bootstrap");
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Crear un principal directamente en el store y devolver su token
    pub async fn principal(&self, username: &str, is_staff: bool) -> (Principal, String) {
        let principal = self
            .state
            .store
            .create_principal(username, "!", is_staff)
            .await
            .expect("create principal");
        let token = generate_token(&principal, &JwtConfig::from(&self.state.config)).expect("token");
        (principal, token)
    }

    pub async fn staff(&self) -> (Principal, String) {
        self.principal("staff", true).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Request con un body JSON sin parsear
    pub async fn send_raw(&self, method: Method, uri: &str, body: &str, token: &str) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        self.send(Method::GET, uri, None, token).await
    }

    /// Request que debe devolver `expected`; devuelve el cuerpo JSON
    pub async fn expect(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
        expected: StatusCode,
    ) -> Value {
        let response = self.send(method, uri, body, token).await;
        let status = response.status();
        let json = body_json(response).await;
        assert_eq!(status, expected, "unexpected status for {}: {}", uri, json);
        json
    }

    /// Crear un modelo del catálogo y devolver su uuid
    pub async fn create_model(&self, vendor: &str, model: &str, vehicle_type: &str) -> String {
        let json = self
            .expect(
                Method::POST,
                "/api/vehicle-models",
                Some(json!({
                    "vendor": vendor,
                    "model": model,
                    "vehicle_type": vehicle_type,
                })),
                None,
                StatusCode::CREATED,
            )
            .await;
        json["data"]["uuid"].as_str().unwrap().to_string()
    }

    /// Crear un vehículo para `owner_id` y devolver su uuid
    pub async fn create_vehicle(&self, registration: &str, model_uuid: &str, owner_id: i64) -> String {
        let json = self
            .expect(
                Method::POST,
                "/api/vehicles",
                Some(json!({
                    "registration_number": registration,
                    "colour": "#1A2B3C",
                    "model_uuid": model_uuid,
                    "owner_id": owner_id,
                })),
                None,
                StatusCode::CREATED,
            )
            .await;
        json["data"]["uuid"].as_str().unwrap().to_string()
    }

    /// Crear un perfil para `user_id` y devolver su uuid
    pub async fn create_profile(&self, user_id: i64, user_type: &str) -> String {
        let json = self
            .expect(
                Method::POST,
                "/api/user-profiles",
                Some(profile_body(user_id, user_type)),
                None,
                StatusCode::CREATED,
            )
            .await;
        json["data"]["uuid"].as_str().unwrap().to_string()
    }
}

pub fn profile_body(user_id: i64, user_type: &str) -> Value {
    json!({
        "user_id": user_id,
        "birthdate": "1994-03-12",
        "gender": "F",
        "user_type": user_type,
        "primary_contact": "0300-1234567",
        "address": "House 12, Block 5",
        "landmark": "Near the park",
        "town": "Gulshan-e-Iqbal",
    })
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}
