//! Baham: backend de carpooling con ciclo de vida auditado
//!
//! Modelos de vehículo, vehículos, perfiles de usuario y contratos comparten
//! un envelope de auditoría (creación, actualización, anulación) gestionado
//! por [`services::AuditLifecycle`].

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::routes::{
    admin_routes, auth_routes, contract_routes, health_routes, user_profile_routes,
    vehicle_model_routes, vehicle_routes,
};
use crate::state::AppState;

/// Router completo de la aplicación
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(health_routes::create_health_router())
        .nest("/api/auth", auth_routes::auth_routes())
        .nest(
            "/api/vehicle-models",
            vehicle_model_routes::create_vehicle_model_router(),
        )
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest(
            "/api/user-profiles",
            user_profile_routes::create_user_profile_router(),
        )
        .nest("/api/contracts", contract_routes::create_contract_router())
        .nest("/admin", admin_routes::create_admin_router())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
