//! Rutas HTTP
//!
//! Cada recurso expone un `Router<AppState>` que se anida en [`crate::build_router`].

pub mod admin_routes;
pub mod auth_routes;
pub mod contract_routes;
pub mod health_routes;
pub mod user_profile_routes;
pub mod vehicle_model_routes;
pub mod vehicle_routes;
