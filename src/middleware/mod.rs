//! Middleware del sistema
//!
//! Este módulo contiene la autenticación de principals y la configuración
//! de CORS.

pub mod auth;
pub mod cors;

pub use auth::{AuthenticatedPrincipal, MaybePrincipal};
pub use cors::cors_layer;
