//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean al schema
//! PostgreSQL. Todas las entidades comparten el envelope de auditoría.

pub mod audit;
pub mod contract;
pub mod user_profile;
pub mod vehicle;
pub mod vehicle_model;

pub use audit::{AuditEnvelope, Auditable, Principal};
pub use contract::Contract;
pub use user_profile::{UserProfile, UserType};
pub use vehicle::{Vehicle, VehicleStatus};
pub use vehicle_model::{VehicleModel, VehicleType};
