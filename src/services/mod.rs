//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el ciclo de
//! vida auditado que comparten todas las entidades.

pub mod lifecycle;

pub use lifecycle::AuditLifecycle;
