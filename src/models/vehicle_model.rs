//! Modelo de VehicleModel
//!
//! Entrada del catálogo de modelos de vehículo (fabricante, modelo,
//! tipo de chasis y capacidad). Mapea a la tabla `vehicle_models`.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::models::audit::{AuditEnvelope, Auditable};
use crate::utils::errors::AppResult;
use crate::utils::validation::{validate_length, FieldErrors};

/// Capacidad mínima con sentido para cualquier vehículo
pub const MIN_CAPACITY: i16 = 2;

/// Tipo de chasis - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_type", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleType {
    Motorcycle,
    Hatchback,
    Sedan,
    Suv,
    Van,
}

impl VehicleType {
    /// Capacidad por defecto cuando no se indica una válida
    pub fn default_capacity(self) -> i16 {
        match self {
            VehicleType::Motorcycle => 2,
            _ => 4,
        }
    }
}

/// Normalizar la capacidad: ausente o menor que 2 pasa al valor por defecto del tipo
pub fn normalize_capacity(vehicle_type: VehicleType, capacity: Option<i16>) -> i16 {
    match capacity {
        Some(c) if c >= MIN_CAPACITY => c,
        _ => vehicle_type.default_capacity(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleModel {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditEnvelope,
    pub vendor: String,
    pub model: String,
    pub vehicle_type: VehicleType,
    pub capacity: i16,
}

impl VehicleModel {
    pub fn new(vendor: String, model: String, vehicle_type: VehicleType, capacity: Option<i16>) -> Self {
        Self {
            audit: AuditEnvelope::new(),
            vendor,
            model,
            vehicle_type,
            capacity: normalize_capacity(vehicle_type, capacity),
        }
    }
}

impl fmt::Display for VehicleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vendor, self.model)
    }
}

impl Auditable for VehicleModel {
    const KIND: &'static str = "VehicleModel";

    fn envelope(&self) -> &AuditEnvelope {
        &self.audit
    }

    fn envelope_mut(&mut self) -> &mut AuditEnvelope {
        &mut self.audit
    }

    fn validate_policy(&mut self) -> AppResult<()> {
        self.vendor = self.vendor.trim().to_string();
        self.model = self.model.trim().to_string();

        let mut errors = FieldErrors::new();
        if self.vendor.is_empty() || self.model.is_empty() {
            errors.add(
                "vendor",
                "required",
                "Manufacturer and Model name fields are mandatory!",
            );
        }
        errors
            .check("vendor", validate_length(&self.vendor, 0, 20))
            .check("model", validate_length(&self.model, 0, 20));
        errors.finish()?;

        self.capacity = normalize_capacity(self.vehicle_type, Some(self.capacity));
        Ok(())
    }
}
