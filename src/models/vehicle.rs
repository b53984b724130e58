//! Modelo de Vehicle
//!
//! Vehículo concreto de un propietario, asociado a una entrada del catálogo.
//! Mapea a la tabla `vehicles`.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::models::audit::{AuditEnvelope, Auditable};
use crate::models::vehicle_model::VehicleModel;
use crate::utils::errors::AppResult;
use crate::utils::validation::{validate_hex_colour, validate_length, validate_registration_number, FieldErrors};

/// Color asignado cuando no se indica ninguno
pub const DEFAULT_COLOUR: &str = "#FFFFFF";

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleStatus {
    Available,
    Full,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditEnvelope,
    pub registration_number: String,
    pub colour: String,
    pub model_id: i64,
    pub owner_id: i64,
    pub status: VehicleStatus,
    pub picture1: Option<String>,
    pub picture2: Option<String>,
}

impl Vehicle {
    pub fn new(
        registration_number: String,
        colour: Option<String>,
        model_id: i64,
        owner_id: i64,
        status: VehicleStatus,
    ) -> Self {
        Self {
            audit: AuditEnvelope::new(),
            registration_number,
            colour: colour.unwrap_or_else(|| DEFAULT_COLOUR.to_string()),
            model_id,
            owner_id,
            status,
            picture1: None,
            picture2: None,
        }
    }

    /// Nombre para mostrar: fabricante, modelo y color
    pub fn display_name(&self, model: &VehicleModel) -> String {
        format!("{} {} {}", model.vendor, model.model, self.colour)
    }
}

impl Auditable for Vehicle {
    const KIND: &'static str = "Vehicle";

    fn envelope(&self) -> &AuditEnvelope {
        &self.audit
    }

    fn envelope_mut(&mut self) -> &mut AuditEnvelope {
        &mut self.audit
    }

    fn validate_policy(&mut self) -> AppResult<()> {
        self.registration_number = self.registration_number.trim().to_string();

        let mut errors = FieldErrors::new();
        errors
            .check("registration_number", validate_registration_number(&self.registration_number))
            .check("colour", validate_hex_colour(&self.colour));
        if let Some(picture) = &self.picture1 {
            errors.check("picture1", validate_length(picture, 1, 255));
        }
        if let Some(picture) = &self.picture2 {
            errors.check("picture2", validate_length(picture, 1, 255));
        }
        errors.finish()
    }
}
