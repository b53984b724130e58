use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Vehicle, VehicleModel, VehicleStatus};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 10, message = "Registration number must be between 1 and 10 characters"))]
    pub registration_number: String,
    pub colour: Option<String>,
    pub model_uuid: Uuid,
    /// Por defecto, el principal que hace la request
    pub owner_id: Option<i64>,
    pub status: Option<VehicleStatus>,
    #[validate(length(max = 255))]
    pub picture1: Option<String>,
    #[validate(length(max = 255))]
    pub picture2: Option<String>,
}

// Request para actualizar un vehículo
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 10, message = "Registration number must be between 1 and 10 characters"))]
    pub registration_number: Option<String>,
    pub colour: Option<String>,
    pub model_uuid: Option<Uuid>,
    pub status: Option<VehicleStatus>,
    #[validate(length(max = 255))]
    pub picture1: Option<String>,
    #[validate(length(max = 255))]
    pub picture2: Option<String>,
}

impl UpdateVehicleRequest {
    /// Aplicar los campos simples; el modelo se resuelve en el controller
    pub fn apply(&self, entity: &mut Vehicle) {
        if let Some(registration_number) = &self.registration_number {
            entity.registration_number = registration_number.clone();
        }
        if let Some(colour) = &self.colour {
            entity.colour = colour.clone();
        }
        if let Some(status) = self.status {
            entity.status = status;
        }
        if let Some(picture) = &self.picture1 {
            entity.picture1 = Some(picture.clone());
        }
        if let Some(picture) = &self.picture2 {
            entity.picture2 = Some(picture.clone());
        }
    }
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub model_uuid: Uuid,
    pub display_name: String,
}

impl VehicleResponse {
    pub fn new(vehicle: Vehicle, model: &VehicleModel) -> Self {
        Self {
            display_name: vehicle.display_name(model),
            model_uuid: model.audit.uuid,
            vehicle,
        }
    }
}

// Filtros del listado de administración
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilter {
    pub status: Option<VehicleStatus>,
    pub owner_id: Option<i64>,
    pub model_uuid: Option<Uuid>,
}
