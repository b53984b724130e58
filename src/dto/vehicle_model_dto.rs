use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{VehicleModel, VehicleType};

// Request para crear un modelo del catálogo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleModelRequest {
    #[validate(length(min = 1, max = 20, message = "Manufacturer must be between 1 and 20 characters"))]
    pub vendor: String,
    #[validate(length(min = 1, max = 20, message = "Model name must be between 1 and 20 characters"))]
    pub model: String,
    pub vehicle_type: VehicleType,
    pub capacity: Option<i16>,
}

impl CreateVehicleModelRequest {
    pub fn into_entity(self) -> VehicleModel {
        VehicleModel::new(self.vendor, self.model, self.vehicle_type, self.capacity)
    }
}

// Request para actualizar un modelo; solo se aplican los campos presentes
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleModelRequest {
    #[validate(length(min = 1, max = 20, message = "Manufacturer must be between 1 and 20 characters"))]
    pub vendor: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Model name must be between 1 and 20 characters"))]
    pub model: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub capacity: Option<i16>,
}

impl UpdateVehicleModelRequest {
    /// La capacidad se vuelve a normalizar en la política de la entidad
    pub fn apply(self, entity: &mut VehicleModel) {
        if let Some(vendor) = self.vendor {
            entity.vendor = vendor;
        }
        if let Some(model) = self.model {
            entity.model = model;
        }
        if let Some(vehicle_type) = self.vehicle_type {
            entity.vehicle_type = vehicle_type;
        }
        if let Some(capacity) = self.capacity {
            entity.capacity = capacity;
        }
    }
}

// Response de modelo con su nombre para mostrar
#[derive(Debug, Serialize)]
pub struct VehicleModelResponse {
    #[serde(flatten)]
    pub vehicle_model: VehicleModel,
    pub display_name: String,
}

impl From<VehicleModel> for VehicleModelResponse {
    fn from(vehicle_model: VehicleModel) -> Self {
        Self {
            display_name: vehicle_model.to_string(),
            vehicle_model,
        }
    }
}

// Filtros del listado de administración
#[derive(Debug, Default, Deserialize)]
pub struct VehicleModelFilter {
    pub vendor: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub capacity: Option<i16>,
}

impl VehicleModelFilter {
    pub fn matches(&self, entity: &VehicleModel) -> bool {
        self.vendor
            .as_deref()
            .map_or(true, |vendor| entity.vendor.eq_ignore_ascii_case(vendor))
            && self.vehicle_type.map_or(true, |t| entity.vehicle_type == t)
            && self.capacity.map_or(true, |c| entity.capacity == c)
    }
}
