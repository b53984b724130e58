use serde::Deserialize;

use crate::dto::common_dto::AdminVoidState;
use crate::dto::user_profile_dto::{CreateUserProfileRequest, UpdateUserProfileRequest};
use crate::dto::vehicle_dto::UpdateVehicleRequest;
use crate::dto::vehicle_model_dto::{CreateVehicleModelRequest, UpdateVehicleModelRequest};

// Formularios de la consola de administración: campos de la entidad más el
// estado de anulación enviado

#[derive(Debug, Deserialize)]
pub struct AdminVehicleModelCreate {
    #[serde(flatten)]
    pub fields: CreateVehicleModelRequest,
    #[serde(flatten)]
    pub void_state: AdminVoidState,
}

#[derive(Debug, Deserialize)]
pub struct AdminVehicleModelChange {
    #[serde(flatten)]
    pub fields: UpdateVehicleModelRequest,
    #[serde(flatten)]
    pub void_state: AdminVoidState,
}

#[derive(Debug, Deserialize)]
pub struct AdminVehicleChange {
    #[serde(flatten)]
    pub fields: UpdateVehicleRequest,
    #[serde(flatten)]
    pub void_state: AdminVoidState,
}

#[derive(Debug, Deserialize)]
pub struct AdminUserProfileCreate {
    #[serde(flatten)]
    pub fields: CreateUserProfileRequest,
    #[serde(flatten)]
    pub void_state: AdminVoidState,
}

#[derive(Debug, Deserialize)]
pub struct AdminUserProfileChange {
    #[serde(flatten)]
    pub fields: UpdateUserProfileRequest,
    #[serde(flatten)]
    pub void_state: AdminVoidState,
}
