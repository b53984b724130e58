use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Contract, UserProfile, Vehicle};

// Request para crear un contrato
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContractRequest {
    pub vehicle_uuid: Uuid,
    pub companion_uuid: Uuid,
    pub effective_start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[validate(range(min = 0, max = 100, message = "Fuel share must be between 0 and 100"))]
    pub fuel_share: i16,
    #[validate(range(min = 0, max = 100, message = "Maintenance share must be between 0 and 100"))]
    pub maintenance_share: i16,
    #[validate(length(min = 1, max = 255, message = "Schedule is required (max 255 characters)"))]
    pub schedule: String,
}

fn default_true() -> bool {
    true
}

// Request para actualizar un contrato. Las partes no se cambian.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateContractRequest {
    pub effective_start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    #[validate(range(min = 0, max = 100, message = "Fuel share must be between 0 and 100"))]
    pub fuel_share: Option<i16>,
    #[validate(range(min = 0, max = 100, message = "Maintenance share must be between 0 and 100"))]
    pub maintenance_share: Option<i16>,
    #[validate(length(min = 1, max = 255, message = "Schedule is required (max 255 characters)"))]
    pub schedule: Option<String>,
}

impl UpdateContractRequest {
    pub fn apply(self, entity: &mut Contract) {
        if let Some(start) = self.effective_start_date {
            entity.effective_start_date = start;
        }
        if let Some(expiry) = self.expiry_date {
            entity.expiry_date = expiry;
        }
        if let Some(is_active) = self.is_active {
            entity.is_active = is_active;
        }
        if let Some(share) = self.fuel_share {
            entity.fuel_share = share;
        }
        if let Some(share) = self.maintenance_share {
            entity.maintenance_share = share;
        }
        if let Some(schedule) = self.schedule {
            entity.schedule = schedule;
        }
    }
}

// Response de contrato: las partes se exponen por UUID
#[derive(Debug, Serialize)]
pub struct ContractResponse {
    #[serde(flatten)]
    pub contract: Contract,
    pub vehicle_uuid: Uuid,
    pub companion_uuid: Uuid,
}

impl ContractResponse {
    pub fn new(contract: Contract, vehicle: &Vehicle, companion: &UserProfile) -> Self {
        Self {
            vehicle_uuid: vehicle.audit.uuid,
            companion_uuid: companion.audit.uuid,
            contract,
        }
    }
}
