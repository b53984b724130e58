use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::controllers::{persisted_id, resolve_reference};
use crate::dto::common_dto::ApiResponse;
use crate::dto::contract_dto::{ContractResponse, CreateContractRequest, UpdateContractRequest};
use crate::models::{AuditEnvelope, Contract, Principal, UserProfile, Vehicle};
use crate::repositories::CarpoolStore;
use crate::services::lifecycle::AuditLifecycle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct ContractController {
    store: Arc<dyn CarpoolStore>,
    lifecycle: Arc<AuditLifecycle>,
}

impl ContractController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            lifecycle: state.lifecycle.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<ContractResponse>, AppError> {
        let contracts = self
            .lifecycle
            .list::<Contract, _>(self.store.as_ref(), false)
            .await?;
        self.with_parties(contracts).await
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<ContractResponse, AppError> {
        let contract = self.fetch(uuid).await?;
        self.to_response(contract).await
    }

    async fn fetch(&self, uuid: Uuid) -> Result<Contract, AppError> {
        self.lifecycle
            .fetch::<Contract, _>(self.store.as_ref(), uuid)
            .await
    }

    pub async fn create(
        &self,
        request: CreateContractRequest,
        actor: Option<&Principal>,
    ) -> Result<ApiResponse<ContractResponse>, AppError> {
        request.validate()?;

        let vehicle: Vehicle =
            resolve_reference(&self.lifecycle, self.store.as_ref(), request.vehicle_uuid, "vehicle_uuid").await?;
        let companion: UserProfile = resolve_reference(
            &self.lifecycle,
            self.store.as_ref(),
            request.companion_uuid,
            "companion_uuid",
        )
        .await?;

        let contract = Contract {
            audit: AuditEnvelope::new(),
            vehicle_id: persisted_id(&vehicle)?,
            companion_id: persisted_id(&companion)?,
            effective_start_date: request.effective_start_date,
            expiry_date: request.expiry_date,
            is_active: request.is_active,
            fuel_share: request.fuel_share,
            maintenance_share: request.maintenance_share,
            schedule: request.schedule,
        };
        let contract = self.lifecycle.create(self.store.as_ref(), contract, actor).await?;

        Ok(ApiResponse::success_with_message(
            ContractResponse::new(contract, &vehicle, &companion),
            "Contrato creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        uuid: Uuid,
        request: UpdateContractRequest,
        actor: Option<&Principal>,
    ) -> Result<ApiResponse<ContractResponse>, AppError> {
        request.validate()?;

        let mut contract = self.fetch(uuid).await?;
        request.apply(&mut contract);
        let contract = self.lifecycle.update(self.store.as_ref(), contract, actor).await?;
        let response = self.to_response(contract).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Contrato actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(
        &self,
        uuid: Uuid,
        reason: Option<&str>,
        actor: &Principal,
    ) -> Result<ApiResponse<ContractResponse>, AppError> {
        let contract = self.fetch(uuid).await?;
        let contract = self
            .lifecycle
            .void(self.store.as_ref(), contract, Some(actor), reason)
            .await?;

        let response = self.to_response(contract).await?;

        Ok(ApiResponse::success_with_message(response, "Contrato anulado".to_string()))
    }

    pub async fn restore(&self, uuid: Uuid) -> Result<ApiResponse<ContractResponse>, AppError> {
        let contract = self.fetch(uuid).await?;
        let contract = self.lifecycle.restore(self.store.as_ref(), contract).await?;

        let response = self.to_response(contract).await?;

        Ok(ApiResponse::success_with_message(response, "Contrato restaurado".to_string()))
    }

    pub async fn purge(&self, uuid: Uuid, actor: &Principal) -> Result<ApiResponse<ContractResponse>, AppError> {
        let contract = self.fetch(uuid).await?;
        let contract = self
            .lifecycle
            .purge(self.store.as_ref(), contract, Some(actor))
            .await?;

        let response = self.to_response(contract).await?;

        Ok(ApiResponse::success_with_message(response, "Contrato purgado".to_string()))
    }

    async fn to_response(&self, contract: Contract) -> Result<ContractResponse, AppError> {
        let vehicle = self
            .lifecycle
            .fetch_by_id::<Vehicle, _>(self.store.as_ref(), contract.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Contrato {} sin vehículo asociado", contract.audit.uuid))
            })?;
        let companion = self
            .lifecycle
            .fetch_by_id::<UserProfile, _>(self.store.as_ref(), contract.companion_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Contrato {} sin acompañante asociado", contract.audit.uuid))
            })?;
        Ok(ContractResponse::new(contract, &vehicle, &companion))
    }

    /// Resolver los UUID de las partes (anuladas o no) de cada contrato
    async fn with_parties(&self, contracts: Vec<Contract>) -> Result<Vec<ContractResponse>, AppError> {
        let vehicles: HashMap<i64, Vehicle> = self
            .lifecycle
            .list::<Vehicle, _>(self.store.as_ref(), true)
            .await?
            .into_iter()
            .filter_map(|vehicle| vehicle.audit.id.map(|id| (id, vehicle)))
            .collect();
        let companions: HashMap<i64, UserProfile> = self
            .lifecycle
            .list::<UserProfile, _>(self.store.as_ref(), true)
            .await?
            .into_iter()
            .filter_map(|profile| profile.audit.id.map(|id| (id, profile)))
            .collect();

        contracts
            .into_iter()
            .map(|contract| {
                match (vehicles.get(&contract.vehicle_id), companions.get(&contract.companion_id)) {
                    (Some(vehicle), Some(companion)) => {
                        Ok(ContractResponse::new(contract, vehicle, companion))
                    }
                    _ => Err(AppError::Internal(format!(
                        "Contrato {} con partes inexistentes",
                        contract.audit.uuid
                    ))),
                }
            })
            .collect()
    }
}
