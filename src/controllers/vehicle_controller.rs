use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::controllers::{persisted_id, resolve_reference};
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::vehicle::VehicleStatus;
use crate::models::{Principal, Vehicle, VehicleModel};
use crate::repositories::{CarpoolStore, PrincipalStore};
use crate::services::lifecycle::AuditLifecycle;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError};

pub struct VehicleController {
    store: Arc<dyn CarpoolStore>,
    lifecycle: Arc<AuditLifecycle>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            lifecycle: state.lifecycle.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self
            .lifecycle
            .list::<Vehicle, _>(self.store.as_ref(), false)
            .await?;
        self.with_models(vehicles).await
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .lifecycle
            .fetch::<Vehicle, _>(self.store.as_ref(), uuid)
            .await?;
        self.to_response(vehicle).await
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
        actor: Option<&Principal>,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let registration_number = request.registration_number.trim().to_string();
        self.ensure_registration_available(&registration_number, None).await?;

        let model: VehicleModel =
            resolve_reference(&self.lifecycle, self.store.as_ref(), request.model_uuid, "model_uuid").await?;

        let owner_id = request
            .owner_id
            .unwrap_or_else(|| actor.unwrap_or(self.lifecycle.system_principal()).id);
        if self.store.find_principal(owner_id).await?.is_none() {
            return Err(validation_error("owner_id", "Owner does not exist"));
        }

        let mut vehicle = Vehicle::new(
            registration_number,
            request.colour,
            persisted_id(&model)?,
            owner_id,
            request.status.unwrap_or(VehicleStatus::Available),
        );
        vehicle.picture1 = request.picture1;
        vehicle.picture2 = request.picture2;

        let vehicle = self.lifecycle.create(self.store.as_ref(), vehicle, actor).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::new(vehicle, &model),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        uuid: Uuid,
        request: UpdateVehicleRequest,
        actor: Option<&Principal>,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let mut vehicle = self
            .lifecycle
            .fetch::<Vehicle, _>(self.store.as_ref(), uuid)
            .await?;
        self.apply_update(&mut vehicle, &request).await?;

        let vehicle = self.lifecycle.update(self.store.as_ref(), vehicle, actor).await?;
        let response = self.to_response(vehicle).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    /// Los vehículos nunca se eliminan: se anulan
    pub async fn delete(
        &self,
        uuid: Uuid,
        reason: Option<&str>,
        actor: &Principal,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self
            .lifecycle
            .fetch::<Vehicle, _>(self.store.as_ref(), uuid)
            .await?;
        let vehicle = self
            .lifecycle
            .void(self.store.as_ref(), vehicle, Some(actor), reason)
            .await?;
        let response = self.to_response(vehicle).await?;

        Ok(ApiResponse::success_with_message(response, "Vehículo anulado".to_string()))
    }

    pub async fn restore(&self, uuid: Uuid) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self
            .lifecycle
            .fetch::<Vehicle, _>(self.store.as_ref(), uuid)
            .await?;
        let vehicle = self.lifecycle.restore(self.store.as_ref(), vehicle).await?;
        let response = self.to_response(vehicle).await?;

        Ok(ApiResponse::success_with_message(response, "Vehículo restaurado".to_string()))
    }

    pub async fn purge(&self, uuid: Uuid, actor: &Principal) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self
            .lifecycle
            .fetch::<Vehicle, _>(self.store.as_ref(), uuid)
            .await?;
        let vehicle = self
            .lifecycle
            .purge(self.store.as_ref(), vehicle, Some(actor))
            .await?;
        let response = self.to_response(vehicle).await?;

        Ok(ApiResponse::success_with_message(response, "Vehículo purgado".to_string()))
    }

    /// Aplicar un request de actualización, verificando matrícula y modelo
    pub(crate) async fn apply_update(
        &self,
        vehicle: &mut Vehicle,
        request: &UpdateVehicleRequest,
    ) -> Result<(), AppError> {
        if let Some(registration_number) = &request.registration_number {
            let registration_number = registration_number.trim();
            if registration_number != vehicle.registration_number {
                self.ensure_registration_available(registration_number, vehicle.audit.id)
                    .await?;
            }
        }

        if let Some(model_uuid) = request.model_uuid {
            let model: VehicleModel =
                resolve_reference(&self.lifecycle, self.store.as_ref(), model_uuid, "model_uuid").await?;
            vehicle.model_id = persisted_id(&model)?;
        }

        request.apply(vehicle);
        Ok(())
    }

    async fn ensure_registration_available(
        &self,
        registration_number: &str,
        exclude_id: Option<i64>,
    ) -> Result<(), AppError> {
        if self
            .store
            .registration_number_taken(registration_number, exclude_id)
            .await?
        {
            return Err(validation_error(
                "registration_number",
                "A vehicle with this registration number already exists",
            ));
        }
        Ok(())
    }

    pub(crate) async fn to_response(&self, vehicle: Vehicle) -> Result<VehicleResponse, AppError> {
        let model = self
            .lifecycle
            .fetch_by_id::<VehicleModel, _>(self.store.as_ref(), vehicle.model_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Vehículo {} sin modelo asociado", vehicle.audit.uuid))
            })?;
        Ok(VehicleResponse::new(vehicle, &model))
    }

    /// Adjuntar el modelo (anulado o no) de cada vehículo
    pub(crate) async fn with_models(&self, vehicles: Vec<Vehicle>) -> Result<Vec<VehicleResponse>, AppError> {
        let models: HashMap<i64, VehicleModel> = self
            .lifecycle
            .list::<VehicleModel, _>(self.store.as_ref(), true)
            .await?
            .into_iter()
            .filter_map(|model| model.audit.id.map(|id| (id, model)))
            .collect();

        vehicles
            .into_iter()
            .map(|vehicle| {
                let model = models.get(&vehicle.model_id).ok_or_else(|| {
                    AppError::Internal(format!("Vehículo {} sin modelo asociado", vehicle.audit.uuid))
                })?;
                Ok(VehicleResponse::new(vehicle, model))
            })
            .collect()
    }
}
