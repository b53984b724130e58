use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::controllers::persisted_id;
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_model_dto::{
    CreateVehicleModelRequest, UpdateVehicleModelRequest, VehicleModelResponse,
};
use crate::models::audit::DEPENDENT_VOID_REASON;
use crate::models::{Principal, VehicleModel};
use crate::repositories::CarpoolStore;
use crate::services::lifecycle::AuditLifecycle;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Resultado de eliminar un modelo del catálogo
#[derive(Debug)]
pub enum ModelDeletion {
    /// Tenía vehículos asociados: queda anulado
    Voided(VehicleModel),
    /// Sin dependientes: fila eliminada
    Deleted,
}

pub struct VehicleModelController {
    store: Arc<dyn CarpoolStore>,
    lifecycle: Arc<AuditLifecycle>,
}

impl VehicleModelController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            lifecycle: state.lifecycle.clone(),
        }
    }

    /// Catálogo sin anulados, ordenado por fabricante
    pub async fn list(&self) -> Result<Vec<VehicleModelResponse>, AppError> {
        let models = self
            .lifecycle
            .list::<VehicleModel, _>(self.store.as_ref(), false)
            .await?;

        Ok(models.into_iter().map(VehicleModelResponse::from).collect())
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<VehicleModelResponse, AppError> {
        let model = self
            .lifecycle
            .fetch::<VehicleModel, _>(self.store.as_ref(), uuid)
            .await?;

        Ok(model.into())
    }

    pub async fn create(
        &self,
        request: CreateVehicleModelRequest,
        actor: Option<&Principal>,
    ) -> Result<ApiResponse<VehicleModelResponse>, AppError> {
        request.validate()?;

        let model = self
            .lifecycle
            .create(self.store.as_ref(), request.into_entity(), actor)
            .await?;

        Ok(ApiResponse::success_with_message(
            model.into(),
            "Modelo de vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        uuid: Uuid,
        request: UpdateVehicleModelRequest,
        actor: Option<&Principal>,
    ) -> Result<ApiResponse<VehicleModelResponse>, AppError> {
        request.validate()?;

        let mut model = self
            .lifecycle
            .fetch::<VehicleModel, _>(self.store.as_ref(), uuid)
            .await?;
        request.apply(&mut model);

        let model = self.lifecycle.update(self.store.as_ref(), model, actor).await?;

        Ok(ApiResponse::success_with_message(
            model.into(),
            "Modelo de vehículo actualizado exitosamente".to_string(),
        ))
    }

    /// Con vehículos asociados se anula; sin ellos se elimina la fila
    pub async fn delete(&self, uuid: Uuid, actor: &Principal) -> Result<ModelDeletion, AppError> {
        let model = self
            .lifecycle
            .fetch::<VehicleModel, _>(self.store.as_ref(), uuid)
            .await?;

        let dependents = self
            .store
            .count_vehicles_for_model(persisted_id(&model)?)
            .await?;

        if dependents > 0 {
            info!(
                "🔗 Modelo {} tiene {} vehículo(s); se anula en lugar de eliminar",
                uuid, dependents
            );
            return self.void_in_use(model, actor).await;
        }

        self.hard_delete_or_void(model, actor).await
    }

    /// Un vehículo creado después del conteo hace fallar el borrado por FK;
    /// en ese caso el modelo se anula igual que con dependientes.
    async fn hard_delete_or_void(
        &self,
        model: VehicleModel,
        actor: &Principal,
    ) -> Result<ModelDeletion, AppError> {
        match self.lifecycle.hard_delete(self.store.as_ref(), &model, actor).await {
            Ok(()) => Ok(ModelDeletion::Deleted),
            Err(AppError::Referenced(_)) => {
                warn!(
                    "🔗 Modelo {} recibió vehículos durante la eliminación; se anula",
                    model.audit.uuid
                );
                self.void_in_use(model, actor).await
            }
            Err(e) => Err(e),
        }
    }

    async fn void_in_use(
        &self,
        model: VehicleModel,
        actor: &Principal,
    ) -> Result<ModelDeletion, AppError> {
        let model = self
            .lifecycle
            .void(self.store.as_ref(), model, Some(actor), Some(DEPENDENT_VOID_REASON))
            .await?;
        Ok(ModelDeletion::Voided(model))
    }

    pub async fn restore(&self, uuid: Uuid) -> Result<ApiResponse<VehicleModelResponse>, AppError> {
        let model = self
            .lifecycle
            .fetch::<VehicleModel, _>(self.store.as_ref(), uuid)
            .await?;
        let model = self.lifecycle.restore(self.store.as_ref(), model).await?;

        Ok(ApiResponse::success_with_message(
            model.into(),
            "Modelo de vehículo restaurado".to_string(),
        ))
    }

    pub async fn purge(
        &self,
        uuid: Uuid,
        actor: &Principal,
    ) -> Result<ApiResponse<VehicleModelResponse>, AppError> {
        let model = self
            .lifecycle
            .fetch::<VehicleModel, _>(self.store.as_ref(), uuid)
            .await?;
        let model = self
            .lifecycle
            .purge(self.store.as_ref(), model, Some(actor))
            .await?;

        Ok(ApiResponse::success_with_message(
            model.into(),
            "Modelo de vehículo purgado".to_string(),
        ))
    }
}
