//! Consola de administración
//!
//! Acceso solo para staff a modelos, vehículos y perfiles, incluidos los
//! registros anulados. Los contratos no se administran desde aquí.
//!
//! - Alta de vehículos: rechazada.
//! - Eliminación: rechazada para todos los tipos.
//! - Guardado: reconcilia el estado de anulación con el flag `voided` enviado.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::require_staff;
use crate::controllers::user_profile_controller::UserProfileController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::admin_dto::{
    AdminUserProfileChange, AdminUserProfileCreate, AdminVehicleChange, AdminVehicleModelChange,
    AdminVehicleModelCreate,
};
use crate::dto::common_dto::AdminVoidState;
use crate::dto::user_profile_dto::UserProfileFilter;
use crate::dto::vehicle_dto::{VehicleFilter, VehicleResponse};
use crate::dto::vehicle_model_dto::{VehicleModelFilter, VehicleModelResponse};
use crate::models::{Auditable, Principal, UserProfile, Vehicle, VehicleModel};
use crate::repositories::CarpoolStore;
use crate::services::lifecycle::AuditLifecycle;
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, AppError};

pub struct AdminController {
    store: Arc<dyn CarpoolStore>,
    lifecycle: Arc<AuditLifecycle>,
    vehicles: VehicleController,
    profiles: UserProfileController,
}

/// Copiar al envelope el estado de anulación del formulario.
/// El motivo solo se aplica a registros que quedan anulados.
fn apply_void_state<E: Auditable>(entity: &mut E, void_state: AdminVoidState) {
    let envelope = entity.envelope_mut();
    if let Some(voided) = void_state.voided {
        envelope.voided = voided;
    }
    if let Some(reason) = void_state.void_reason {
        if envelope.voided {
            envelope.void_reason = Some(reason);
        }
    }
}

impl AdminController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            lifecycle: state.lifecycle.clone(),
            vehicles: VehicleController::new(state),
            profiles: UserProfileController::new(state),
        }
    }

    // ---- Modelos de vehículo ----

    pub async fn list_vehicle_models(
        &self,
        actor: &Principal,
        filter: &VehicleModelFilter,
    ) -> Result<Vec<VehicleModelResponse>, AppError> {
        require_staff(actor, "list vehicle models in admin")?;

        let models = self
            .lifecycle
            .list::<VehicleModel, _>(self.store.as_ref(), true)
            .await?;

        Ok(models
            .into_iter()
            .filter(|model| filter.matches(model))
            .map(VehicleModelResponse::from)
            .collect())
    }

    pub async fn add_vehicle_model(
        &self,
        actor: &Principal,
        form: AdminVehicleModelCreate,
    ) -> Result<VehicleModelResponse, AppError> {
        require_staff(actor, "add vehicle model")?;
        form.fields.validate()?;
        form.void_state.validate()?;

        let mut model = form.fields.into_entity();
        apply_void_state(&mut model, form.void_state);

        let model = self.lifecycle.admin_save(self.store.as_ref(), model, actor).await?;
        Ok(model.into())
    }

    pub async fn change_vehicle_model(
        &self,
        actor: &Principal,
        uuid: Uuid,
        form: AdminVehicleModelChange,
    ) -> Result<VehicleModelResponse, AppError> {
        require_staff(actor, "change vehicle model")?;
        form.fields.validate()?;
        form.void_state.validate()?;

        let mut model = self
            .lifecycle
            .fetch::<VehicleModel, _>(self.store.as_ref(), uuid)
            .await?;
        form.fields.apply(&mut model);
        apply_void_state(&mut model, form.void_state);

        let model = self.lifecycle.admin_save(self.store.as_ref(), model, actor).await?;
        Ok(model.into())
    }

    // ---- Vehículos ----

    pub async fn list_vehicles(
        &self,
        actor: &Principal,
        filter: &VehicleFilter,
    ) -> Result<Vec<VehicleResponse>, AppError> {
        require_staff(actor, "list vehicles in admin")?;

        let model_id = match filter.model_uuid {
            Some(uuid) => match self
                .lifecycle
                .fetch::<VehicleModel, _>(self.store.as_ref(), uuid)
                .await
            {
                Ok(model) => model.audit.id,
                Err(AppError::NotFound(_)) => return Ok(Vec::new()),
                Err(e) => return Err(e),
            },
            None => None,
        };

        let vehicles: Vec<Vehicle> = self
            .lifecycle
            .list::<Vehicle, _>(self.store.as_ref(), true)
            .await?
            .into_iter()
            .filter(|vehicle| {
                filter.status.map_or(true, |status| vehicle.status == status)
                    && filter.owner_id.map_or(true, |owner| vehicle.owner_id == owner)
                    && model_id.map_or(true, |id| vehicle.model_id == id)
            })
            .collect();

        self.vehicles.with_models(vehicles).await
    }

    pub async fn add_vehicle(&self, actor: &Principal) -> Result<VehicleResponse, AppError> {
        warn!("🚫 Alta de vehículo rechazada en admin para '{}'", actor.username);
        Err(forbidden_error(
            "add Vehicle",
            "vehicles cannot be created from the admin console",
        ))
    }

    pub async fn change_vehicle(
        &self,
        actor: &Principal,
        uuid: Uuid,
        form: AdminVehicleChange,
    ) -> Result<VehicleResponse, AppError> {
        require_staff(actor, "change vehicle")?;
        form.fields.validate()?;
        form.void_state.validate()?;

        let mut vehicle = self
            .lifecycle
            .fetch::<Vehicle, _>(self.store.as_ref(), uuid)
            .await?;
        self.vehicles.apply_update(&mut vehicle, &form.fields).await?;
        apply_void_state(&mut vehicle, form.void_state);

        let vehicle = self.lifecycle.admin_save(self.store.as_ref(), vehicle, actor).await?;
        self.vehicles.to_response(vehicle).await
    }

    // ---- Perfiles ----

    pub async fn list_user_profiles(
        &self,
        actor: &Principal,
        filter: &UserProfileFilter,
    ) -> Result<Vec<UserProfile>, AppError> {
        require_staff(actor, "list user profiles in admin")?;

        let profiles = self
            .lifecycle
            .list::<UserProfile, _>(self.store.as_ref(), true)
            .await?;

        Ok(profiles.into_iter().filter(|profile| filter.matches(profile)).collect())
    }

    pub async fn add_user_profile(
        &self,
        actor: &Principal,
        form: AdminUserProfileCreate,
    ) -> Result<UserProfile, AppError> {
        require_staff(actor, "add user profile")?;
        form.void_state.validate()?;

        let mut profile = self.profiles.build_profile(form.fields, Some(actor)).await?;
        apply_void_state(&mut profile, form.void_state);

        self.lifecycle.admin_save(self.store.as_ref(), profile, actor).await
    }

    pub async fn change_user_profile(
        &self,
        actor: &Principal,
        uuid: Uuid,
        form: AdminUserProfileChange,
    ) -> Result<UserProfile, AppError> {
        require_staff(actor, "change user profile")?;
        form.fields.validate()?;
        form.void_state.validate()?;

        let mut profile = self
            .lifecycle
            .fetch::<UserProfile, _>(self.store.as_ref(), uuid)
            .await?;
        form.fields.apply(&mut profile);
        apply_void_state(&mut profile, form.void_state);

        self.lifecycle.admin_save(self.store.as_ref(), profile, actor).await
    }

    /// La consola nunca elimina registros
    pub fn delete(&self, actor: &Principal, kind: &str) -> Result<(), AppError> {
        warn!("🚫 Eliminación de {} rechazada en admin para '{}'", kind, actor.username);
        Err(forbidden_error(
            &format!("delete {}", kind),
            "records cannot be deleted from the admin console",
        ))
    }
}
