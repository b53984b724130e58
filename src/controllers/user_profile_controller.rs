use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::user_profile_dto::{CreateUserProfileRequest, UpdateUserProfileRequest};
use crate::models::{Principal, UserProfile};
use crate::repositories::{CarpoolStore, PrincipalStore};
use crate::services::lifecycle::AuditLifecycle;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, validation_error, AppError};

pub struct UserProfileController {
    store: Arc<dyn CarpoolStore>,
    lifecycle: Arc<AuditLifecycle>,
}

impl UserProfileController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            lifecycle: state.lifecycle.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<UserProfile>, AppError> {
        self.lifecycle
            .list::<UserProfile, _>(self.store.as_ref(), false)
            .await
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<UserProfile, AppError> {
        self.lifecycle
            .fetch::<UserProfile, _>(self.store.as_ref(), uuid)
            .await
    }

    pub async fn create(
        &self,
        request: CreateUserProfileRequest,
        actor: Option<&Principal>,
    ) -> Result<ApiResponse<UserProfile>, AppError> {
        let profile = self.build_profile(request, actor).await?;
        let profile = self.lifecycle.create(self.store.as_ref(), profile, actor).await?;

        Ok(ApiResponse::success_with_message(
            profile,
            "Perfil creado exitosamente".to_string(),
        ))
    }

    /// Validar el request y comprobar que el principal existe y no tiene perfil
    pub(crate) async fn build_profile(
        &self,
        request: CreateUserProfileRequest,
        actor: Option<&Principal>,
    ) -> Result<UserProfile, AppError> {
        request.validate()?;

        let user_id = match (request.user_id, actor) {
            (Some(user_id), _) => user_id,
            (None, Some(actor)) => actor.id,
            (None, None) => return Err(validation_error("user_id", "A user is required for the profile")),
        };

        if self.store.find_principal(user_id).await?.is_none() {
            return Err(validation_error("user_id", "User does not exist"));
        }
        if self.store.profile_for_principal(user_id).await?.is_some() {
            return Err(conflict_error("UserProfile", "user_id", &user_id.to_string()));
        }

        Ok(request.into_entity(user_id))
    }

    pub async fn update(
        &self,
        uuid: Uuid,
        request: UpdateUserProfileRequest,
        actor: Option<&Principal>,
    ) -> Result<ApiResponse<UserProfile>, AppError> {
        request.validate()?;

        let mut profile = self.get_by_uuid(uuid).await?;
        request.apply(&mut profile);
        let profile = self.lifecycle.update(self.store.as_ref(), profile, actor).await?;

        Ok(ApiResponse::success_with_message(
            profile,
            "Perfil actualizado exitosamente".to_string(),
        ))
    }

    /// Desactivar el perfil. Se registra como una actualización.
    pub async fn deactivate(&self, uuid: Uuid, actor: &Principal) -> Result<ApiResponse<UserProfile>, AppError> {
        let mut profile = self.get_by_uuid(uuid).await?;
        profile.deactivate(Utc::now());
        let profile = self
            .lifecycle
            .update(self.store.as_ref(), profile, Some(actor))
            .await?;

        Ok(ApiResponse::success_with_message(profile, "Perfil desactivado".to_string()))
    }

    pub async fn activate(&self, uuid: Uuid, actor: &Principal) -> Result<ApiResponse<UserProfile>, AppError> {
        let mut profile = self.get_by_uuid(uuid).await?;
        profile.activate();
        let profile = self
            .lifecycle
            .update(self.store.as_ref(), profile, Some(actor))
            .await?;

        Ok(ApiResponse::success_with_message(profile, "Perfil activado".to_string()))
    }

    pub async fn delete(
        &self,
        uuid: Uuid,
        reason: Option<&str>,
        actor: &Principal,
    ) -> Result<ApiResponse<UserProfile>, AppError> {
        let profile = self.get_by_uuid(uuid).await?;
        let profile = self
            .lifecycle
            .void(self.store.as_ref(), profile, Some(actor), reason)
            .await?;

        Ok(ApiResponse::success_with_message(profile, "Perfil anulado".to_string()))
    }

    pub async fn restore(&self, uuid: Uuid) -> Result<ApiResponse<UserProfile>, AppError> {
        let profile = self.get_by_uuid(uuid).await?;
        let profile = self.lifecycle.restore(self.store.as_ref(), profile).await?;

        Ok(ApiResponse::success_with_message(profile, "Perfil restaurado".to_string()))
    }

    pub async fn purge(&self, uuid: Uuid, actor: &Principal) -> Result<ApiResponse<UserProfile>, AppError> {
        let profile = self.get_by_uuid(uuid).await?;
        let profile = self
            .lifecycle
            .purge(self.store.as_ref(), profile, Some(actor))
            .await?;

        Ok(ApiResponse::success_with_message(profile, "Perfil purgado".to_string()))
    }
}
